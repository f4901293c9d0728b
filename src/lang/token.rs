//! ## Keyword tables
//!
//! BASIC V2 keywords occupy one byte in the range 0x80-0xFF. The TSB
//! extension keywords are prefixed with the escape byte [`ESCAPE`].

use std::cmp::Reverse;

pub const ESCAPE: u8 = 0x64;

pub const DATA: u8 = 0x83;
pub const GOTO: u8 = 0x89;
pub const GOSUB: u8 = 0x8D;
pub const REM: u8 = 0x8F;
pub const PRINT: u8 = 0x99;
pub const TO: u8 = 0xA4;
pub const THEN: u8 = 0xA7;
pub const GO: u8 = 0xCB;

/// Extension code of `AT`. It equals `(`, which the source supplies.
pub const AT: u16 = 0x28;

/// Extension codes that collide with the escape convention are moved
/// onto the unused base codes of `<`, `=` and `>`.
const REMAPPED: [(u8, u8); 3] = [(0x3C, 0xB3), (0x3D, 0xB2), (0x3E, 0xB1)];

/// Keywords abbreviated by their third letter instead of the second.
const LONG_ABBREVIATIONS: [&str; 7] = ["GOSUB", "LEFT$", "STEP", "STR$", "RESTORE", "RETURN", "CLOSE"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Token {
    Basic(u8),
    Extension(u16),
}

impl Token {
    /// Append the binary form of this token.
    pub fn encode(self, out: &mut Vec<u8>) {
        match self {
            Token::Basic(code) => out.push(code),
            Token::Extension(AT) => out.push(ESCAPE),
            Token::Extension(code) if code > 0xFF => {
                out.push(ESCAPE);
                out.push((code >> 8) as u8);
                out.push(code as u8);
            }
            Token::Extension(code) => {
                out.push(ESCAPE);
                out.push(remap(code as u8));
            }
        }
    }

    /// Numeric identity used in verbose traces.
    pub fn id(self) -> u32 {
        match self {
            Token::Basic(code) => code as u32,
            Token::Extension(code) if code > 0xFF => 0x64_0000 | code as u32,
            Token::Extension(code) => 0x6400 | code as u32,
        }
    }
}

fn remap(code: u8) -> u8 {
    REMAPPED
        .iter()
        .find(|(from, _)| *from == code)
        .map(|(_, to)| *to)
        .unwrap_or(code)
}

/// Inverse of the extension remap, applied to the byte after [`ESCAPE`].
pub fn unmap(byte: u8) -> u8 {
    REMAPPED
        .iter()
        .find(|(_, to)| *to == byte)
        .map(|(from, _)| *from)
        .unwrap_or(byte)
}

pub fn basic_name(code: u8) -> Option<&'static str> {
    BASIC
        .iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}

pub fn extension_name(code: u16) -> Option<&'static str> {
    TSB.iter()
        .find(|(_, c)| *c == code)
        .map(|(name, _)| *name)
}

/// Operators are listed without surrounding spaces.
pub fn is_operator(code: u8) -> bool {
    matches!(code, 0xAA..=0xAE | 0xB1..=0xB3)
}

fn abbreviate(name: &str) -> Option<String> {
    let chars: Vec<char> = name.chars().collect();
    let split = if LONG_ABBREVIATIONS.contains(&name) { 2 } else { 1 };
    if chars.len() <= split || !chars[split].is_ascii_alphabetic() {
        return None;
    }
    let mut abbreviation: String = chars[..split].iter().map(|c| c.to_ascii_lowercase()).collect();
    abbreviation.push(chars[split].to_ascii_uppercase());
    Some(abbreviation)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub name: &'static str,
    pub token: Token,
    /// Number of source characters consumed.
    pub len: usize,
}

const PRINT_SHORTHAND: Match = Match {
    name: "?",
    token: Token::Basic(PRINT),
    len: 1,
};

#[derive(Debug, Clone)]
struct Entry {
    name: &'static str,
    abbreviation: Option<String>,
    token: Token,
}

/// ## Keyword lookup
///
/// Keywords are kept longest first so a scan always finds the longest
/// keyword at a position. Each keyword tries its abbreviation before its
/// full spelling.

#[derive(Debug, Clone)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new(extensions: bool) -> Catalog {
        let mut entries: Vec<Entry> = BASIC
            .iter()
            .map(|&(name, code)| Entry {
                name,
                abbreviation: abbreviate(name),
                token: Token::Basic(code),
            })
            .collect();
        if extensions {
            for &(name, code) in TSB.iter() {
                if basic_code(name).is_some() {
                    continue;
                }
                entries.push(Entry {
                    name,
                    abbreviation: None,
                    token: Token::Extension(code),
                });
            }
        }
        entries.sort_by_key(|entry| Reverse(entry.name.len()));
        Catalog { entries }
    }

    /// Find the keyword starting at `pos`.
    pub fn peek(&self, text: &[char], pos: usize) -> Option<Match> {
        let rest = text.get(pos..)?;
        if rest.first() == Some(&'?') {
            return Some(PRINT_SHORTHAND);
        }
        for entry in &self.entries {
            if let Some(abbreviation) = &entry.abbreviation {
                if starts_with_exact(rest, abbreviation) {
                    return Some(Match {
                        name: entry.name,
                        token: entry.token,
                        len: abbreviation.chars().count(),
                    });
                }
            }
            if starts_with_keyword(rest, entry.name) {
                return Some(Match {
                    name: entry.name,
                    token: entry.token,
                    len: entry.name.chars().count(),
                });
            }
        }
        None
    }

    /// Match a whole word against the keywords.
    pub fn exact(&self, word: &str) -> Option<Match> {
        if word == "?" {
            return Some(PRINT_SHORTHAND);
        }
        let upper = word.to_ascii_uppercase();
        for entry in &self.entries {
            if entry.abbreviation.as_deref() == Some(word) {
                return Some(Match {
                    name: entry.name,
                    token: entry.token,
                    len: word.chars().count(),
                });
            }
            if upper == entry.name {
                return Some(Match {
                    name: entry.name,
                    token: entry.token,
                    len: word.chars().count(),
                });
            }
        }
        None
    }
}

fn basic_code(name: &str) -> Option<u8> {
    BASIC.iter().find(|(n, _)| *n == name).map(|(_, code)| *code)
}

fn starts_with_exact(text: &[char], prefix: &str) -> bool {
    let mut text = text.iter();
    prefix.chars().all(|c| text.next() == Some(&c))
}

fn starts_with_keyword(text: &[char], keyword: &str) -> bool {
    let mut text = text.iter();
    keyword
        .chars()
        .all(|c| text.next().map(|t| t.to_ascii_uppercase()) == Some(c))
}

const BASIC: [(&str, u8); 77] = [
    ("END", 0x80),
    ("FOR", 0x81),
    ("NEXT", 0x82),
    ("DATA", 0x83),
    ("INPUT#", 0x84),
    ("INPUT", 0x85),
    ("DIM", 0x86),
    ("READ", 0x87),
    ("LET", 0x88),
    ("GOTO", 0x89),
    ("RUN", 0x8A),
    ("IF", 0x8B),
    ("RESTORE", 0x8C),
    ("GOSUB", 0x8D),
    ("RETURN", 0x8E),
    ("REM", 0x8F),
    ("STOP", 0x90),
    ("ON", 0x91),
    ("WAIT", 0x92),
    ("LOAD", 0x93),
    ("SAVE", 0x94),
    ("VERIFY", 0x95),
    ("DEF", 0x96),
    ("POKE", 0x97),
    ("PRINT#", 0x98),
    ("PRINT", 0x99),
    ("CONT", 0x9A),
    ("LIST", 0x9B),
    ("CLR", 0x9C),
    ("CMD", 0x9D),
    ("SYS", 0x9E),
    ("OPEN", 0x9F),
    ("CLOSE", 0xA0),
    ("GET", 0xA1),
    ("NEW", 0xA2),
    ("TAB(", 0xA3),
    ("TO", 0xA4),
    ("FN", 0xA5),
    ("SPC(", 0xA6),
    ("THEN", 0xA7),
    ("NOT", 0xA8),
    ("STEP", 0xA9),
    ("+", 0xAA),
    ("-", 0xAB),
    ("*", 0xAC),
    ("/", 0xAD),
    ("^", 0xAE),
    ("AND", 0xAF),
    ("OR", 0xB0),
    (">", 0xB1),
    ("=", 0xB2),
    ("<", 0xB3),
    ("SGN", 0xB4),
    ("INT", 0xB5),
    ("ABS", 0xB6),
    ("USR", 0xB7),
    ("FRE", 0xB8),
    ("POS", 0xB9),
    ("SQR", 0xBA),
    ("RND", 0xBB),
    ("LOG", 0xBC),
    ("EXP", 0xBD),
    ("COS", 0xBE),
    ("SIN", 0xBF),
    ("TAN", 0xC0),
    ("ATN", 0xC1),
    ("PEEK", 0xC2),
    ("LEN", 0xC3),
    ("STR$", 0xC4),
    ("VAL", 0xC5),
    ("ASC", 0xC6),
    ("CHR$", 0xC7),
    ("LEFT$", 0xC8),
    ("RIGHT$", 0xC9),
    ("MID$", 0xCA),
    ("GO", 0xCB),
    ("PI", 0xFF),
];

const TSB: [(&str, u16); 127] = [
    ("HIRES", 1),
    ("PLOT", 2),
    ("LINE", 3),
    ("BLOCK", 4),
    ("FCHR", 5),
    ("FCOL", 6),
    ("FILL", 7),
    ("REC", 8),
    ("ROT", 9),
    ("DRAW", 10),
    ("CHAR", 11),
    ("HI COL", 12),
    ("INV", 13),
    ("FRAC", 14),
    ("MOVE", 15),
    ("PLACE", 16),
    ("UPB", 17),
    ("UPW", 18),
    ("LEFTW", 19),
    ("LEFTB", 20),
    ("DOWNB", 21),
    ("DOWNW", 22),
    ("RIGHTB", 23),
    ("RIGHTW", 24),
    ("MULTI", 25),
    ("COLOUR", 26),
    ("MMOB", 27),
    ("BFLASH", 28),
    ("MOB SET", 29),
    ("MUSIC", 30),
    ("FLASH", 31),
    ("REPEAT", 32),
    ("PLAY", 33),
    ("DO", 34),
    ("CENTRE", 35),
    ("ENVELOPE", 36),
    ("CGOTO", 37),
    ("WAVE", 38),
    ("FETCH", 39),
    ("AT", 40),
    ("UNTIL", 41),
    ("*", 42),
    ("+", 43),
    ("USE", 44),
    ("-", 45),
    ("GLOBAL", 46),
    ("/", 47),
    ("RESET", 48),
    ("PROC", 49),
    ("CALL", 50),
    ("EXEC", 51),
    ("END PROC", 52),
    ("EXIT", 53),
    ("END LOOP", 54),
    ("ON KEY", 55),
    ("DISABLE", 56),
    ("RESUME", 57),
    ("LOOP", 58),
    ("DELAY", 59),
    ("CLS", 60),
    ("X!", 61),
    ("MAP", 62),
    (">", 63),
    ("SECURE", 64),
    ("DISAPA", 65),
    ("CIRCLE", 66),
    ("ON ERROR", 67),
    ("NO ERROR", 68),
    ("LOCAL", 69),
    ("RCOMP", 70),
    ("ELSE", 71),
    ("RETRACE", 72),
    ("TRACE", 73),
    ("DIR", 74),
    ("PAGE", 75),
    ("DUMP", 76),
    ("FIND", 77),
    ("OPTION", 78),
    ("AUTO", 79),
    ("OLD", 80),
    ("JOY", 81),
    ("MOD", 82),
    ("DIV", 83),
    ("D!", 84),
    ("DUP", 85),
    ("INKEY", 86),
    ("INST", 87),
    ("TEST", 88),
    ("LIN", 89),
    ("EXOR", 90),
    ("INSERT", 91),
    ("POT", 92),
    ("PENX", 93),
    ("^", 94),
    ("PENY", 95),
    ("SOUND", 96),
    ("GRAPHICS", 97),
    ("DESIGN", 98),
    ("RLOCMOB", 99),
    ("CMOB", 100),
    ("BCKGNDS", 101),
    ("PAUSE", 102),
    ("NRM", 103),
    ("MOB", 104),
    ("OFF", 105),
    ("ANGL", 106),
    ("ARC", 107),
    ("COLD", 108),
    ("SCRSV", 109),
    ("SCRLD", 110),
    ("TEXT", 111),
    ("CSET", 112),
    ("VOL", 113),
    ("DISK", 114),
    ("HRDCPY", 115),
    ("KEY", 116),
    ("PAINT", 117),
    ("LOW COL", 118),
    ("COPY", 119),
    ("MERGE", 120),
    ("RENUMBER", 121),
    ("MEM", 122),
    ("DETECT", 123),
    ("CHECK", 124),
    ("DISPLAY", 125),
    ("ERR", 126),
    ("OUT", 127),
];
