/// ## Character set mode
///
/// The Commodore has two character sets. In upper case mode letters are
/// upper case with graphics characters on the shifted keys. In lower case
/// mode the shifted keys produce upper case letters.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Case {
    Upper,
    Lower,
}

impl Default for Case {
    fn default() -> Case {
        Case::Upper
    }
}

impl Case {
    /// Normalize a letter of program code to this case.
    pub fn apply(self, c: char) -> char {
        match self {
            Case::Upper => c.to_ascii_uppercase(),
            Case::Lower => c.to_ascii_lowercase(),
        }
    }
}

/// Convert a source character to its PETSCII byte.
///
/// Outside of raw strings lower case letters always become the unshifted
/// letters 0x41-0x5A. In lower case mode upper case letters move to the
/// shifted range so the two cases swap places.
pub fn encode(c: char, case: Case, raw: bool) -> u8 {
    match c {
        'A'..='Z' if !raw && case == Case::Lower => c as u8 + 32,
        'a'..='z' if !raw => c as u8 - 32,
        '^' | '\u{2191}' => 0x5E,
        '\u{2190}' => 0x5F,
        '\u{a3}' => 0x5C,
        '\u{3c0}' => 0xFF,
        c if (c as u32) <= 0xFF => c as u8,
        _ => b'?',
    }
}

/// Convert a PETSCII byte back to a source character.
pub fn decode(b: u8, case: Case) -> char {
    match b {
        0x41..=0x5A if case == Case::Lower => (b + 32) as char,
        0x61..=0x7A if case == Case::Lower => (b - 32) as char,
        0xC1..=0xDA if case == Case::Lower => (b - 128) as char,
        _ => b as char,
    }
}

/// Resolve the text between `{` and `}` inside a string.
///
/// Returns the byte and how many times to insert it. A leading count
/// separated by whitespace repeats the code, e.g. `{23 down}`. Numbers may
/// be decimal or use the `$`, `0x`, `%` and `0b` prefixes. A zero byte would
/// terminate the line so it is treated like an unknown mnemonic, which
/// inserts a `?`.
pub fn control(body: &str) -> Option<(usize, u8)> {
    if body.is_empty() {
        return None;
    }
    let (repeat, name) = split_repeat(body);
    let code = numeric(name)
        .and_then(|n| u8::try_from(n).ok())
        .filter(|n| *n != 0)
        .or_else(|| mnemonic(name))
        .unwrap_or(b'?');
    Some((repeat, code))
}

fn split_repeat(body: &str) -> (usize, &str) {
    let digits = body.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || digits == body.len() {
        return (1, body);
    }
    let rest = &body[digits..];
    if !rest.starts_with(char::is_whitespace) {
        return (1, body);
    }
    let name = rest.trim_start();
    if name.is_empty() {
        return (1, body);
    }
    match body[..digits].parse::<usize>() {
        Ok(repeat) => (repeat, name),
        Err(_) => (1, body),
    }
}

fn numeric(s: &str) -> Option<u32> {
    if let Some(hex) = s.strip_prefix('$') {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(hex) = s.strip_prefix("0x") {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(bin) = s.strip_prefix('%') {
        u32::from_str_radix(bin, 2).ok()
    } else if let Some(bin) = s.strip_prefix("0b") {
        u32::from_str_radix(bin, 2).ok()
    } else if !s.is_empty() && s.chars().all(|c| c.is_ascii_digit()) {
        s.parse::<u32>().ok()
    } else {
        None
    }
}

/// Look up a named control code such as `clr` or `rvs on`.
pub fn mnemonic(name: &str) -> Option<u8> {
    let name = name.to_lowercase();
    CONTROL
        .iter()
        .find(|(n, _)| *n == name)
        .map(|(_, code)| *code)
        .filter(|code| *code != 0)
}

const CONTROL: &[(&str, u8)] = &[
    ("null", 0),
    ("nul", 0),
    ("space", 32),
    ("return", 13),
    ("shift-return", 141),
    ("shift return", 141),
    ("clr", 147),
    ("clear", 147),
    ("home", 19),
    ("del", 20),
    ("inst", 148),
    ("stop", 3),
    ("run/stop", 3),
    ("esc", 27),
    ("upper", 142),
    ("uppercase", 142),
    ("cset0", 142),
    ("lower", 14),
    ("lowercase", 14),
    ("cset1", 14),
    ("cursor right", 29),
    ("crsr right", 29),
    ("right", 29),
    ("cursor left", 157),
    ("crsr left", 157),
    ("left", 157),
    ("down", 17),
    ("cursor down", 17),
    ("crsr down", 17),
    ("up", 145),
    ("cursor up", 145),
    ("crsr up", 145),
    ("black", 144),
    ("blk", 144),
    ("white", 5),
    ("wht", 5),
    ("red", 28),
    ("cyan", 159),
    ("cyn", 159),
    ("purple", 156),
    ("pur", 156),
    ("green", 30),
    ("grn", 30),
    ("blue", 31),
    ("blu", 31),
    ("yellow", 158),
    ("yel", 158),
    ("orange", 129),
    ("orng", 129),
    ("brown", 149),
    ("pink", 150),
    ("light-red", 150),
    ("gray1", 151),
    ("darkgrey", 151),
    ("grey", 152),
    ("lightgreen", 153),
    ("lgrn", 153),
    ("lightblue", 154),
    ("lblu", 154),
    ("grey3", 155),
    ("lightgrey", 155),
    ("gry3", 155),
    ("dish", 8),
    ("ensh", 9),
    ("rvs on", 18),
    ("rvon", 18),
    ("rvs off", 146),
    ("rvof", 146),
    ("f1", 133),
    ("f3", 134),
    ("f5", 135),
    ("f7", 136),
    ("f2", 137),
    ("f4", 138),
    ("f6", 139),
    ("f8", 140),
    ("ctrl-c", 3),
    ("ctrl-e", 5),
    ("ctrl-h", 8),
    ("ctrl-i", 9),
    ("ctrl-m", 13),
    ("ctrl-n", 14),
    ("ctrl-r", 18),
    ("ctrl-s", 19),
    ("ctrl-t", 20),
    ("ctrl-q", 17),
    ("ctrl-1", 144),
    ("ctrl-2", 5),
    ("ctrl-3", 28),
    ("ctrl-4", 159),
    ("ctrl-5", 156),
    ("ctrl-6", 30),
    ("ctrl-7", 31),
    ("ctrl-8", 158),
    ("ctrl-9", 18),
    ("ctrl-0", 146),
    ("swuc", 142),
    ("ctrl-/", 142),
    ("c=1", 129),
    ("c=2", 149),
    ("c=3", 150),
    ("c=4", 151),
    ("c=5", 152),
    ("c=6", 153),
    ("c=7", 154),
    ("c=8", 155),
];
