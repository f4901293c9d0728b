use super::source::{normalize, SourceLoader};
use super::Options;
use crate::error;
use crate::lang::petscii::{self, Case};
use crate::lang::token;
use crate::lang::Error;
use std::path::PathBuf;
use tracing::trace;

type Result<T> = std::result::Result<T, Error>;

/// What was written last, for pretty spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Spacing {
    None,
    Space,
    Special,
    Code,
    Operator,
}

/// ## Listing
///
/// Turn a program image back into source text, one line per program line.
pub fn list(image: &[u8], options: &Options) -> Result<String> {
    if image.len() < 2 {
        return Err(error!(InvalidImage; "MISSING LOAD ADDRESS"));
    }
    let mut lister = Lister {
        image,
        pos: 2,
        pretty: options.pretty,
        case: options.listing_case,
        out: String::new(),
    };
    loop {
        let link = match lister.word() {
            Some(link) => link,
            None => break,
        };
        if link == 0 {
            break;
        }
        let number = match lister.word() {
            Some(number) => number,
            None => return Err(error!(InvalidImage; "TRUNCATED LINE HEADER")),
        };
        lister.out.push_str(&number.to_string());
        if !lister.pretty {
            lister.out.push(' ');
        }
        lister.body()?;
    }
    Ok(lister.out)
}

/// List every image in turn into one text.
pub fn decompile_files<L: SourceLoader>(
    loader: &L,
    inputs: &[PathBuf],
    options: &Options,
) -> Result<String> {
    let mut out = String::new();
    for input in inputs {
        let path = normalize(&loader.current_dir().join(input));
        let name = path.display().to_string();
        trace!("list {}", name);
        let image = match loader.read(&path) {
            Ok(image) => image,
            Err(e) => return Err(error!(UnreadableInput, name; e.to_string())),
        };
        match list(&image, options) {
            Ok(text) => out.push_str(&text),
            Err(e) => return Err(e.in_unit(name)),
        }
    }
    Ok(out)
}

struct Lister<'a> {
    image: &'a [u8],
    pos: usize,
    pretty: bool,
    case: Case,
    out: String,
}

impl<'a> Lister<'a> {
    fn word(&mut self) -> Option<u16> {
        let bytes = self.image.get(self.pos..self.pos + 2)?;
        self.pos += 2;
        Some(u16::from_le_bytes([bytes[0], bytes[1]]))
    }

    fn next(&mut self) -> Result<u8> {
        match self.image.get(self.pos) {
            Some(b) => {
                self.pos += 1;
                Ok(*b)
            }
            None => Err(error!(InvalidImage; "UNTERMINATED LINE")),
        }
    }

    fn peek(&self) -> Option<u8> {
        self.image.get(self.pos).copied()
    }

    fn keyword(&mut self, name: &str, last: Spacing) {
        if self.pretty && last == Spacing::None {
            self.out.push(' ');
        }
        match self.case {
            Case::Lower => self.out.push_str(&name.to_ascii_lowercase()),
            Case::Upper => self.out.push_str(name),
        }
    }

    fn body(&mut self) -> Result<()> {
        let mut last = Spacing::None;
        let mut go = false;
        loop {
            let b = self.next()?;
            let after_go = std::mem::replace(&mut go, false);
            last = match b {
                0 => {
                    self.out.push('\n');
                    return Ok(());
                }
                b if b >= 0x80 && token::is_operator(b) => {
                    self.out.push_str(token::basic_name(b).unwrap_or("?"));
                    Spacing::Operator
                }
                b if b >= 0x80 => {
                    let name = match token::basic_name(b) {
                        Some(name) => name,
                        None => return Err(error!(InvalidImage; format!("UNKNOWN TOKEN ${:02X}", b))),
                    };
                    // GO TO must not read back as GOTO
                    if b == token::TO && after_go {
                        self.out.push(' ');
                    }
                    go = b == token::GO;
                    self.keyword(name, last);
                    if b == token::REM {
                        while let Some(c) = self.peek().filter(|c| *c != 0) {
                            self.pos += 1;
                            self.out.push(petscii::decode(c, self.case));
                        }
                    }
                    Spacing::Special
                }
                token::ESCAPE => {
                    let code = match self.peek() {
                        Some(code) if code != 0 => token::unmap(code),
                        _ => return Err(error!(InvalidImage; "TRUNCATED TSB TOKEN")),
                    };
                    self.pos += 1;
                    let name = match token::extension_name(code as u16) {
                        Some(name) => name,
                        None => {
                            return Err(error!(InvalidImage; format!("UNKNOWN TSB TOKEN ${:02X}", code)))
                        }
                    };
                    self.keyword(name, last);
                    if code as u16 == token::AT {
                        self.out.push('(');
                        Spacing::Operator
                    } else {
                        Spacing::Special
                    }
                }
                b'"' => {
                    if self.pretty && last != Spacing::Space && last != Spacing::Operator {
                        self.out.push(' ');
                    }
                    self.out.push('"');
                    while let Some(c) = self.peek().filter(|c| *c != 0) {
                        self.pos += 1;
                        if c == b'"' {
                            self.out.push('"');
                            break;
                        }
                        self.out.push(petscii::decode(c, self.case));
                    }
                    Spacing::Special
                }
                b'(' | b')' => {
                    self.out.push(b as char);
                    Spacing::Operator
                }
                b':' => {
                    if self.pretty && last != Spacing::Space {
                        self.out.push(' ');
                    }
                    self.out.push(':');
                    Spacing::None
                }
                b' ' => {
                    if self.pretty && last == Spacing::Space {
                        continue;
                    }
                    self.out.push(' ');
                    Spacing::Space
                }
                b'=' | b'+' | b'-' => {
                    self.out.push(b as char);
                    Spacing::Code
                }
                b => {
                    if self.pretty && last == Spacing::None {
                        self.out.push(' ');
                    }
                    self.out.push(petscii::decode(b, self.case));
                    Spacing::Code
                }
            };
        }
    }
}
