use super::line::Line;
use super::petscii::{self, Case};
use super::token::{self, Catalog, Match, Token};
use super::{Error, LineNumber};
use crate::mach::{Link, Options};
use std::rc::Rc;

type Result<T> = std::result::Result<T, Error>;

/// How a source line introduces itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Header {
    /// Explicit line number and the offset of the statement text.
    Number(LineNumber, usize),
    /// Label declaration followed by a statement.
    Label(String, usize),
    /// Label declaration with nothing after the colon.
    LabelOnly(String),
    /// No number, the line follows the previous one.
    Auto,
}

impl Header {
    pub fn offset(&self) -> usize {
        match self {
            Header::Number(_, offset) | Header::Label(_, offset) => *offset,
            Header::LabelOnly(_) | Header::Auto => 0,
        }
    }
}

fn is_label_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_label_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

pub fn header(text: &[char], catalog: &Catalog) -> Header {
    let digits = text.iter().take_while(|c| c.is_ascii_digit()).count();
    if digits > 0 {
        let number = text[..digits].iter().fold(0 as LineNumber, |n, c| {
            n.saturating_mul(10)
                .saturating_add(c.to_digit(10).unwrap_or(0) as LineNumber)
        });
        return Header::Number(number, digits);
    }
    if !text.first().copied().map_or(false, is_label_start) {
        return Header::Auto;
    }
    let len = text.iter().take_while(|c| is_label_char(**c)).count();
    if len < 2 || text.get(len) != Some(&':') {
        return Header::Auto;
    }
    let name: String = text[..len].iter().collect();
    if catalog.exact(&name).is_some() {
        return Header::Auto;
    }
    let name = name.to_ascii_lowercase();
    if len + 1 == text.len() {
        Header::LabelOnly(name)
    } else {
        Header::Label(name, len + 1)
    }
}

/// Keyword whose operand may be a branch target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Jump {
    None,
    Goto,
    Gosub,
    Go,
    Then,
    To,
}

impl Jump {
    fn from_token(token: Token) -> Jump {
        match token {
            Token::Basic(token::GOTO) => Jump::Goto,
            Token::Basic(token::GOSUB) => Jump::Gosub,
            Token::Basic(token::GO) => Jump::Go,
            Token::Basic(token::THEN) => Jump::Then,
            _ => Jump::None,
        }
    }

    fn is_pending(self) -> bool {
        self != Jump::None
    }
}

/// ## Line encoder
///
/// Turns the statement text of one source line into a tokenized [`Line`].
/// Labels used as branch targets are looked up in the [`Link`] and written
/// as decimal digits.

pub struct Encoder<'a> {
    catalog: &'a Catalog,
    link: &'a Link,
    options: &'a Options,
}

struct State {
    pos: usize,
    command: Option<Token>,
    jump: Jump,
}

impl<'a> Encoder<'a> {
    pub fn new(catalog: &'a Catalog, link: &'a Link, options: &'a Options) -> Encoder<'a> {
        Encoder {
            catalog,
            link,
            options,
        }
    }

    fn case(&self) -> Case {
        self.options.case
    }

    pub fn encode(
        &self,
        unit: &Rc<str>,
        index: Option<usize>,
        text: &[char],
        number: LineNumber,
        offset: usize,
    ) -> Result<Line> {
        let source: String = text.iter().collect();
        let mut line = Line::new(unit, index, &source, number);
        let mut state = State {
            pos: offset,
            command: None,
            jump: Jump::None,
        };
        while let Some(&c) = text.get(state.pos) {
            match c {
                ' ' => {
                    state.pos += 1;
                    if self.keep_space(&line, text, &state) {
                        line.push_char(' ', b' ');
                    }
                }
                '\t' => state.pos += 1,
                ':' => {
                    state.pos += 1;
                    state.command = None;
                    state.jump = Jump::None;
                    let redundant = line.is_empty() || line.last_byte() == Some(b':');
                    if !(self.options.crunch && redundant) {
                        line.push_char(':', b':');
                    }
                }
                '+' | '-' if state.command == Some(Token::Basic(token::DATA)) => {
                    state.pos += 1;
                    line.push_char(c, c as u8);
                }
                '"' | '\'' => {
                    state.jump = Jump::None;
                    self.string(&mut line, text, &mut state);
                }
                c if c as u32 > 0xFF => {
                    state.pos += 1;
                    state.jump = Jump::None;
                    line.push_char(c, petscii::encode(c, self.case(), false));
                }
                c if state.jump.is_pending() && is_label_start(c) => {
                    self.target(&mut line, text, &mut state)?;
                }
                c if state.jump.is_pending() && c.is_ascii_digit() => {
                    self.line_number(&mut line, text, &mut state);
                }
                c => match self.catalog.peek(text, state.pos) {
                    Some(m) => {
                        if self.keyword(&mut line, text, &mut state, m) {
                            break;
                        }
                    }
                    None => {
                        state.pos += 1;
                        if c != ',' && !c.is_ascii_digit() {
                            state.jump = Jump::None;
                        }
                        self.code_char(&mut line, c);
                    }
                },
            }
        }
        line.strip_separators();
        if self.options.crunch && line.is_empty() {
            line.push_token(Token::Basic(token::REM), "REM", self.options.verbosity);
        }
        Ok(line)
    }

    fn code_char(&self, line: &mut Line, c: char) {
        line.push_char(self.case().apply(c), petscii::encode(c, Case::Upper, false));
    }

    fn keep_space(&self, line: &Line, text: &[char], state: &State) -> bool {
        if self.options.crunch || line.is_empty() || line.last_byte() == Some(b' ') {
            return false;
        }
        let next = text[state.pos..].iter().find(|c| **c != ' ').copied();
        match (state.jump, next) {
            (Jump::None, _) | (_, None) => true,
            (_, Some(c)) if c.is_ascii_digit() => false,
            (Jump::Then, _) => true,
            (_, Some(c)) => !is_label_start(c),
        }
    }

    /// Emit a keyword. Returns true when the rest of the line was consumed.
    fn keyword(&self, line: &mut Line, text: &[char], state: &mut State, m: Match) -> bool {
        state.pos += m.len;
        let rem = m.token == Token::Basic(token::REM);
        if rem && self.options.crunch {
            return true;
        }
        if state.command.is_none() {
            state.command = Some(m.token);
        }
        state.jump = Jump::from_token(m.token);
        if state.jump == Jump::Go {
            line.set_mark();
        }
        line.push_token(m.token, m.name, self.options.verbosity);
        if rem {
            for &c in text[state.pos..].iter().filter(|c| **c != '\t') {
                line.push_char(c, petscii::encode(c, self.case(), false));
            }
        }
        rem
    }

    fn string(&self, line: &mut Line, text: &[char], state: &mut State) {
        let quote = text[state.pos];
        let raw = quote == '\'';
        state.pos += 1;
        line.push_char('"', b'"');
        while let Some(&c) = text.get(state.pos) {
            state.pos += 1;
            if c == quote {
                line.push_char('"', b'"');
                return;
            }
            if c == '{' {
                if let Some(close) = text[state.pos..].iter().position(|c| *c == '}') {
                    let body: String = text[state.pos..state.pos + close].iter().collect();
                    if let Some((repeat, byte)) = petscii::control(&body) {
                        line.push_bytes(&format!("{{{}}}", body), &vec![byte; repeat]);
                        state.pos += close + 1;
                        continue;
                    }
                }
            }
            line.push_char(c, petscii::encode(c, self.case(), raw));
        }
    }

    fn line_number(&self, line: &mut Line, text: &[char], state: &mut State) {
        let digits = text[state.pos..]
            .iter()
            .take_while(|c| c.is_ascii_digit())
            .count();
        let number = text[state.pos..state.pos + digits]
            .iter()
            .fold(0 as LineNumber, |n, c| {
                n.saturating_mul(10)
                    .saturating_add(c.to_digit(10).unwrap_or(0) as LineNumber)
            });
        state.pos += digits;
        let target = self.link.jump_target(number).to_string();
        line.push_bytes(&target, target.as_bytes());
    }

    fn target(&self, line: &mut Line, text: &[char], state: &mut State) -> Result<()> {
        let before = state.pos;
        let mut word = String::new();
        while let Some(&c) = text.get(state.pos) {
            if !is_label_char(c) {
                break;
            }
            if c.is_ascii_digit() {
                let lower = word.to_ascii_lowercase();
                let glued = match state.jump {
                    Jump::Then => matches!(lower.as_str(), "goto" | "gosub" | "go"),
                    Jump::Go => lower == "to",
                    _ => false,
                };
                if glued {
                    break;
                }
            }
            word.push(c);
            state.pos += 1;
        }
        let mut lookahead = state.pos;
        while text.get(lookahead) == Some(&' ') {
            lookahead += 1;
        }
        let (plain, rescan) = match text.get(lookahead) {
            Some('=') | Some('$') | Some('%') | Some('(') | Some('[') | Some('{') => (true, false),
            Some('#') => (false, true),
            _ => (false, false),
        };
        let lower = word.to_ascii_lowercase();
        let verbosity = self.options.verbosity;
        match (state.jump, lower.as_str()) {
            (Jump::Go, "sub") => {
                line.truncate_to_mark();
                line.push_token(Token::Basic(token::GOSUB), "GOSUB", verbosity);
                state.jump = Jump::Gosub;
            }
            (Jump::Go, "to") => {
                line.push_token(Token::Basic(token::TO), "TO", verbosity);
                state.jump = Jump::To;
            }
            (Jump::Then, "goto") => {
                line.push_token(Token::Basic(token::GOTO), "GOTO", verbosity);
                state.jump = Jump::Goto;
            }
            (Jump::Then, "go") => {
                line.set_mark();
                line.push_token(Token::Basic(token::GO), "GO", verbosity);
                state.jump = Jump::Go;
            }
            (Jump::Then, "gosub") => {
                line.push_token(Token::Basic(token::GOSUB), "GOSUB", verbosity);
                state.jump = Jump::Gosub;
            }
            _ => {
                if rescan || (state.jump == Jump::Then && self.catalog.exact(&word).is_some()) {
                    state.jump = Jump::None;
                    state.pos = before;
                } else if plain {
                    state.jump = Jump::None;
                    for c in word.chars() {
                        self.code_char(line, c);
                    }
                } else if let Some(number) = self.link.label(&lower) {
                    let digits = number.to_string();
                    line.push_bytes(&digits, digits.as_bytes());
                } else if state.jump == Jump::Then {
                    state.jump = Jump::None;
                    state.pos = before;
                } else {
                    let error = error!(UndefinedLabel, line.unit().to_string());
                    let error = match line.index() {
                        Some(index) => error.in_line(index).in_column(before),
                        None => error,
                    };
                    return Err(error.message(format!("'{}'", word)));
                }
            }
        }
        Ok(())
    }
}
