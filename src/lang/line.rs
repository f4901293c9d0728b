use super::token::Token;
use super::LineNumber;
use crate::mach::Address;
use std::rc::Rc;

/// ## Encoded line
///
/// One tokenized BASIC statement line. The body holds everything between
/// the line number and the zero terminator. The trace is a readable
/// rendering of the body built up alongside it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    number: LineNumber,
    bytes: Vec<u8>,
    address: Address,
    next_address: Address,
    meta: bool,
    unit: Rc<str>,
    source: String,
    index: Option<usize>,
    trace: String,
    mark: Option<(usize, usize)>,
}

impl Line {
    pub fn new(unit: &Rc<str>, index: Option<usize>, source: &str, number: LineNumber) -> Line {
        Line {
            number,
            bytes: vec![],
            address: 0,
            next_address: 0,
            meta: false,
            unit: Rc::clone(unit),
            source: source.to_string(),
            index,
            trace: String::new(),
            mark: None,
        }
    }

    /// A marker that documents where it came from but holds no program.
    pub fn meta(unit: &Rc<str>, index: Option<usize>, text: &str) -> Line {
        let mut line = Line::new(unit, index, text, 0);
        line.meta = true;
        line.trace.push_str(text);
        line
    }

    pub fn number(&self) -> LineNumber {
        self.number
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn address(&self) -> Address {
        self.address
    }

    pub fn next_address(&self) -> Address {
        self.next_address
    }

    pub fn is_meta(&self) -> bool {
        self.meta
    }

    pub fn unit(&self) -> &Rc<str> {
        &self.unit
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn trace(&self) -> &str {
        &self.trace
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Bytes occupied in memory: link, number, body and terminator.
    pub fn total_size(&self) -> usize {
        self.bytes.len() + 5
    }

    pub fn last_byte(&self) -> Option<u8> {
        self.bytes.last().copied()
    }

    pub fn push_char(&mut self, shown: char, byte: u8) {
        self.trace.push(shown);
        self.bytes.push(byte);
    }

    pub fn push_bytes(&mut self, shown: &str, bytes: &[u8]) {
        self.trace.push_str(shown);
        self.bytes.extend_from_slice(bytes);
    }

    pub fn push_token(&mut self, token: Token, name: &str, verbosity: u8) {
        if verbosity >= 2 {
            self.trace.push_str(&format!("{{${:02x}:{}}}", token.id(), name));
        } else {
            self.trace.push_str(name);
        }
        token.encode(&mut self.bytes);
    }

    /// Remember the current end so a compound keyword can replace
    /// what follows.
    pub fn set_mark(&mut self) {
        self.mark = Some((self.bytes.len(), self.trace.len()));
    }

    pub fn truncate_to_mark(&mut self) {
        if let Some((bytes, trace)) = self.mark.take() {
            self.bytes.truncate(bytes);
            self.trace.truncate(trace);
        }
    }

    pub fn strip_separators(&mut self) {
        while self.bytes.last() == Some(&b':') {
            self.bytes.pop();
            if self.trace.ends_with(':') {
                self.trace.pop();
            }
        }
    }

    /// Place the line at `address` and return where the next line starts.
    pub fn set_address(&mut self, address: Address) -> Address {
        self.address = address;
        self.next_address = address + self.total_size();
        self.next_address
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        if self.meta {
            write!(f, "{}", self.trace)
        } else {
            write!(f, "{} {}", self.number, self.trace)
        }
    }
}
