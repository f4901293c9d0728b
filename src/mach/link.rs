use crate::lang::lex::Header;
use crate::lang::LineNumber;
use std::collections::HashMap;

/// ## Line numbers and labels
///
/// Both compiler passes walk the same lines through a `Link`. The first
/// pass binds labels and, when crunching, the renumbering. The second pass
/// only reads them back. The cursor is rewound before each pass so both
/// passes number unlabeled lines the same way.

#[derive(Debug, Default)]
pub struct Link {
    crunch: bool,
    labels: HashMap<String, LineNumber>,
    renumber: HashMap<LineNumber, LineNumber>,
    pending: Vec<String>,
    last: LineNumber,
    max: LineNumber,
    dangling: Option<LineNumber>,
}

impl Link {
    pub fn new(crunch: bool) -> Link {
        Link {
            crunch,
            ..Link::default()
        }
    }

    pub fn rewind(&mut self) {
        self.last = 0;
    }

    fn next(&self) -> LineNumber {
        self.last.saturating_add(1)
    }

    /// First pass. Returns the number of the line, or `None` for a line
    /// that only declares a label.
    pub fn discover(&mut self, header: &Header) -> Option<LineNumber> {
        let number = match header {
            Header::Number(number, _) if self.crunch => {
                let mapped = self.next();
                self.renumber.entry(*number).or_insert(mapped);
                mapped
            }
            Header::Number(number, _) => *number,
            Header::Label(name, _) => {
                self.pending.push(name.clone());
                self.next()
            }
            Header::LabelOnly(name) => {
                self.pending.push(name.clone());
                return None;
            }
            Header::Auto => self.next(),
        };
        for name in self.pending.drain(..) {
            self.labels.insert(name, number);
        }
        self.last = number;
        self.max = self.max.max(number);
        Some(number)
    }

    /// Labels still waiting for a line at the end of the first pass belong
    /// to a line after everything else.
    pub fn finish_discovery(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let number = self.max.saturating_add(1);
        for name in self.pending.drain(..) {
            self.labels.insert(name, number);
        }
        self.dangling = Some(number);
    }

    /// Second pass.
    pub fn assign(&mut self, header: &Header) -> Option<LineNumber> {
        let number = match header {
            Header::Number(number, _) if !self.crunch => *number,
            Header::Number(..) | Header::Label(..) | Header::Auto => self.next(),
            Header::LabelOnly(_) => return None,
        };
        self.last = number;
        Some(number)
    }

    /// Number of the line needed to hold labels declared last.
    pub fn dangling(&self) -> Option<LineNumber> {
        self.dangling
    }

    pub fn label(&self, name: &str) -> Option<LineNumber> {
        self.labels.get(name).copied()
    }

    /// A numeric branch target after renumbering.
    pub fn jump_target(&self, number: LineNumber) -> LineNumber {
        self.renumber.get(&number).copied().unwrap_or(number)
    }
}
