use super::Address;
use crate::lang::{Line, LineNumber};
use std::rc::Rc;
use tracing::{trace, warn};

/// ## Program image
///
/// Lines are kept in the order they were compiled. Line numbers do not
/// have to increase; the interpreter follows the links.

#[derive(Debug, Clone)]
pub struct Program {
    load_address: Address,
    lines: Vec<Line>,
}

/// Where one line of source ended up in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugEntry {
    pub start: Address,
    pub end: Address,
    pub number: LineNumber,
    pub index: Option<usize>,
    pub len: usize,
}

impl Program {
    pub fn new(load_address: Address) -> Program {
        Program {
            load_address,
            lines: vec![],
        }
    }

    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    fn emitted(&self) -> impl Iterator<Item = &Line> {
        self.lines
            .iter()
            .filter(|line| !line.is_meta() && !line.is_empty())
    }

    /// Assign memory addresses to every line that produces bytes.
    pub fn resolve(&mut self) {
        trace!("resolve");
        let mut address = self.load_address;
        for line in self.lines.iter_mut() {
            if line.is_meta() {
                continue;
            }
            if line.is_empty() {
                warn!("{}: skipping empty line {}", line.unit(), line.number());
                continue;
            }
            address = line.set_address(address);
            if let Some(problem) = out_of_range(line) {
                warn!("{}: {}", line.unit(), problem);
            }
        }
    }

    /// The `.prg` image: load address, linked lines, end marker.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = vec![];
        out.extend_from_slice(&(self.load_address as u16).to_le_bytes());
        for line in self.emitted() {
            out.extend_from_slice(&(line.next_address() as u16).to_le_bytes());
            out.extend_from_slice(&(line.number() as u16).to_le_bytes());
            out.extend_from_slice(line.bytes());
            out.push(0);
        }
        out.extend_from_slice(&[0, 0]);
        out
    }

    /// Emitted lines grouped by the unit they came from, in program order.
    pub fn debug_table(&self) -> Vec<(Rc<str>, Vec<DebugEntry>)> {
        let mut table: Vec<(Rc<str>, Vec<DebugEntry>)> = vec![];
        for line in self.emitted() {
            let entry = DebugEntry {
                start: line.address(),
                end: line.next_address() - 1,
                number: line.number(),
                index: line.index(),
                len: line.source().chars().count(),
            };
            match table.last_mut() {
                Some((unit, entries)) if **unit == **line.unit() => entries.push(entry),
                _ => table.push((Rc::clone(line.unit()), vec![entry])),
            }
        }
        table
    }

    /// Text form of [`Program::debug_table`].
    pub fn debug_map(&self) -> String {
        let mut s = String::new();
        for (unit, entries) in self.debug_table() {
            s.push_str(&unit);
            s.push('\n');
            for entry in entries {
                let index = entry.index.map_or(-1, |index| index as i64);
                s.push_str(&format!(
                    "{},{},{},{},{}\n",
                    entry.start, entry.end, entry.number, index, entry.len
                ));
            }
        }
        s
    }
}

/// The image stores line numbers and links in 16 bits.
fn out_of_range(line: &Line) -> Option<String> {
    if line.number() > 0xFFFF {
        Some(format!(
            "line number {} written as {}",
            line.number(),
            line.number() & 0xFFFF
        ))
    } else if line.next_address() > 0xFFFF {
        Some(format!(
            "line {} ends at ${:X}, past the end of memory",
            line.number(),
            line.next_address()
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::token::{Token, REM};

    fn line(unit: &Rc<str>, number: LineNumber, body: &[u8]) -> Line {
        let mut line = Line::new(unit, Some(number as usize), "X", number);
        line.push_bytes("", body);
        line
    }

    #[test]
    fn test_image() {
        let unit: Rc<str> = Rc::from("a.bas");
        let mut program = Program::new(0x0801);
        program.push(line(&unit, 10, b"A"));
        program.push(Line::meta(&unit, Some(1), "#include \"b.bas\""));
        program.push(line(&unit, 20, b""));
        let mut rem = Line::new(&unit, None, "", 30);
        rem.push_token(Token::Basic(REM), "REM", 0);
        program.push(rem);
        program.resolve();
        assert_eq!(
            program.to_bytes(),
            [0x01, 0x08, 0x07, 0x08, 10, 0, b'A', 0, 0x0D, 0x08, 30, 0, REM, 0, 0, 0]
        );
        assert_eq!(program.debug_map(), "a.bas\n2049,2054,10,10,1\n2055,2060,30,-1,0\n");
    }

    #[test]
    fn test_out_of_range() {
        let unit: Rc<str> = Rc::from("a.bas");
        let mut wide = line(&unit, 70000, b"A");
        wide.set_address(0x0801);
        assert_eq!(
            out_of_range(&wide).as_deref(),
            Some("line number 70000 written as 4464")
        );
        let mut late = line(&unit, 10, b"ABCDEF");
        late.set_address(0xFFF8);
        assert_eq!(
            out_of_range(&late).as_deref(),
            Some("line 10 ends at $10003, past the end of memory")
        );
        late.set_address(0xFFF0);
        assert_eq!(out_of_range(&late), None);
    }
}
