use super::source::{normalize, resolve_include, SourceLoader, SourceUnit};
use super::{Link, Options, Program};
use crate::error;
use crate::lang::lex::{self, Encoder};
use crate::lang::token::{Catalog, Token, REM};
use crate::lang::{Case, Error, Line};
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info, trace};

type Result<T> = std::result::Result<T, Error>;

/// ## Compiler
///
/// Compile the input files, in order, into one program. The first pass
/// finds every label so lines may branch forward. The second pass encodes.
/// Each pass reads the files again.
pub fn compile<L: SourceLoader>(
    loader: &L,
    inputs: &[PathBuf],
    options: &Options,
) -> Result<Program> {
    let mut session = Session::new(loader, options);
    trace!("pass 1");
    for input in inputs {
        session.discover(input)?;
    }
    session.link.finish_discovery();
    trace!("pass 2");
    session.link.rewind();
    session.options.case = options.case;
    let mut last_unit = None;
    for input in inputs {
        last_unit = Some(session.emit(input)?);
    }
    if let (Some(number), Some(unit)) = (session.link.dangling(), last_unit) {
        let mut line = Line::new(&unit, None, "", number);
        line.push_token(Token::Basic(REM), "REM", session.options.verbosity);
        debug!("{}", line);
        session.program.push(line);
    }
    session.program.resolve();
    Ok(session.program)
}

enum Directive {
    Include(String),
    Case(Case),
    Other,
}

fn directive(text: &str) -> Option<Directive> {
    let rest = text.strip_prefix('#').or_else(|| text.strip_prefix(';'))?;
    let rest = rest.trim_start_matches(|c: char| c <= ' ');
    let len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .unwrap_or(rest.len());
    let word = rest[..len].to_ascii_lowercase();
    let argument = rest[len..].trim();
    Some(match word.as_str() {
        "include" => Directive::Include(unquote(argument).to_string()),
        "upper" | "uppercase" | "cset0" => Directive::Case(Case::Upper),
        "lower" | "lowercase" | "cset1" => Directive::Case(Case::Lower),
        _ => Directive::Other,
    })
}

fn unquote(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote) {
            return inner.strip_suffix(quote).unwrap_or(inner);
        }
    }
    s
}

struct Session<'a, L: SourceLoader> {
    loader: &'a L,
    options: Options,
    catalog: Catalog,
    link: Link,
    program: Program,
    includes: Vec<PathBuf>,
}

impl<'a, L: SourceLoader> Session<'a, L> {
    fn new(loader: &'a L, options: &Options) -> Session<'a, L> {
        Session {
            loader,
            options: options.clone(),
            catalog: Catalog::new(options.extensions),
            link: Link::new(options.crunch),
            program: Program::new(options.load_address),
            includes: vec![],
        }
    }

    fn include(&self, unit: &SourceUnit, index: usize, name: &str) -> Result<PathBuf> {
        let path =
            match resolve_include(self.loader, name, unit.dir(), &self.options.include_path) {
                Some(path) => normalize(&self.loader.current_dir().join(path)),
                None => {
                    return Err(error!(IncludeNotFound, unit.name().to_string(), index;
                        format!("'{}'", name)))
                }
            };
        if self.includes.contains(&path) {
            return Err(error!(RecursiveInclude, unit.name().to_string(), index;
                format!("'{}'", name)));
        }
        Ok(path)
    }

    fn discover(&mut self, path: &Path) -> Result<()> {
        let unit = SourceUnit::load(self.loader, path)?;
        self.includes.push(unit.path().to_path_buf());
        for (index, text) in unit.lines() {
            match directive(text) {
                Some(Directive::Include(name)) => {
                    let path = self.include(&unit, index, &name)?;
                    self.discover(&path)?;
                }
                Some(Directive::Case(case)) => self.options.case = case,
                Some(Directive::Other) => {}
                None => {
                    let chars: Vec<char> = text.chars().collect();
                    let header = lex::header(&chars, &self.catalog);
                    if self.link.discover(&header).is_none() && self.options.verbosity > 0 {
                        info!("{}({}): label {}", unit.name(), index + 1, text);
                    }
                }
            }
        }
        self.includes.pop();
        Ok(())
    }

    /// Returns the unit name so a trailing line can be attributed to it.
    fn emit(&mut self, path: &Path) -> Result<Rc<str>> {
        let unit = SourceUnit::load(self.loader, path)?;
        self.includes.push(unit.path().to_path_buf());
        for (index, text) in unit.lines() {
            match directive(text) {
                Some(Directive::Include(name)) => {
                    let path = self.include(&unit, index, &name)?;
                    let marker = format!("#include \"{}\"", path.display());
                    debug!("{}", marker);
                    self.program
                        .push(Line::meta(unit.name(), Some(index), &marker));
                    self.emit(&path)?;
                }
                Some(Directive::Case(case)) => self.options.case = case,
                Some(Directive::Other) => {}
                None => {
                    let chars: Vec<char> = text.chars().collect();
                    let header = lex::header(&chars, &self.catalog);
                    let number = match self.link.assign(&header) {
                        Some(number) => number,
                        None => continue,
                    };
                    let line = Encoder::new(&self.catalog, &self.link, &self.options).encode(
                        unit.name(),
                        Some(index),
                        &chars,
                        number,
                        header.offset(),
                    )?;
                    debug!("{}", line);
                    self.program.push(line);
                }
            }
        }
        self.includes.pop();
        Ok(Rc::clone(unit.name()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive() {
        assert!(matches!(directive("#upper"), Some(Directive::Case(Case::Upper))));
        assert!(matches!(directive("# CSET1"), Some(Directive::Case(Case::Lower))));
        assert!(matches!(directive("; just a comment"), Some(Directive::Other)));
        assert!(directive("10 PRINT").is_none());
        match directive("#include 'lib/x.bas'") {
            Some(Directive::Include(name)) => assert_eq!(name, "lib/x.bas"),
            _ => panic!(),
        }
        match directive("#include util.bas") {
            Some(Directive::Include(name)) => assert_eq!(name, "util.bas"),
            _ => panic!(),
        }
    }
}
