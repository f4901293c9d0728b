use crate::error;
use crate::lang::{Case, Error};
use crate::mach::{compile, decompile_files, Address, FileSystem, Options, BASIC_START};
use ansi_term::Style;
use clap::{ArgAction, Parser};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{trace, Level};

type Result<T> = std::result::Result<T, Error>;

#[derive(Parser, Debug)]
#[command(name = "bc", version, about = "Commodore 64 BASIC V2 and TSB compiler", long_about = None)]
pub struct Args {
    /// Source files, or program files with --unpack
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Output file (default: first input with .prg, listings go to stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Write a debug map of addresses to source lines
    #[arg(short, long)]
    map: Option<PathBuf>,

    /// Search directories for included files (repeatable)
    #[arg(short = 'I', long)]
    include: Vec<PathBuf>,

    /// Enable TSB extension keywords
    #[arg(short, long)]
    tsb: bool,

    /// Remove spaces and comments and renumber lines
    #[arg(short, long)]
    crunch: bool,

    /// Start in the lower case character set
    #[arg(short, long)]
    lower: bool,

    /// List program files as source text
    #[arg(short, long)]
    unpack: bool,

    /// Add spacing to listings
    #[arg(short, long)]
    pretty: bool,

    /// Load address, decimal or hex with `$` or `0x`
    #[arg(short, long, value_parser = parse_address, default_value_t = BASIC_START)]
    address: Address,

    /// More output (repeatable)
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,

    /// One of `TRACE`, `DEBUG`, `INFO`, `WARN`, or `ERROR`
    #[arg(long)]
    log_level: Option<Level>,
}

fn parse_address(s: &str) -> std::result::Result<Address, String> {
    let parsed = if let Some(hex) = s.strip_prefix('$').or_else(|| s.strip_prefix("0x")) {
        Address::from_str_radix(hex, 16)
    } else {
        s.parse::<Address>()
    };
    match parsed {
        Ok(address) if address <= 0xFFFF => Ok(address),
        Ok(_) => Err("address out of range".to_string()),
        Err(e) => Err(e.to_string()),
    }
}

impl Args {
    fn options(&self) -> Options {
        Options {
            load_address: self.address,
            extensions: self.tsb,
            case: if self.lower { Case::Lower } else { Case::Upper },
            crunch: self.crunch,
            pretty: self.pretty,
            include_path: self.include.clone(),
            verbosity: self.verbose,
            ..Options::default()
        }
    }

    fn level(&self) -> Level {
        match (self.log_level, self.verbose) {
            (Some(level), _) => level,
            (None, 0) => Level::WARN,
            (None, 1) => Level::DEBUG,
            (None, _) => Level::TRACE,
        }
    }
}

pub fn main() -> ExitCode {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.level())
        .with_writer(std::io::stderr)
        .init();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("{}", Style::new().bold().paint(error.to_string()));
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<()> {
    let options = args.options();
    if args.unpack {
        let text = decompile_files(&FileSystem, &args.inputs, &options)?;
        return match &args.output {
            Some(path) => write_file(path, text.as_bytes()),
            None => std::io::stdout()
                .write_all(text.as_bytes())
                .map_err(|e| error!(WriteFailed, "<stdout>"; e.to_string())),
        };
    }
    let program = compile(&FileSystem, &args.inputs, &options)?;
    let output = match &args.output {
        Some(path) => path.clone(),
        None => args.inputs[0].with_extension("prg"),
    };
    trace!("write");
    write_file(&output, &program.to_bytes())?;
    if let Some(map) = &args.map {
        write_file(map, program.debug_map().as_bytes())?;
    }
    Ok(())
}

/// Write the whole file or nothing.
fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    let name = path.display().to_string();
    let failed = |e: std::io::Error| error!(WriteFailed, name.clone(); e.to_string());
    let dir = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(dir) = dir {
        std::fs::create_dir_all(dir).map_err(failed)?;
    }
    let file_name = match path.file_name() {
        Some(file_name) => file_name.to_string_lossy(),
        None => return Err(error!(WriteFailed, name.clone(); "NOT A FILE NAME")),
    };
    let partial = path.with_file_name(format!(".{}.part", file_name));
    let mut file = std::fs::File::create(&partial).map_err(failed)?;
    if let Err(e) = file.write_all(bytes).and_then(|_| file.sync_all()) {
        let _ = std::fs::remove_file(&partial);
        return Err(failed(e));
    }
    drop(file);
    std::fs::rename(&partial, path).map_err(failed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lang::ErrorCode;

    fn args(argv: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("bc").chain(argv.iter().copied())).unwrap()
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(parse_address("$c000"), Ok(0xC000));
        assert_eq!(parse_address("0x1001"), Ok(0x1001));
        assert_eq!(parse_address("4097"), Ok(4097));
        assert!(parse_address("$10000").is_err());
        assert!(parse_address("x").is_err());
    }

    #[test]
    fn test_flags() {
        let a = args(&["-t", "-c", "-l", "-vv", "-a", "$1c01", "-I", "lib", "a.bas"]);
        let options = a.options();
        assert!(options.extensions && options.crunch);
        assert_eq!(options.case, Case::Lower);
        assert_eq!(options.load_address, 0x1C01);
        assert_eq!(options.verbosity, 2);
        assert_eq!(options.include_path, [PathBuf::from("lib")]);
        assert_eq!(a.level(), Level::TRACE);
        assert_eq!(args(&["a.bas"]).options(), Options::default());
        assert!(Args::try_parse_from(["bc"]).is_err());
    }

    #[test]
    fn test_compile_and_unpack_files() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("hello.bas");
        std::fs::write(&source, "10 print \"hi\"\n20 goto 10\n").unwrap();
        let prg = dir.path().join("out/hello.prg");
        let map = dir.path().join("out/hello.map");
        let source_arg = source.to_string_lossy().to_string();
        let prg_arg = prg.to_string_lossy().to_string();
        let map_arg = map.to_string_lossy().to_string();
        run(&args(&["-o", &prg_arg, "-m", &map_arg, &source_arg])).unwrap();
        let image = std::fs::read(&prg).unwrap();
        assert_eq!(&image[..2], [0x01, 0x08]);
        assert!(std::fs::read_to_string(&map).unwrap().contains(",10,0,"));

        let listing = dir.path().join("hello.txt");
        let listing_arg = listing.to_string_lossy().to_string();
        run(&args(&["-u", "-o", &listing_arg, &prg_arg])).unwrap();
        assert_eq!(
            std::fs::read_to_string(&listing).unwrap(),
            "10 print \"hi\"\n20 goto10\n"
        );
    }

    #[test]
    fn test_failed_compile_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("bad.bas");
        std::fs::write(&source, "10 goto nowhere\n").unwrap();
        let source_arg = source.to_string_lossy().to_string();
        let error = run(&args(&[&source_arg])).unwrap_err();
        assert_eq!(error.code(), ErrorCode::UndefinedLabel);
        assert_eq!(error.line(), Some(0));
        assert!(!dir.path().join("bad.prg").exists());
    }
}
