//! # bc
//!
//! Compile Commodore 64 BASIC source into `.prg` files and back.

use std::process::ExitCode;

fn main() -> ExitCode {
    basic::term::main()
}
