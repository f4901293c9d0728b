//! # BASIC for the Commodore 64
//!
//! Compile BASIC V2 source text, with optional TSB extensions, into the
//! tokenized `.prg` format the C64 loads, and list `.prg` files as text.
//!
//! ```
//! use basic::mach::{compile, MemoryLoader, Options};
//! use std::path::PathBuf;
//!
//! let loader = MemoryLoader::new().with("hello.bas", "10 PRINT \"HI\"\n20 GOTO 10\n");
//! let program = compile(&loader, &[PathBuf::from("hello.bas")], &Options::default()).unwrap();
//! let image = program.to_bytes();
//! assert_eq!(&image[..2], [0x01, 0x08]);
//! ```

#[path = "doc/introduction.rs"]
#[allow(non_snake_case)]
pub mod _Introduction;

#[path = "doc/chapter_1.rs"]
#[allow(non_snake_case)]
pub mod __Chapter_1;

pub mod lang;
pub mod mach;
pub mod term;
