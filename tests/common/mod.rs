#![allow(dead_code)]
use basic::lang::Error;
use basic::mach::{compile, list, MemoryLoader, Options};
use std::path::PathBuf;

pub fn compile_str(source: &str, options: &Options) -> Result<Vec<u8>, Error> {
    let loader = MemoryLoader::new().with("main.bas", source);
    let program = compile(&loader, &[PathBuf::from("main.bas")], options)?;
    Ok(program.to_bytes())
}

pub fn image(source: &str) -> Vec<u8> {
    compile_str(source, &Options::default()).unwrap()
}

pub fn listing(image: &[u8]) -> String {
    list(image, &Options::default()).unwrap()
}

/// Compile, list and compile again.
pub fn round_trip(source: &str) -> (Vec<u8>, Vec<u8>) {
    let first = image(source);
    let second = image(&listing(&first));
    (first, second)
}
