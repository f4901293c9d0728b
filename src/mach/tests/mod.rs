use super::*;
use crate::lang::{Case, ErrorCode};
use std::path::PathBuf;

mod compile_test;
mod include_test;

fn inputs(names: &[&str]) -> Vec<PathBuf> {
    names.iter().map(PathBuf::from).collect()
}

fn build(loader: &MemoryLoader, names: &[&str], options: &Options) -> Program {
    compile(loader, &inputs(names), options).unwrap()
}

/// Number and body of every line that made it into the image.
fn numbered(program: &Program) -> Vec<(u32, Vec<u8>)> {
    program
        .lines()
        .iter()
        .filter(|line| !line.is_meta() && !line.is_empty())
        .map(|line| (line.number(), line.bytes().to_vec()))
        .collect()
}
