use super::Address;
use crate::lang::Case;
use std::path::PathBuf;

/// Default load address of a BASIC program on the C64.
pub const BASIC_START: Address = 0x0801;

/// ## Compiler options
///
/// Only `case` changes during a run, and only through the `#upper` and
/// `#lower` directives.

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub load_address: Address,
    /// Enable the TSB keywords.
    pub extensions: bool,
    pub case: Case,
    /// Drop spaces, separators and comments and renumber from 1.
    pub crunch: bool,
    /// Spacing for listings.
    pub pretty: bool,
    pub listing_case: Case,
    pub include_path: Vec<PathBuf>,
    pub verbosity: u8,
}

impl Default for Options {
    fn default() -> Options {
        Options {
            load_address: BASIC_START,
            extensions: false,
            case: Case::Upper,
            crunch: false,
            pretty: false,
            listing_case: Case::Lower,
            include_path: vec![],
            verbosity: 0,
        }
    }
}
