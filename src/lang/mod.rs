/*!
## Rust Language Module

This Rust module turns single lines of BASIC source text into tokenized
lines and holds the keyword and character tables shared with the listing.

*/

#[macro_use]
mod error;
pub mod lex;
mod line;
pub mod petscii;
pub mod token;

pub use error::Error;
pub use error::ErrorCode;
pub use line::Line;
pub use petscii::Case;

pub type LineNumber = u32;

#[cfg(test)]
mod tests;
