/*!
## Rust Machine Module

This Rust module compiles whole BASIC programs into loadable images
and lists images back as text.

*/

pub type Address = usize;

mod compile;
mod link;
mod listing;
mod options;
mod program;
mod source;

pub use compile::compile;
pub use link::Link;
pub use listing::decompile_files;
pub use listing::list;
pub use options::Options;
pub use options::BASIC_START;
pub use program::DebugEntry;
pub use program::Program;
pub use source::normalize;
pub use source::resolve_include;
pub use source::FileSystem;
pub use source::MemoryLoader;
pub use source::SourceLoader;
pub use source::SourceUnit;

#[cfg(test)]
mod tests;
