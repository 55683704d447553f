//! Directory traversal and skip filtering

pub mod skip;
pub mod walker;

pub use skip::SkipPatterns;
pub use walker::{Discovered, FileEntry, Walk};
