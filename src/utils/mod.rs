//! Utility functions for classification, decoding, and paths

pub mod classify;
pub mod encoding;
pub mod paths;

pub use classify::is_text_file;
pub use encoding::read_text_lossy;
pub use paths::header_path;
