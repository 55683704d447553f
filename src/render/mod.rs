//! Output rendering for the ingestion artifact

pub mod artifact;

pub use artifact::{write_banner, write_file_block, write_footer};
