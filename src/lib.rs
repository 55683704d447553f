//! repo-ingest: concatenate a repository's text files into one artifact
//!
//! Walks a directory tree, drops paths matching skip patterns and files that
//! do not look like text, and writes the remaining contents, each under a
//! path header, into a single output file with a summary footer.

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod ingest;
pub mod render;
pub mod scan;
pub mod utils;

pub use domain::{Classification, Config, RunSummary};
pub use error::IngestError;
pub use ingest::Ingester;
