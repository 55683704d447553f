//! Error taxonomy for an ingestion run.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Directory '{}' does not exist.", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("'{}' is not a directory.", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Invalid config file {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Error checking file type for {}: {reason}", path.display())]
    Classification { path: PathBuf, reason: String },

    #[error("Error reading {}: {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed writing output file {}: {source}", path.display())]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
