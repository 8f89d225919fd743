//! Error types for url-census

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CensusError {
    #[error("Failed to read {}", .path.display())]
    ReadInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse results document {}: {message}", .path.display())]
    ParseResults { path: PathBuf, message: String },

    #[error("Failed to create output directory {}", .path.display())]
    CreateOutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write {}", .path.display())]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, CensusError>;
