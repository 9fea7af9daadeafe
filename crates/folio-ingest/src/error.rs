//! Error types for the import pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for import operations.
pub type IngestResult<T> = Result<T, IngestError>;

/// Errors that can end an import.
///
/// Problems with individual files never surface here; they are logged and
/// the file is skipped.
#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config error: {0}")]
    Config(#[from] folio_config::ConfigError),

    #[error("No files selected")]
    NoFiles,

    #[error("File not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("Total size limit of {limit_mb} MB exceeded")]
    SizeLimitExceeded {
        limit_mb: f64,
        /// Accepted bytes including the file that crossed the limit.
        attempted: u64,
    },
}

impl IngestError {
    /// Whether this is the run-level size budget failure.
    pub fn is_size_limit(&self) -> bool {
        matches!(self, IngestError::SizeLimitExceeded { .. })
    }
}
