//! Error types for report generation.

use std::path::{Path, PathBuf};

use thiserror::Error;

use datacap_core::DatacapError;
use datacap_ext_file::SourceError;

/// A specialized Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Errors raised while building or writing a report.
#[derive(Error, Debug)]
pub enum ReportError {
    /// Writing an output file failed.
    #[error("Failed to write {path}: {source}")]
    Io {
        /// The file or directory.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Chart data could not be encoded.
    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configuration file was unreadable or invalid.
    #[error("Invalid configuration {path}: {message}")]
    Config {
        /// The file.
        path: PathBuf,
        /// What went wrong.
        message: String,
    },

    /// Loading source data failed.
    #[error(transparent)]
    Source(#[from] SourceError),

    /// Input data violated a contract.
    #[error(transparent)]
    Datacap(#[from] DatacapError),
}

impl ReportError {
    /// Create an IO error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(path: &Path, message: impl Into<String>) -> Self {
        Self::Config {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}
