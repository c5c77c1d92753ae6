//! Error types for file-based sources.

use std::path::{Path, PathBuf};

use thiserror::Error;

use datacap_core::DatacapError;

/// A specialized Result type for file sources.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors raised while loading source files.
#[derive(Error, Debug)]
pub enum SourceError {
    /// The file could not be read.
    #[error("Failed to read {path}: {source}")]
    Io {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A CSV file was malformed.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// A JSON file was malformed.
    #[error("JSON error in {path}: {source}")]
    Json {
        /// The file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// A record parsed but violates the data contract.
    #[error("Invalid record {record} in {path}: {source}")]
    InvalidRecord {
        /// The file.
        path: PathBuf,
        /// Which record (row number or client id).
        record: String,
        /// What was wrong with it.
        #[source]
        source: DatacapError,
    },
}

impl SourceError {
    /// Create an IO error.
    pub fn io(path: &Path, source: std::io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a CSV error.
    pub fn csv(path: &Path, source: csv::Error) -> Self {
        Self::Csv {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create a JSON error.
    pub fn json(path: &Path, source: serde_json::Error) -> Self {
        Self::Json {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Create an invalid record error.
    pub fn invalid_record(path: &Path, record: impl Into<String>, source: DatacapError) -> Self {
        Self::InvalidRecord {
            path: path.to_path_buf(),
            record: record.into(),
            source,
        }
    }
}
