//! Common error types for the catalog index

use std::sync::Arc;
use thiserror::Error;

/// Common result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the catalog crates
#[derive(Error, Debug)]
pub enum Error {
    /// A raw record is missing a required field or carries an out-of-domain value.
    /// The whole build is aborted; no partial snapshot is published.
    #[error("Data validation error in record {index}: {reason}")]
    DataValidation { index: usize, reason: String },

    /// The raw data collaborator could not supply records
    #[error("Source unavailable: {0}")]
    SourceUnavailable(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON (de)serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A snapshot build failed; every caller waiting on that build shares the cause
    #[error("Snapshot build failed: {0}")]
    BuildFailed(Arc<Error>),

    /// Internal error (e.g. a build task panicked)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a validation failure on the record at `index`
    pub fn validation(index: usize, reason: impl Into<String>) -> Self {
        Error::DataValidation {
            index,
            reason: reason.into(),
        }
    }

    /// Innermost error, looking through `BuildFailed` wrappers
    pub fn root_cause(&self) -> &Error {
        match self {
            Error::BuildFailed(inner) => inner.root_cause(),
            other => other,
        }
    }
}
