//! Bank error types.
//!
//! Defined in `cefrtest-core` so callers of the bank sources can classify
//! failures (missing bank vs. broken bank) without string matching.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading a question bank.
#[derive(Debug, Error)]
pub enum BankError {
    /// No bank with the requested id exists.
    #[error("bank not found: {id}")]
    NotFound { id: String },

    /// The bank file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The bank file was read but could not be parsed.
    #[error("failed to parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

impl BankError {
    /// Returns `true` if the error means the bank simply does not exist,
    /// as opposed to existing but being unreadable or broken.
    pub fn is_not_found(&self) -> bool {
        matches!(self, BankError::NotFound { .. })
    }
}
