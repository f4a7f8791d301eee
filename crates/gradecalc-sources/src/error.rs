//! Source error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while locating or reading transcript sources.
#[derive(Debug, Error)]
pub enum SourceError {
    /// No file in the directory matched the document name pattern.
    #[error("no transcript document found in {dir}; name the file {prefix}*.{extension}")]
    DocumentNotFound {
        dir: PathBuf,
        prefix: String,
        extension: String,
    },

    /// The document could not be turned into text.
    #[error("could not extract text from {path}: {message}")]
    Extraction { path: PathBuf, message: String },

    /// A snapshot lacks one of the locale's column labels.
    #[error("snapshot {path} has no '{column}' column (was it written with another --lang?)")]
    MissingColumn { path: PathBuf, column: String },

    /// A snapshot field that must be a number is not.
    #[error("snapshot row {row}: '{column}' must be a whole number, got '{value}'")]
    InvalidField {
        row: usize,
        column: String,
        value: String,
    },
}

impl SourceError {
    /// Returns `true` if the error means the input is missing rather than broken.
    pub fn is_not_found(&self) -> bool {
        matches!(self, SourceError::DocumentNotFound { .. })
    }
}
