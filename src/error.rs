//! Error types for the doclens library.

use std::io;
use thiserror::Error;

/// Result type alias for doclens operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during document processing.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The document model file could not be deserialized.
    #[error("Document model error in {name}: {message}")]
    DocumentModel {
        /// Name of the offending document
        name: String,
        /// Underlying deserialization message
        message: String,
    },

    /// The file extension is not handled by any provider.
    #[error("Unsupported document format: {0}")]
    UnsupportedFormat(String),

    /// Persona or job-to-be-done input is missing or blank.
    #[error("Missing required input: {0}")]
    MissingInput(String),

    /// Every document in an analysis batch failed to load.
    #[error("No documents could be processed")]
    EmptyBatch,

    /// The input directory does not exist or contains no documents.
    #[error("Invalid input directory: {0}")]
    InvalidInputDir(String),

    /// Error serializing output.
    #[error("Output serialization error: {0}")]
    Serialize(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Serialize(err.to_string())
    }
}
