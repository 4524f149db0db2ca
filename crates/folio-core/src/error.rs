//! Error types for folio.

use thiserror::Error;

/// Result type alias using folio's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for folio operations.
///
/// Tree lookups never produce errors; they degrade to `None`/`false`.
/// These variants cover identifier parsing and loading collection dumps.
/// Bad configuration values are logged and defaulted, never raised.
#[derive(Error, Debug)]
pub enum Error {
    /// A collection identifier that is neither `"root"` nor numeric
    #[error("Invalid collection id: {0:?}")]
    InvalidCollectionId(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
