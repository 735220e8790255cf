//! Error types for the Chunkwise CLI.
//!
//! This module defines a unified error enum covering all error categories
//! in the application: configuration, I/O, completion-port, chunking, and
//! retry errors.

use thiserror::Error;

/// Unified error type for the Chunkwise CLI.
///
/// All functions in the application return `Result<T, AppError>`.
/// We never panic — errors must be represented and propagated.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A single failed exchange with the completion port.
    ///
    /// Transient by definition: the retry wrapper recovers these until the
    /// attempt ceiling is hit.
    #[error("Completion error: {0}")]
    Completion(String),

    /// All retry attempts were consumed without a successful completion.
    #[error("Retries exhausted after {attempts} attempts")]
    RetriesExhausted { attempts: usize },

    /// The splitter could not produce a chunk under the size ceilings.
    #[error("Chunking error: {0}")]
    Chunking(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retries_exhausted_message_names_the_ceiling() {
        let err = AppError::RetriesExhausted { attempts: 10 };
        assert_eq!(err.to_string(), "Retries exhausted after 10 attempts");
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: AppError = io.into();
        assert!(matches!(err, AppError::Io(_)));
    }
}
