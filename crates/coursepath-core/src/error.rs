//! Error types for Coursepath

use thiserror::Error;

/// Main error type for Coursepath operations
#[derive(Error, Debug)]
pub enum EnrollError {
    /// The page structure and the state machine disagree (missing step,
    /// unknown field, empty wizard). Always fatal.
    #[error("Structure error: {0}")]
    Structure(String),

    /// The active step's validator rejected its input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Navigation requested past either end of the wizard
    #[error("Invalid operation: {0}")]
    InvalidOperation(String),

    /// Transport-level failure talking to the submission endpoint
    #[error("Network error: {0}")]
    Network(String),

    /// The endpoint answered but reported failure
    #[error("Submission rejected: {0}")]
    Rejected(String),

    /// Error during serialization/deserialization
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// General I/O error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for EnrollError {
    fn from(err: reqwest::Error) -> Self {
        EnrollError::Network(err.to_string())
    }
}

/// Result type alias using EnrollError
pub type EnrollResult<T> = Result<T, EnrollError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EnrollError::Structure("no steps defined".to_string());
        assert_eq!(format!("{}", err), "Structure error: no steps defined");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: EnrollError = io_err.into();
        assert!(matches!(err, EnrollError::Io(_)));
    }

    #[test]
    fn test_error_from_json() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: EnrollError = json_err.into();
        assert!(matches!(err, EnrollError::Serialization(_)));
    }
}
