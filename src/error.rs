//! Error types for Quill
//!
//! This module provides structured error definitions using thiserror;
//! anyhow is used for propagation at the application boundary.

use thiserror::Error;

/// Main error type for Quill operations
#[derive(Error, Debug)]
pub enum QuillError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Generic error with context
    #[error("{0}")]
    Other(String),
}

/// Result type alias for Quill operations
pub type Result<T> = std::result::Result<T, QuillError>;

impl From<toml::de::Error> for QuillError {
    fn from(err: toml::de::Error) -> Self {
        QuillError::Config(err.to_string())
    }
}

impl From<anyhow::Error> for QuillError {
    fn from(err: anyhow::Error) -> Self {
        QuillError::Other(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QuillError::Config("bad field".to_string());
        assert_eq!(err.to_string(), "Configuration error: bad field");
    }

    #[test]
    fn test_toml_error_conversion() {
        let parse_err = toml::from_str::<toml::Value>("not [valid").unwrap_err();
        let err: QuillError = parse_err.into();
        assert!(matches!(err, QuillError::Config(_)));
    }
}
