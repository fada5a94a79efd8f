//! Error handling module for pipesmith
//!
//! Provides centralized error handling with proper error types using thiserror.
//! Library-level failures (catalog lookup, compilation) carry their own typed
//! errors and convert into this application-level type at the edges.

#![allow(dead_code)] // Error variants and helpers are available for future use

use thiserror::Error;

/// Main error type for pipesmith
#[derive(Error, Debug)]
pub enum PipesmithError {
    /// IO errors (file operations, terminal, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Block catalog errors (lookup, loading, duplicate ids)
    #[error("Catalog error: {0}")]
    Catalog(#[from] crate::catalog::CatalogError),

    /// Script compilation errors
    #[error("Compile error: {0}")]
    Compile(#[from] crate::compiler::CompileError),

    /// Pipeline file errors (loading, parsing, validation)
    #[error("Pipeline error: {0}")]
    Pipeline(String),

    /// Terminal/UI errors
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General errors (catch-all for edge cases)
    #[error("{0}")]
    General(String),
}

/// Result type alias for pipesmith operations
pub type Result<T> = std::result::Result<T, PipesmithError>;

// Convenient error constructors
impl PipesmithError {
    /// Create a pipeline error
    pub fn pipeline(msg: impl Into<String>) -> Self {
        Self::Pipeline(msg.into())
    }

    /// Create a terminal error
    pub fn terminal(msg: impl Into<String>) -> Self {
        Self::Terminal(msg.into())
    }

    /// Create a general error
    pub fn general(msg: impl Into<String>) -> Self {
        Self::General(msg.into())
    }
}

/// Helper function to create general errors
pub fn general_error(msg: impl Into<String>) -> PipesmithError {
    PipesmithError::General(msg.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PipesmithError::pipeline("empty selection");
        assert_eq!(err.to_string(), "Pipeline error: empty selection");

        let err = PipesmithError::terminal("raw mode failed");
        assert_eq!(err.to_string(), "Terminal error: raw mode failed");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: PipesmithError = io_err.into();
        assert!(matches!(err, PipesmithError::Io(_)));
    }

    #[test]
    fn test_catalog_error_conversion() {
        let cat_err = crate::catalog::CatalogError::UnknownCapability {
            id: "nope".to_string(),
        };
        let err: PipesmithError = cat_err.into();
        assert!(matches!(err, PipesmithError::Catalog(_)));
    }
}
