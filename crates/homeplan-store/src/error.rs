//! Error types for the plan store crate.
//!
//! This module provides structured error types for plan document
//! persistence and lookup.

use std::io;
use thiserror::Error;

/// Errors that can occur during plan store operations.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The requested plan was not found.
    #[error("Plan not found: {0}")]
    PlanNotFound(String),

    /// Failed to load the plan database from storage.
    #[error("Failed to load plans: {0}")]
    LoadError(String),

    /// I/O error during file operations.
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

/// Result type alias for plan store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_error_display() {
        let err = StoreError::PlanNotFound("plan-001".to_string());
        assert_eq!(err.to_string(), "Plan not found: plan-001");

        let err = StoreError::LoadError("corrupted JSON".to_string());
        assert_eq!(err.to_string(), "Failed to load plans: corrupted JSON");
    }

    #[test]
    fn test_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let store_err: StoreError = io_err.into();
        assert!(matches!(store_err, StoreError::IoError(_)));
    }
}
