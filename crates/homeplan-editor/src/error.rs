//! Error types for the editor crate.

use thiserror::Error;

/// Errors that can occur while exporting or importing plans.
#[derive(Error, Debug)]
pub enum PlanError {
    /// JSON serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for plan serialization operations.
pub type PlanResult<T> = Result<T, PlanError>;
