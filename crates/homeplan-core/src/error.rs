//! Error handling for HomePlan core types.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Core error type shared by the HomePlan crates.
#[derive(Error, Debug, Clone)]
pub enum CoreError {
    /// A value could not be parsed into the requested type.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A numeric value is outside its valid range.
    #[error("Value out of range for '{field}': {value}")]
    ValueOutOfRange {
        /// The field the value was destined for.
        field: String,
        /// The offending value, formatted for display.
        value: String,
    },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
