//! Unified error types for the domain layer
//!
//! Value objects report their own narrow errors (`FormulaParseError`) which
//! convert into `DomainError` at the boundaries that need a single type.

use thiserror::Error;

use crate::value_objects::FormulaParseError;

/// Unified error type for domain operations
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Validation failed (e.g., tier outside 1..=4)
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Invalid ID format
    #[error("Invalid ID format: {0}")]
    InvalidId(String),

    /// Parse error (for value objects)
    #[error("Parse error: {0}")]
    Parse(String),
}

impl DomainError {
    /// Creates a validation error for business rule violations.
    ///
    /// # Example
    /// ```ignore
    /// if !(1..=4).contains(&value) {
    ///     return Err(DomainError::validation("tier must be between 1 and 4"));
    /// }
    /// ```
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create an invalid ID error
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    /// Creates a parse error for string-to-type conversion failures,
    /// e.g. an unknown archetype tag in `FromStr`.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }
}

impl From<FormulaParseError> for DomainError {
    fn from(err: FormulaParseError) -> Self {
        Self::Parse(err.to_string())
    }
}
