//! Custom error types for EngiPro.
//!
//! This module provides structured error types that enable better
//! error handling, reporting, and recovery throughout the application.

use thiserror::Error;

/// Result type alias using [`EngiproError`]
pub type Result<T> = std::result::Result<T, EngiproError>;

/// Kind of record an identifier failed to resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Project,
    Step,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Project => write!(f, "project"),
            Self::Step => write!(f, "step"),
        }
    }
}

/// Main error type for EngiPro operations
#[derive(Error, Debug)]
pub enum EngiproError {
    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// A required field was empty or otherwise unusable; rejected before
    /// any mutation is applied.
    #[error("Invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    // =========================================================================
    // Lookup Errors
    // =========================================================================
    /// An identifier did not resolve to a live record. Treated as benign:
    /// stale ids can race with deletes and must not crash the caller.
    #[error("No {kind} with id {id}")]
    NotFound { kind: EntityKind, id: String },

    // =========================================================================
    // Decode Errors
    // =========================================================================
    /// Stored or imported data could not be decoded. Surfaced to the user;
    /// the in-memory collection is left untouched.
    #[error("Decode failed: {message}")]
    Decode { message: String },

    // =========================================================================
    // Store Errors
    // =========================================================================
    /// Filesystem failure in the store layer.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl EngiproError {
    /// Create a validation error for a named field.
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Create a not-found error for a project id.
    pub fn project_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::Project,
            id: id.into(),
        }
    }

    /// Create a not-found error for a step id.
    pub fn step_not_found(id: impl Into<String>) -> Self {
        Self::NotFound {
            kind: EntityKind::Step,
            id: id.into(),
        }
    }

    /// Create a decode error with a message.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Whether this error is a benign stale-id lookup failure.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = EngiproError::validation("name", "must not be empty");
        assert_eq!(err.to_string(), "Invalid name: must not be empty");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = EngiproError::step_not_found("s-42");
        assert_eq!(err.to_string(), "No step with id s-42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_decode_error_display() {
        let err = EngiproError::decode("root is not an array");
        assert_eq!(err.to_string(), "Decode failed: root is not an array");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: EngiproError = io.into();
        assert!(matches!(err, EngiproError::Io(_)));
    }
}
