//! # Error Types
//!
//! Structured error types for cut_core. Every failure carries enough context
//! to explain which part, stock length or file caused it, and serializes to
//! JSON so the presentation layer can forward it untouched.
//!
//! ## Example
//!
//! ```rust
//! use cut_core::errors::{PlanError, PlanResult};
//!
//! fn validate_kerf(kerf: f64) -> PlanResult<()> {
//!     if kerf < 0.0 {
//!         return Err(PlanError::InvalidInput {
//!             field: "kerf".to_string(),
//!             value: kerf.to_string(),
//!             reason: "Kerf cannot be negative".to_string(),
//!         });
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for cut_core operations
pub type PlanResult<T> = Result<T, PlanError>;

/// Structured error type for planning operations.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum PlanError {
    /// No open bar and no stock definition can accept a part
    #[error("Out of stock: no bar available for part of length {length}{}", label_suffix(.label))]
    OutOfStock {
        length: f64,
        label: Option<String>,
    },

    /// A placement was attempted without enough room on the bar.
    ///
    /// The planner always checks fit before placing, so this signals a
    /// planner defect rather than bad input.
    #[error("Capacity exceeded: part of length {part_length} does not fit in remaining {remaining}")]
    CapacityExceeded { part_length: f64, remaining: f64 },

    /// A finite stock definition was asked for a bar after reaching zero
    #[error("Stock exhausted: no bars of length {length} remain")]
    Exhausted { length: f64 },

    /// An input value is invalid (non-positive length, negative kerf, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// File I/O error
    #[error("File error: {operation} on '{path}' - {reason}")]
    FileError {
        operation: String,
        path: String,
        reason: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Schema version mismatch
    #[error("Version mismatch: file version {file_version}, expected {expected_version}")]
    VersionMismatch {
        file_version: String,
        expected_version: String,
    },
}

fn label_suffix(label: &Option<String>) -> String {
    match label {
        Some(l) => format!(" ('{}')", l),
        None => String::new(),
    }
}

impl PlanError {
    /// Create an OutOfStock error
    pub fn out_of_stock(length: f64, label: Option<String>) -> Self {
        PlanError::OutOfStock { length, label }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a FileError
    pub fn file_error(operation: impl Into<String>, path: impl Into<String>, reason: impl Into<String>) -> Self {
        PlanError::FileError {
            operation: operation.into(),
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error is caused by the request itself (as opposed to
    /// a planner defect or an I/O problem)
    pub fn is_user_error(&self) -> bool {
        matches!(self, PlanError::OutOfStock { .. } | PlanError::InvalidInput { .. })
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            PlanError::OutOfStock { .. } => "OUT_OF_STOCK",
            PlanError::CapacityExceeded { .. } => "CAPACITY_EXCEEDED",
            PlanError::Exhausted { .. } => "EXHAUSTED",
            PlanError::InvalidInput { .. } => "INVALID_INPUT",
            PlanError::FileError { .. } => "FILE_ERROR",
            PlanError::SerializationError { .. } => "SERIALIZATION_ERROR",
            PlanError::VersionMismatch { .. } => "VERSION_MISMATCH",
        }
    }
}

impl From<serde_json::Error> for PlanError {
    fn from(e: serde_json::Error) -> Self {
        PlanError::SerializationError {
            reason: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = PlanError::out_of_stock(50.0, Some("Rail".to_string()));
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("\"type\":\"OutOfStock\""));
        let roundtrip: PlanError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_messages() {
        let labeled = PlanError::out_of_stock(50.0, Some("Rail".to_string()));
        assert_eq!(
            labeled.to_string(),
            "Out of stock: no bar available for part of length 50 ('Rail')"
        );

        let bare = PlanError::out_of_stock(12.5, None);
        assert_eq!(bare.to_string(), "Out of stock: no bar available for part of length 12.5");
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(PlanError::out_of_stock(1.0, None).error_code(), "OUT_OF_STOCK");
        assert_eq!(PlanError::Exhausted { length: 96.0 }.error_code(), "EXHAUSTED");
        assert!(PlanError::invalid_input("kerf", "-1", "negative").is_user_error());
        assert!(!PlanError::CapacityExceeded { part_length: 2.0, remaining: 1.0 }.is_user_error());
    }
}
