//! # Reference Data Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  std::io::Error / serde_json::Error                                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  RefDataError (this module) ← Adds path / table / key context          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  anyhow::Error (in the CLI) ← Printed, exit code 1                     │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These only happen while loading tables. Lookups never fail: a missing
//! rule is a zero percent or an absent voucher.

use std::path::PathBuf;
use thiserror::Error;

/// Failures while building reference tables.
#[derive(Debug, Error)]
pub enum RefDataError {
    /// Snapshot file could not be read.
    #[error("Failed to read reference data from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot is not valid JSON or does not match the expected shape.
    ///
    /// ## When This Occurs
    /// - Malformed JSON
    /// - Percent outside 0..=100
    /// - Missing required field (`brand`, `code`, ...)
    #[error("Invalid reference data: {0}")]
    Parse(#[from] serde_json::Error),

    /// Two rules share a key that must be unique.
    ///
    /// ## When This Occurs
    /// - Same brand twice (compared ignoring case)
    /// - Same category twice (compared ignoring case)
    /// - Same voucher code twice
    #[error("Duplicate {table} rule: '{key}' already exists")]
    DuplicateRule { table: &'static str, key: String },

    /// A rule is structurally invalid (blank key, blank bank name, ...).
    #[error("Invalid {table} rule: {reason}")]
    InvalidRule { table: &'static str, reason: String },
}

impl RefDataError {
    /// Creates a DuplicateRule error.
    pub fn duplicate(table: &'static str, key: impl Into<String>) -> Self {
        RefDataError::DuplicateRule {
            table,
            key: key.into(),
        }
    }

    /// Creates an InvalidRule error.
    pub fn invalid(table: &'static str, reason: impl Into<String>) -> Self {
        RefDataError::InvalidRule {
            table,
            reason: reason.into(),
        }
    }
}

/// Result type for reference data operations.
pub type RefDataResult<T> = Result<T, RefDataError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = RefDataError::duplicate("brand", "PUMA");
        assert_eq!(err.to_string(), "Duplicate brand rule: 'PUMA' already exists");

        let err = RefDataError::invalid("voucher", "code must not be blank");
        assert_eq!(err.to_string(), "Invalid voucher rule: code must not be blank");
    }
}
