//! # Storage Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error / poisoned lock                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds context and categorization            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartStore logs it (tracing::warn!) and carries on in memory           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage backends return these errors; `CartStore` never propagates them.

use thiserror::Error;

/// Session storage failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Storage cannot be reached at all.
    ///
    /// ## When This Occurs
    /// - No writable cache directory on this platform
    /// - Another thread panicked while holding the storage lock
    #[error("Session storage unavailable: {0}")]
    Unavailable(String),

    /// Stored value cannot be decoded.
    #[error("Stored value for '{key}' is corrupt: {reason}")]
    Corrupt { key: String, reason: String },

    /// Key cannot be used as a storage name.
    #[error("Invalid storage key: '{0}'")]
    InvalidKey(String),

    /// Value cannot be encoded.
    #[error("Serialization failed: {0}")]
    Serialization(String),

    /// Underlying file operation failed.
    #[error("Storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Creates a Corrupt error for the given key.
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::Serialization(err.to_string())
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StoreError::corrupt("munchies-cart", "expected value at line 1");
        assert_eq!(
            err.to_string(),
            "Stored value for 'munchies-cart' is corrupt: expected value at line 1"
        );
        assert_eq!(
            StoreError::InvalidKey("../etc".into()).to_string(),
            "Invalid storage key: '../etc'"
        );
    }
}
