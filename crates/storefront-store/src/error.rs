//! # Storage Error Types
//!
//! Error types for local cart storage.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  io::Error / serde_json::Error                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError (this module) ← Adds the storage key and categorization    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in the CLI) ← STORAGE_ERROR                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Shopper sees "Could not save your cart"                               │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;

use thiserror::Error;

/// Local storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory can't be created
    /// - File permissions issue
    /// - Disk full
    #[error("Storage I/O failed for '{key}': {source}")]
    Io {
        key: String,
        #[source]
        source: io::Error,
    },

    /// The cart could not be encoded for storage.
    #[error("Failed to serialize '{key}': {source}")]
    Serialization {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A stored record exists but is not in the expected shape.
    ///
    /// ## When This Occurs
    /// - File edited by hand
    /// - Partial write from an older build without atomic replace
    #[error("Stored record '{key}' is unreadable: {reason}")]
    Corrupt { key: String, reason: String },

    /// A thread panicked while holding the in-memory storage lock.
    #[error("Storage lock poisoned")]
    LockPoisoned,
}

impl StoreError {
    /// Creates an Io error for a given key.
    pub fn io(key: impl Into<String>, source: io::Error) -> Self {
        StoreError::Io {
            key: key.into(),
            source,
        }
    }

    /// Creates a Corrupt error for a given key.
    pub fn corrupt(key: impl Into<String>, reason: impl ToString) -> Self {
        StoreError::Corrupt {
            key: key.into(),
            reason: reason.to_string(),
        }
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
