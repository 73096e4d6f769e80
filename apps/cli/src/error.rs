//! # API Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront CLI                     │
//! │                                                                         │
//! │  storefront cart add 42                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Catalog Error? ─── CatalogError::NotFound(..) ────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Storage Error? ─── StoreError::Io { .. } ─────── ApiError ────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  stderr: "error: Product not found (NOT_FOUND)"   exit status 1        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Internal details (I/O errors, HTTP failures) are logged with `tracing`
//! and replaced with a message the shopper can act on.

use serde::Serialize;
use tracing::error;

use storefront_catalog::CatalogError;
use storefront_core::{CoreError, ValidationError};
use storefront_store::StoreError;

use crate::state::ConfigError;

/// Error returned from CLI commands.
///
/// ## Serialization
/// With `--json` a failed command prints:
/// ```json
/// {
///   "code": "NOT_FOUND",
///   "message": "Product not found"
/// }
/// ```
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for command failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Product or category not found
    NotFound,

    /// Input validation failed
    ValidationError,

    /// Local cart storage failed
    StorageError,

    /// Catalog API unreachable or returned an error
    CatalogError,

    /// Internal error
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::CatalogError => "CATALOG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NotFound, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::PageOutOfRange { .. } => ApiError::validation(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

/// Converts storage errors to API errors.
impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Io { key, source } => {
                // Log the actual error but return a generic message
                error!(key = %key, error = %source, "Cart storage write failed");
                ApiError::new(ErrorCode::StorageError, "Could not save your cart")
            }
            StoreError::Serialization { key, source } => {
                error!(key = %key, error = %source, "Cart serialization failed");
                ApiError::new(ErrorCode::StorageError, "Could not save your cart")
            }
            StoreError::Corrupt { key, reason } => {
                error!(key = %key, reason = %reason, "Stored cart is unreadable");
                ApiError::new(ErrorCode::StorageError, "Saved cart is unreadable")
            }
            StoreError::LockPoisoned => {
                error!("Cart lock poisoned");
                ApiError::internal("Cart is unavailable")
            }
        }
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound(message) => ApiError::not_found(message),
            CatalogError::Status { status, message } => {
                error!(status, message = %message, "Catalog API error");
                ApiError::new(ErrorCode::CatalogError, message)
            }
            CatalogError::Http(e) => {
                error!(error = %e, "Catalog request failed");
                ApiError::new(ErrorCode::CatalogError, "Could not reach the product catalog")
            }
            CatalogError::Decode(e) => {
                error!(error = %e, "Catalog response could not be decoded");
                ApiError::new(ErrorCode::CatalogError, "Unexpected response from the product catalog")
            }
            CatalogError::InvalidUrl(url) => {
                ApiError::validation(format!("Invalid catalog URL: {url}"))
            }
        }
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code.as_str())
    }
}

impl std::error::Error for ApiError {}

// =============================================================================
// Unit Tests
// =============================================================================
