//! # Validation Module
//!
//! Input validation for values typed in by the shopper.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI argument parsing (clap)                                  │
//! │  └── Type checks (is it a number?)                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  └── Range and length rules (page >= 1, limit <= 100, ...)             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Catalog API                                                  │
//! │  └── 400 / 404 responses for anything it still rejects                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart quantities only have an upper bound: a quantity of zero or below is
//! a removal, not an error.

use crate::error::ValidationError;
use crate::types::ProductId;
use crate::{MAX_ITEM_QUANTITY, MAX_PAGE_SIZE, MAX_SEARCH_QUERY_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a 1-based page number.
pub fn validate_page(page: u32) -> ValidationResult<()> {
    if page == 0 {
        return Err(ValidationError::MustBePositive {
            field: "page".to_string(),
        });
    }

    Ok(())
}

/// Validates a page size.
///
/// ## Rules
/// - Must be between 1 and MAX_PAGE_SIZE (100)
pub fn validate_limit(limit: u32) -> ValidationResult<()> {
    if limit == 0 || limit > MAX_PAGE_SIZE {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: i64::from(MAX_PAGE_SIZE),
        });
    }

    Ok(())
}

/// Validates a catalog product or category id.
///
/// ## Example
/// ```rust
/// use storefront_core::validation::validate_id;
///
/// assert!(validate_id("product id", 12).is_ok());
/// assert!(validate_id("product id", 0).is_err());
/// ```
pub fn validate_id(field: &str, id: ProductId) -> ValidationResult<()> {
    if id <= 0 {
        return Err(ValidationError::MustBePositive {
            field: field.to_string(),
        });
    }

    Ok(())
}

/// Validates a requested cart quantity.
///
/// ## Rules
/// - At most MAX_ITEM_QUANTITY (999)
/// - Zero or below passes; the cart treats it as a removal
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product search query.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.is_empty() {
        return Err(ValidationError::Required {
            field: "query".to_string(),
        });
    }

    if query.chars().count() > MAX_SEARCH_QUERY_LEN {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LEN,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
