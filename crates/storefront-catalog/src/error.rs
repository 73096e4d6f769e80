//! # Catalog Error Types
//!
//! ## Status Mapping
//! ```text
//! 2xx                                   → Ok(decoded body)
//! 404, or 400 with EntityNotFoundError  → CatalogError::NotFound
//! any other non-2xx                     → CatalogError::Status
//! connect / timeout / TLS               → CatalogError::Http
//! 2xx with an unexpected body           → CatalogError::Decode
//! ```
//!
//! The catalog answers errors with a JSON body such as
//! `{ "statusCode": 400, "message": "...", "error": "Bad Request" }`.
//! When that body is present its message is surfaced; otherwise a generic
//! "Failed to fetch ..." message is used.

use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The request never got a response.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Catalog API returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The requested product or category does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body was not the expected JSON.
    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configured base URL can't be used.
    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Error body sent by the catalog API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

impl ApiErrorBody {
    /// `message` is a string, or a list of strings for validation failures.
    fn message(&self) -> Option<String> {
        match self.message.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(parts) => {
                let parts: Vec<&str> = parts.iter().filter_map(|p| p.as_str()).collect();
                (!parts.is_empty()).then(|| parts.join("; "))
            }
            _ => None,
        }
        .or_else(|| self.error.clone())
    }
}

impl CatalogError {
    /// Builds the error for a non-success response.
    ///
    /// `what` names the resource for the fallback message, e.g. `"products"`.
    pub(crate) fn from_response(status: u16, body: &str, what: &str) -> Self {
        let parsed = serde_json::from_str::<ApiErrorBody>(body).ok();

        let entity_missing = parsed
            .as_ref()
            .and_then(|b| b.name.as_deref())
            .is_some_and(|name| name == "EntityNotFoundError");

        let message = parsed
            .as_ref()
            .and_then(ApiErrorBody::message)
            .unwrap_or_else(|| format!("Failed to fetch {what}"));

        if status == 404 || entity_missing {
            return CatalogError::NotFound(message);
        }

        CatalogError::Status { status, message }
    }

    /// Checks if this is a missing-resource error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, CatalogError::NotFound(_))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uses_api_message() {
        let err = CatalogError::from_response(
            400,
            r#"{"statusCode":400,"message":["limit must be a number"],"error":"Bad Request"}"#,
            "products",
        );
        match err {
            CatalogError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "limit must be a number");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_generic_message_without_body() {
        let err = CatalogError::from_response(502, "<html>Bad Gateway</html>", "products");
        match err {
            CatalogError::Status { status, message } => {
                assert_eq!(status, 502);
                assert_eq!(message, "Failed to fetch products");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_not_found_mapping() {
        assert!(CatalogError::from_response(404, "", "product 3").is_not_found());

        let err = CatalogError::from_response(
            400,
            r#"{"name":"EntityNotFoundError","message":"Could not find any entity of type \"Product\""}"#,
            "product 999",
        );
        assert!(err.is_not_found());
        assert!(err.to_string().contains("Could not find any entity"));
    }
}
