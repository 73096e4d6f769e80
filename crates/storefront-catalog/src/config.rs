//! # Catalog Client Configuration
//!
//! Where the catalog lives and how long its answers are trusted.

use std::time::Duration;

/// Base URL of the public Platzi Fake Store API.
pub const DEFAULT_API_URL: &str = "https://api.escuelajs.co/api/v1";

/// Listings, products and categories are cached for an hour.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(3600);

/// Search results go stale faster than listings.
pub const DEFAULT_SEARCH_CACHE_TTL: Duration = Duration::from_secs(60);

/// Request timeout applied to every call.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Catalog client configuration.
///
/// ## Example
/// ```rust
/// use std::time::Duration;
/// use storefront_catalog::CatalogConfig;
///
/// let config = CatalogConfig::new("http://localhost:3000/api/v1")
///     .with_timeout(Duration::from_secs(2))
///     .with_cache_ttl(Duration::from_secs(30));
/// assert_eq!(config.cache_capacity, 1000);
/// ```
#[derive(Debug, Clone)]
pub struct CatalogConfig {
    /// API root, e.g. `https://api.escuelajs.co/api/v1`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// TTL for listings, single products and categories.
    pub cache_ttl: Duration,

    /// TTL for title searches.
    pub search_cache_ttl: Duration,

    /// Maximum number of cached responses per cache.
    pub cache_capacity: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            base_url: DEFAULT_API_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            cache_ttl: DEFAULT_CACHE_TTL,
            search_cache_ttl: DEFAULT_SEARCH_CACHE_TTL,
            cache_capacity: 1000,
        }
    }
}

impl CatalogConfig {
    /// Default settings against a different API root.
    pub fn new(base_url: impl Into<String>) -> Self {
        CatalogConfig {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    pub fn with_search_cache_ttl(mut self, ttl: Duration) -> Self {
        self.search_cache_ttl = ttl;
        self
    }
}
