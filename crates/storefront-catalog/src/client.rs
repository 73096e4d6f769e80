//! Catalog API client.
//!
//! Plain `GET`s against the Platzi Fake Store API with `reqwest`. Response
//! bodies are cached with `moka`, keyed by the full request URL: one hour
//! for listings and records, one minute for searches.

use std::sync::Arc;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, error, instrument};
use url::Url;

use storefront_core::{Category, CategoryId, Product, ProductFilters, ProductId};

use crate::config::CatalogConfig;
use crate::error::{CatalogError, CatalogResult};

// =============================================================================
// CatalogClient
// =============================================================================

/// Client for the Product Catalog Service.
///
/// Cheap to clone; clones share the HTTP connection pool and caches.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: Url,
    cache: Cache<String, Arc<str>>,
    search_cache: Cache<String, Arc<str>>,
}

impl std::fmt::Debug for CatalogClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogClient")
            .field("base_url", &self.inner.base_url.as_str())
            .finish_non_exhaustive()
    }
}

impl CatalogClient {
    /// Create a new catalog client.
    ///
    /// # Errors
    ///
    /// Returns `InvalidUrl` if `config.base_url` is not an absolute http(s)
    /// URL, or `Http` if the HTTP client can't be built.
    pub fn new(config: &CatalogConfig) -> CatalogResult<Self> {
        let base_url = parse_base_url(&config.base_url)?;

        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()?;

        let cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.cache_ttl)
            .build();

        let search_cache = Cache::builder()
            .max_capacity(config.cache_capacity)
            .time_to_live(config.search_cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(CatalogClientInner {
                client,
                base_url,
                cache,
                search_cache,
            }),
        })
    }

    /// Drops every cached response.
    pub fn clear_cache(&self) {
        self.inner.cache.invalidate_all();
        self.inner.search_cache.invalidate_all();
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// List products matching `filters`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, filters: &ProductFilters) -> CatalogResult<Vec<Product>> {
        let url = self.endpoint(&["products"], &filters.to_query_pairs())?;
        self.get_json(url, &self.inner.cache, "products").await
    }

    /// One page of the full catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn get_products_page(&self, offset: u32, limit: u32) -> CatalogResult<Vec<Product>> {
        self.get_products(&ProductFilters::page(offset, limit)).await
    }

    /// Total number of products in the catalog.
    ///
    /// The API has no count endpoint, so this fetches the unpaginated list
    /// and counts it.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products_count(&self) -> CatalogResult<usize> {
        let url = self.endpoint(&["products"], &[])?;
        let products: Vec<Product> = self.get_json(url, &self.inner.cache, "products count").await?;
        Ok(products.len())
    }

    /// Get a single product.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no product has this id, or an error if the API
    /// request fails.
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: ProductId) -> CatalogResult<Product> {
        let id = id.to_string();
        let url = self.endpoint(&["products", &id], &[])?;
        self.get_json(url, &self.inner.cache, &format!("product {id}"))
            .await
    }

    /// One page of the products in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_category_products(
        &self,
        category_id: CategoryId,
        offset: u32,
        limit: u32,
    ) -> CatalogResult<Vec<Product>> {
        let id = category_id.to_string();
        let query = ProductFilters::page(offset, limit).to_query_pairs();
        let url = self.endpoint(&["categories", &id, "products"], &query)?;
        self.get_json(url, &self.inner.cache, &format!("products in category {id}"))
            .await
    }

    /// Number of products in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_category_products_count(&self, category_id: CategoryId) -> CatalogResult<usize> {
        let id = category_id.to_string();
        let url = self.endpoint(&["categories", &id, "products"], &[])?;
        let products: Vec<Product> = self
            .get_json(url, &self.inner.cache, &format!("products in category {id}"))
            .await?;
        Ok(products.len())
    }

    /// Search products by title, narrowed by any other `filters`.
    ///
    /// Any title already in `filters` is replaced by `query`.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn search_products(
        &self,
        query: &str,
        filters: &ProductFilters,
    ) -> CatalogResult<Vec<Product>> {
        let filters = filters.clone().with_title(query);
        let url = self.endpoint(&["products"], &filters.to_query_pairs())?;
        self.get_json(url, &self.inner.search_cache, "search results")
            .await
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// List all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> CatalogResult<Vec<Category>> {
        let url = self.endpoint(&["categories"], &[])?;
        self.get_json(url, &self.inner.cache, "categories").await
    }

    /// Get a single category.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no category has this id, or an error if the API
    /// request fails.
    #[instrument(skip(self))]
    pub async fn get_category(&self, id: CategoryId) -> CatalogResult<Category> {
        let id = id.to_string();
        let url = self.endpoint(&["categories", &id], &[])?;
        self.get_json(url, &self.inner.cache, &format!("category {id}"))
            .await
    }

    // =========================================================================
    // Request Plumbing
    // =========================================================================

    /// Appends path segments and query pairs to the base URL.
    fn endpoint(&self, segments: &[&str], query: &[(&'static str, String)]) -> CatalogResult<Url> {
        let mut url = self.inner.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| CatalogError::InvalidUrl(self.inner.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(query.iter().map(|(k, v)| (*k, v.as_str())));
        }

        Ok(url)
    }

    /// GETs `url` through `cache` and decodes the body.
    ///
    /// Only bodies that decode are cached, so a bad response is retried on
    /// the next call.
    async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        cache: &Cache<String, Arc<str>>,
        what: &str,
    ) -> CatalogResult<T> {
        let cache_key = url.to_string();

        if let Some(body) = cache.get(&cache_key).await {
            debug!(url = %cache_key, "Cache hit");
            return Ok(serde_json::from_str(&body)?);
        }

        debug!(url = %cache_key, "Fetching from catalog");
        let response = self.inner.client.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            error!(
                status = %status,
                url = %cache_key,
                body = %body.chars().take(500).collect::<String>(),
                "Catalog API returned non-success status"
            );
            return Err(CatalogError::from_response(status.as_u16(), &body, what));
        }

        let value = match serde_json::from_str(&body) {
            Ok(value) => value,
            Err(e) => {
                error!(
                    error = %e,
                    url = %cache_key,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog response"
                );
                return Err(CatalogError::Decode(e));
            }
        };

        cache.insert(cache_key, Arc::from(body)).await;
        Ok(value)
    }
}

/// Validates the configured API root.
fn parse_base_url(raw: &str) -> CatalogResult<Url> {
    let url = Url::parse(raw).map_err(|e| CatalogError::InvalidUrl(format!("{raw}: {e}")))?;

    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(CatalogError::InvalidUrl(format!(
            "{raw}: expected an http(s) URL"
        )));
    }

    Ok(url)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    use axum::extract::{Path, Query, RawQuery, State};
    use axum::http::StatusCode;
    use axum::response::{IntoResponse, Response};
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    #[derive(Default)]
    struct MockState {
        hits: AtomicUsize,
        queries: Mutex<Vec<String>>,
    }

    fn product_json(id: i64, title: &str, price: f64, category_id: i64) -> serde_json::Value {
        json!({
            "id": id,
            "title": title,
            "slug": title.to_lowercase().replace(' ', "-"),
            "price": price,
            "description": format!("{title} description"),
            "category": { "id": category_id, "name": format!("Category {category_id}"), "image": "" },
            "images": [format!("https://placehold.co/{id}")]
        })
    }

    fn catalog() -> Vec<serde_json::Value> {
        vec![
            product_json(1, "Classic Tee", 10.0, 1),
            product_json(2, "Classic Cap", 5.0, 1),
            product_json(3, "Wooden Chair", 120.5, 3),
        ]
    }

    async fn list_products(
        State(state): State<Arc<MockState>>,
        RawQuery(raw): RawQuery,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Vec<serde_json::Value>> {
        state.hits.fetch_add(1, Ordering::SeqCst);
        state.queries.lock().unwrap().push(raw.unwrap_or_default());

        let mut items: Vec<_> = catalog()
            .into_iter()
            .filter(|p| match params.get("title") {
                Some(t) => p["title"].as_str().unwrap().to_lowercase().contains(&t.to_lowercase()),
                None => true,
            })
            .collect();

        let offset: usize = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
        let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(usize::MAX);
        items = items.into_iter().skip(offset).take(limit).collect();

        Json(items)
    }

    async fn show_product(State(state): State<Arc<MockState>>, Path(id): Path<i64>) -> Response {
        state.hits.fetch_add(1, Ordering::SeqCst);
        match catalog().into_iter().find(|p| p["id"] == id) {
            Some(p) => Json(p).into_response(),
            None => (
                StatusCode::BAD_REQUEST,
                Json(json!({
                    "path": format!("/api/v1/products/{id}"),
                    "name": "EntityNotFoundError",
                    "message": "Could not find any entity of type \"Product\""
                })),
            )
                .into_response(),
        }
    }

    async fn list_categories() -> Json<serde_json::Value> {
        Json(json!([
            { "id": 1, "name": "Clothes", "image": "https://placehold.co/c1" },
            { "id": 3, "name": "Furniture", "image": "https://placehold.co/c3" }
        ]))
    }

    async fn show_category(Path(id): Path<i64>) -> Response {
        match id {
            1 => Json(json!({ "id": 1, "name": "Clothes", "image": "" })).into_response(),
            500 => (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response(),
            _ => (
                StatusCode::NOT_FOUND,
                Json(json!({ "statusCode": 404, "message": "Category not found" })),
            )
                .into_response(),
        }
    }

    async fn category_products(
        Path(id): Path<i64>,
        Query(params): Query<HashMap<String, String>>,
    ) -> Json<Vec<serde_json::Value>> {
        let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(usize::MAX);
        Json(
            catalog()
                .into_iter()
                .filter(|p| p["category"]["id"] == id)
                .take(limit)
                .collect(),
        )
    }

    async fn spawn_catalog() -> (CatalogClient, Arc<MockState>) {
        let state = Arc::new(MockState::default());

        let app = Router::new()
            .route("/api/v1/products", get(list_products))
            .route("/api/v1/products/{id}", get(show_product))
            .route("/api/v1/categories", get(list_categories))
            .route("/api/v1/categories/{id}", get(show_category))
            .route("/api/v1/categories/{id}/products", get(category_products))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let config = CatalogConfig::new(format!("http://{addr}/api/v1"));
        (CatalogClient::new(&config).unwrap(), state)
    }

    #[test]
    fn test_rejects_unusable_base_url() {
        assert!(matches!(
            CatalogClient::new(&CatalogConfig::new("not a url")),
            Err(CatalogError::InvalidUrl(_))
        ));
        assert!(matches!(
            CatalogClient::new(&CatalogConfig::new("ftp://example.com/api")),
            Err(CatalogError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_endpoint_building() {
        let client = CatalogClient::new(&CatalogConfig::default()).unwrap();

        let url = client.endpoint(&["products", "4"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.escuelajs.co/api/v1/products/4");

        let query = ProductFilters::page(20, 10).to_query_pairs();
        let url = client.endpoint(&["products"], &query).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.escuelajs.co/api/v1/products?offset=20&limit=10"
        );

        let trailing = CatalogClient::new(&CatalogConfig::new("https://api.escuelajs.co/api/v1/")).unwrap();
        let url = trailing.endpoint(&["categories"], &[]).unwrap();
        assert_eq!(url.as_str(), "https://api.escuelajs.co/api/v1/categories");
    }

    #[tokio::test]
    async fn test_get_products_page() {
        let (client, state) = spawn_catalog().await;

        let products = client.get_products_page(1, 1).await.unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, 2);
        assert_eq!(*state.queries.lock().unwrap(), vec!["offset=1&limit=1"]);
    }

    #[tokio::test]
    async fn test_only_present_filters_are_sent() {
        let (client, state) = spawn_catalog().await;

        let filters = ProductFilters {
            price_min: Some(5.0),
            category_id: Some(1),
            ..Default::default()
        };
        client.get_products(&filters).await.unwrap();

        assert_eq!(*state.queries.lock().unwrap(), vec!["price_min=5&categoryId=1"]);
    }

    #[tokio::test]
    async fn test_products_count() {
        let (client, _) = spawn_catalog().await;
        assert_eq!(client.get_products_count().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_repeat_requests_are_cached() {
        let (client, state) = spawn_catalog().await;

        let first = client.get_product(3).await.unwrap();
        let second = client.get_product(3).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.unit_price().cents(), 12050);
        assert_eq!(state.hits.load(Ordering::SeqCst), 1);

        client.clear_cache();
        client.get_product(3).await.unwrap();
        assert_eq!(state.hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_missing_product_is_not_found() {
        let (client, _) = spawn_catalog().await;

        let err = client.get_product(999).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_search_products() {
        let (client, state) = spawn_catalog().await;

        let results = client
            .search_products("classic", &ProductFilters::page(0, 10))
            .await
            .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(
            *state.queries.lock().unwrap(),
            vec!["title=classic&offset=0&limit=10"]
        );
    }

    #[tokio::test]
    async fn test_categories() {
        let (client, _) = spawn_catalog().await;

        let categories = client.get_categories().await.unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[1].name, "Furniture");

        assert_eq!(client.get_category(1).await.unwrap().name, "Clothes");
        assert!(client.get_category(2).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let (client, _) = spawn_catalog().await;

        match client.get_category(500).await.unwrap_err() {
            CatalogError::Status { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Failed to fetch category 500");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_category_products() {
        let (client, _) = spawn_catalog().await;

        let products = client.get_category_products(3, 0, 10).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].title, "Wooden Chair");

        assert_eq!(client.get_category_products_count(1).await.unwrap(), 2);
    }
}
