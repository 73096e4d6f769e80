//! In-process catalog API for command tests.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use storefront_catalog::{CatalogClient, CatalogConfig};

#[derive(Default)]
pub struct MockCatalog {
    pub product_hits: AtomicUsize,
}

fn product_json(id: i64, title: &str, price: f64, category_id: i64) -> Value {
    json!({
        "id": id,
        "title": title,
        "price": price,
        "description": format!("{title} description"),
        "category": { "id": category_id, "name": format!("Category {category_id}"), "image": "" },
        "images": [format!("https://placehold.co/{id}")]
    })
}

/// Twelve products: 1-10 in category 1 (clothes), 11-12 in category 2.
pub fn catalog() -> Vec<Value> {
    vec![
        product_json(1, "Classic Tee", 10.0, 1),
        product_json(2, "Baseball Cap", 5.0, 1),
        product_json(3, "Chino Shorts", 24.99, 1),
        product_json(4, "Denim Jacket", 60.0, 1),
        product_json(5, "Sun Hat", 12.5, 1),
        product_json(6, "Graphic Tee", 15.0, 1),
        product_json(7, "Wool Scarf", 18.0, 1),
        product_json(8, "Rain Coat", 80.0, 1),
        product_json(9, "Running Socks", 7.0, 1),
        product_json(10, "Cargo Shorts", 30.0, 1),
        product_json(11, "Wireless Headphones", 99.0, 2),
        product_json(12, "Gaming Controller", 49.99, 2),
    ]
}

fn page(items: Vec<Value>, params: &HashMap<String, String>) -> Vec<Value> {
    let offset: usize = params.get("offset").and_then(|v| v.parse().ok()).unwrap_or(0);
    let limit: usize = params.get("limit").and_then(|v| v.parse().ok()).unwrap_or(usize::MAX);
    items.into_iter().skip(offset).take(limit).collect()
}

async fn list_products(Query(params): Query<HashMap<String, String>>) -> Json<Vec<Value>> {
    let items = catalog()
        .into_iter()
        .filter(|p| match params.get("title") {
            Some(t) => p["title"]
                .as_str()
                .unwrap_or_default()
                .to_lowercase()
                .contains(&t.to_lowercase()),
            None => true,
        })
        .collect();

    Json(page(items, &params))
}

async fn show_product(State(state): State<Arc<MockCatalog>>, Path(id): Path<i64>) -> Response {
    state.product_hits.fetch_add(1, Ordering::SeqCst);
    match catalog().into_iter().find(|p| p["id"] == id) {
        Some(p) => Json(p).into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "name": "EntityNotFoundError",
                "message": "Could not find any entity of type \"Product\""
            })),
        )
            .into_response(),
    }
}

async fn list_categories() -> Json<Value> {
    Json(json!([
        { "id": 1, "name": "Clothes", "image": "https://placehold.co/c1" },
        { "id": 2, "name": "Electronics", "image": "https://placehold.co/c2" }
    ]))
}

async fn category_products(
    Path(id): Path<i64>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Vec<Value>> {
    let items = catalog()
        .into_iter()
        .filter(|p| p["category"]["id"] == id)
        .collect();

    Json(page(items, &params))
}

/// Starts the mock API on an ephemeral port and returns a client for it.
pub async fn spawn_catalog() -> (CatalogClient, Arc<MockCatalog>) {
    let state = Arc::new(MockCatalog::default());

    let app = Router::new()
        .route("/api/v1/products", get(list_products))
        .route("/api/v1/products/{id}", get(show_product))
        .route("/api/v1/categories", get(list_categories))
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
