#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use shopdesk_backend::{app, database, state::AppState};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use tower::ServiceExt;

/// Fresh app over its own in-memory database. One connection so every
/// request sees the same database.
pub async fn test_app() -> Router {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(options)
        .await
        .unwrap();
    database::init_schema(&pool).await.unwrap();
    app(AppState::new(pool))
}

pub async fn body_json(resp: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> Response<Body> {
    app.clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    app.clone()
        .oneshot(Request::delete(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

/// Seed a product through the API, returning its id.
pub async fn create_product(app: &Router, name: &str, sku: &str, price: f64, stock: i64) -> i64 {
    let resp = send_json(
        app,
        "POST",
        "/api/products",
        json!({ "name": name, "sku": sku, "price": price, "stock": stock }),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    body_json(resp).await["id"].as_i64().unwrap()
}

/// Fetch a product's current stock through the API.
pub async fn product_stock(app: &Router, id: i64) -> i64 {
    let resp = get(app, &format!("/api/products/{id}")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    body_json(resp).await["stock"].as_i64().unwrap()
}
