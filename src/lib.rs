pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod state;
pub mod validation;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

/// Assemble the full application router under the /api base path.
pub fn app(state: AppState) -> Router {
    let api = routes::create_router()
        .route("/", get(|| async { "Shopdesk API" }))
        .route("/health", get(health_check));

    Router::new()
        .nest("/api", api)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
