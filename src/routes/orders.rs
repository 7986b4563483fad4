use axum::{routing::get, Router};
use crate::handlers::order::{create_order, get_order, list_orders};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", get(list_orders).post(create_order))
        .route("/orders/{id}", get(get_order))
}
