use axum::{routing::get, Router};
use crate::handlers::dashboard::get_dashboard_summary;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/dashboard", get(get_dashboard_summary))
}
