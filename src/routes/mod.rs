pub mod dashboard;
pub mod orders;
pub mod products;

use axum::Router;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(orders::routes())
        .merge(dashboard::routes())
}
