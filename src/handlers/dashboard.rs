// src/handlers/dashboard.rs
use axum::extract::State;
use axum::Json;

use crate::dtos::dashboard::DashboardSummary;
use crate::dtos::product::ProductResponse;
use crate::error::AppError;
use crate::models::product::Product;
use crate::state::AppState;

/// Products at or above this stock level are not flagged on the dashboard.
pub const LOW_STOCK_THRESHOLD: i64 = 5;

pub async fn get_dashboard_summary(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<DashboardSummary>, AppError> {
    let total_products: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(&db_pool)
        .await?;

    let total_orders: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
        .fetch_one(&db_pool)
        .await?;

    let total_revenue: f64 =
        sqlx::query_scalar("SELECT COALESCE(SUM(quantity * unit_price), 0.0) FROM order_items")
            .fetch_one(&db_pool)
            .await?;

    let low_stock = sqlx::query_as::<_, Product>(
        "SELECT id, sku, name, price, stock, created_at FROM products
         WHERE stock < $1 ORDER BY stock, name",
    )
    .bind(LOW_STOCK_THRESHOLD)
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(DashboardSummary {
        total_products,
        total_orders,
        total_revenue,
        low_stock_products: low_stock.into_iter().map(ProductResponse::from).collect(),
    }))
}
