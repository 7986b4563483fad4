// src/dtos/dashboard.rs
use serde::Serialize;

use crate::dtos::product::ProductResponse;

#[derive(Debug, Serialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    pub total_orders: i64,
    pub total_revenue: f64,
    pub low_stock_products: Vec<ProductResponse>,
}
