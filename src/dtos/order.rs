// src/dtos/order.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(length(min = 1, max = 100, message = "Customer name must be between 1 and 100 characters"))]
    pub customer_name: String,
    #[validate(length(max = 500, message = "Notes must be at most 500 characters"))]
    pub notes: Option<String>,
    #[validate(length(min = 1, max = 50, message = "Order must contain between 1 and 50 items"), nested)]
    pub items: Vec<CreateOrderItem>,
}

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct CreateOrderItem {
    #[validate(range(min = 1, message = "Product ID must be a positive integer"))]
    pub product_id: i64,
    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    pub quantity: i64,
}

#[derive(Debug, Serialize)]
pub struct OrderItemResponse {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub product_sku: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Full order detail, returned by POST /orders and GET /orders/{id}.
#[derive(Debug, Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub customer_name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
    pub total: f64,
}

#[derive(Debug, Serialize)]
pub struct OrderListItem {
    pub id: i64,
    pub customer_name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub total_items: i64,
    pub total: f64,
}
