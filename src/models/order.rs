use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Order {
    pub id: i64,
    pub customer_name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Line item of an order. `unit_price` is captured at order time so historical
/// orders stay accurate when the product price changes later.
#[derive(Debug, FromRow)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: f64,
}
