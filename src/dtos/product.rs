// src/dtos/product.rs
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Deserialize, Validate)]
pub struct CreateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Product name must be between 1 and 100 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 50, message = "SKU must be between 1 and 50 characters"))]
    pub sku: String,
    #[validate(range(min = 0.0, max = 999999.99, message = "Price must be between 0 and 999,999.99"))]
    pub price: f64,
    #[validate(range(min = 0, max = 999999, message = "Stock must be between 0 and 999,999"))]
    pub stock: i64,
}

/// Partial update: omitted fields keep their current value.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProductRequest {
    #[validate(length(min = 1, max = 100, message = "Product name must be between 1 and 100 characters"))]
    pub name: Option<String>,
    #[validate(length(min = 1, max = 50, message = "SKU must be between 1 and 50 characters"))]
    pub sku: Option<String>,
    #[validate(range(min = 0.0, max = 999999.99, message = "Price must be between 0 and 999,999.99"))]
    pub price: Option<f64>,
    #[validate(range(min = 0, max = 999999, message = "Stock must be between 0 and 999,999"))]
    pub stock: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub stock: i64,
    pub created_at: String,
}

// Convert from Model to Response DTO
impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            id: product.id,
            sku: product.sku,
            name: product.name,
            price: product.price,
            stock: product.stock,
            created_at: product.created_at.to_rfc3339(),
        }
    }
}
