// src/handlers/product.rs
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use sqlx::error::ErrorKind;
use sqlx::Error as SqlxError;
use tracing::instrument;

use crate::dtos::product::{CreateProductRequest, ProductResponse, UpdateProductRequest};
use crate::error::AppError;
use crate::models::product::Product;
use crate::state::AppState;
use crate::validation::validate_payload;

fn map_unique_violation(err: SqlxError, message: &str) -> AppError {
    match err {
        SqlxError::Database(db_err) if matches!(db_err.kind(), ErrorKind::UniqueViolation) => {
            AppError::conflict(message)
        }
        other => other.into(),
    }
}

// GET /products - List all products
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductResponse>>, AppError> {
    let products = sqlx::query_as::<_, Product>(
        "SELECT id, sku, name, price, stock, created_at FROM products ORDER BY name",
    )
    .fetch_all(&state.db_pool)
    .await?;

    Ok(Json(products.into_iter().map(ProductResponse::from).collect()))
}

// GET /products/:id - Get single product
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductResponse>, AppError> {
    let product = sqlx::query_as::<_, Product>(
        "SELECT id, sku, name, price, stock, created_at FROM products WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// POST /products - Create new product
#[instrument(skip(state, payload))]
pub async fn create_product(
    State(state): State<AppState>,
    Json(payload): Json<CreateProductRequest>,
) -> Result<(StatusCode, Json<ProductResponse>), AppError> {
    validate_payload(&payload)?;

    let product = sqlx::query_as::<_, Product>(
        "INSERT INTO products (sku, name, price, stock, created_at)
         VALUES ($1, $2, $3, $4, $5)
         RETURNING id, sku, name, price, stock, created_at",
    )
    .bind(&payload.sku)
    .bind(&payload.name)
    .bind(payload.price)
    .bind(payload.stock)
    .bind(Utc::now())
    .fetch_one(&state.db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "A product with this SKU already exists"))?;

    Ok((StatusCode::CREATED, Json(ProductResponse::from(product))))
}

// PUT /products/:id - Update product (partial, COALESCE semantics)
#[instrument(skip(state, payload), fields(id))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProductRequest>,
) -> Result<Json<ProductResponse>, AppError> {
    validate_payload(&payload)?;

    let product = sqlx::query_as::<_, Product>(
        "UPDATE products SET
         sku = COALESCE($1, sku),
         name = COALESCE($2, name),
         price = COALESCE($3, price),
         stock = COALESCE($4, stock)
         WHERE id = $5
         RETURNING id, sku, name, price, stock, created_at",
    )
    .bind(payload.sku)
    .bind(payload.name)
    .bind(payload.price)
    .bind(payload.stock)
    .bind(id)
    .fetch_optional(&state.db_pool)
    .await
    .map_err(|e| map_unique_violation(e, "A product with this SKU already exists"))?
    .ok_or_else(|| AppError::not_found("Product not found"))?;

    Ok(Json(ProductResponse::from(product)))
}

// DELETE /products/:id - Delete product (refused while order history exists)
#[instrument(skip(state), fields(id))]
pub async fn delete_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<()>, AppError> {
    let referenced: i64 =
        sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM order_items WHERE product_id = $1)")
            .bind(id)
            .fetch_one(&state.db_pool)
            .await?;

    if referenced != 0 {
        return Err(AppError::conflict(
            "Cannot delete product: it is referenced by existing orders",
        ));
    }

    let result = sqlx::query("DELETE FROM products WHERE id = $1")
        .bind(id)
        .execute(&state.db_pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::not_found("Product not found"));
    }

    Ok(Json(()))
}
