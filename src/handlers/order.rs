// src/handlers/order.rs
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

use crate::dtos::order::{CreateOrderRequest, OrderItemResponse, OrderListItem, OrderResponse};
use crate::error::AppError;
use crate::models::order::{Order, OrderItem};
use crate::models::product::Product;
use crate::state::AppState;
use crate::validation::validate_payload;

pub async fn create_order(
    State(AppState { db_pool }): State<AppState>,
    Json(req): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<OrderResponse>), AppError> {
    validate_payload(&req)?;

    // Start transaction: checks and writes must see the same stock
    let mut tx = db_pool.begin().await?;

    // Verify every item before any write. All-or-nothing: a single missing
    // product or short stock aborts the whole order.
    let mut line_items = Vec::new();
    let mut total: f64 = 0.0;

    for item in &req.items {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, sku, name, price, stock, created_at FROM products WHERE id = $1",
        )
        .bind(item.product_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| {
            AppError::validation(format!("Product with ID {} not found", item.product_id))
        })?;

        if product.stock < item.quantity {
            return Err(AppError::validation(format!(
                "Insufficient stock for product \"{}\". Available: {}, Requested: {}",
                product.name, product.stock, item.quantity
            )));
        }

        // Capture the unit price now; later product edits must not touch it
        total += item.quantity as f64 * product.price;
        line_items.push((product, item.quantity));
    }

    let order = sqlx::query_as::<_, Order>(
        "INSERT INTO orders (customer_name, notes, created_at)
         VALUES ($1, $2, $3)
         RETURNING id, customer_name, notes, created_at",
    )
    .bind(&req.customer_name)
    .bind(&req.notes)
    .bind(Utc::now())
    .fetch_one(&mut *tx)
    .await?;

    let mut item_responses = Vec::new();

    for (product, quantity) in line_items {
        let order_item = sqlx::query_as::<_, OrderItem>(
            "INSERT INTO order_items (order_id, product_id, quantity, unit_price)
             VALUES ($1, $2, $3, $4)
             RETURNING id, order_id, product_id, quantity, unit_price",
        )
        .bind(order.id)
        .bind(product.id)
        .bind(quantity)
        .bind(product.price)
        .fetch_one(&mut *tx)
        .await?;

        // Guarded decrement: if the stock read above is stale (concurrent
        // order, or the same product twice in this request), this matches no
        // row and the transaction rolls back instead of oversubscribing.
        let decremented = sqlx::query(
            "UPDATE products SET stock = stock - $1 WHERE id = $2 AND stock >= $1",
        )
        .bind(quantity)
        .bind(product.id)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            let available: i64 = sqlx::query_scalar("SELECT stock FROM products WHERE id = $1")
                .bind(product.id)
                .fetch_one(&mut *tx)
                .await?;
            return Err(AppError::validation(format!(
                "Insufficient stock for product \"{}\". Available: {}, Requested: {}",
                product.name, available, quantity
            )));
        }

        item_responses.push(OrderItemResponse {
            id: order_item.id,
            product_id: product.id,
            product_name: product.name,
            product_sku: product.sku,
            quantity,
            unit_price: product.price,
            line_total: quantity as f64 * product.price,
        });
    }

    // Commit transaction
    tx.commit().await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderResponse {
            id: order.id,
            customer_name: order.customer_name,
            notes: order.notes,
            created_at: order.created_at,
            items: item_responses,
            total,
        }),
    ))
}

pub async fn get_order(
    State(AppState { db_pool }): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<OrderResponse>, AppError> {
    fetch_order_by_id(&db_pool, id).await.map(Json)
}

pub async fn list_orders(
    State(AppState { db_pool }): State<AppState>,
) -> Result<Json<Vec<OrderListItem>>, AppError> {
    let rows = sqlx::query_as::<_, (i64, String, Option<String>, DateTime<Utc>, i64, f64)>(
        r#"SELECT o.id, o.customer_name, o.notes, o.created_at,
                  COUNT(oi.id) AS total_items,
                  COALESCE(SUM(oi.quantity * oi.unit_price), 0.0) AS total
           FROM orders o
           LEFT JOIN order_items oi ON oi.order_id = o.id
           GROUP BY o.id, o.customer_name, o.notes, o.created_at
           ORDER BY o.created_at DESC, o.id DESC"#,
    )
    .fetch_all(&db_pool)
    .await?;

    Ok(Json(
        rows.into_iter()
            .map(|(id, customer_name, notes, created_at, total_items, total)| OrderListItem {
                id,
                customer_name,
                notes,
                created_at,
                total_items,
                total,
            })
            .collect(),
    ))
}

// Helper function to fetch full order details
async fn fetch_order_by_id(db_pool: &SqlitePool, id: i64) -> Result<OrderResponse, AppError> {
    let order = sqlx::query_as::<_, Order>(
        "SELECT id, customer_name, notes, created_at FROM orders WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(db_pool)
    .await?
    .ok_or_else(|| AppError::not_found("Order not found"))?;

    let items_data = sqlx::query_as::<_, (i64, i64, String, String, i64, f64)>(
        r#"SELECT oi.id, oi.product_id, p.name AS product_name, p.sku AS product_sku,
                  oi.quantity, oi.unit_price
           FROM order_items oi
           JOIN products p ON oi.product_id = p.id
           WHERE oi.order_id = $1
           ORDER BY oi.id"#,
    )
    .bind(id)
    .fetch_all(db_pool)
    .await?;

    let mut total = 0.0;

    let items: Vec<OrderItemResponse> = items_data
        .into_iter()
        .map(|(item_id, product_id, product_name, product_sku, quantity, unit_price)| {
            let line_total = quantity as f64 * unit_price;
            total += line_total;

            OrderItemResponse {
                id: item_id,
                product_id,
                product_name,
                product_sku,
                quantity,
                unit_price,
                line_total,
            }
        })
        .collect();

    Ok(OrderResponse {
        id: order.id,
        customer_name: order.customer_name,
        notes: order.notes,
        created_at: order.created_at,
        items,
        total,
    })
}
