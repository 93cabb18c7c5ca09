//! # Order Routes
//!
//! ## Order Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /api/orders  { table_id, outlet_id, items: [...] }               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Json<NewOrder> extractor        malformed body ──► 400/422 (axum)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  OrderRepository::place_order    one transaction: header, items,       │
//! │       │                          exclusions, stock decrements          │
//! │       ▼                                                                 │
//! │  201 { id, order_number, order } or ApiError                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderUpdate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders", post(place_order).get(list_orders))
        .route(
            "/orders/{id}",
            get(get_order).put(update_order).delete(void_order),
        )
        .route("/orders/{id}/add", post(add_item))
}

/// Response body for a placed order.
#[derive(Debug, Serialize, Deserialize)]
pub struct OrderCreated {
    pub id: i64,
    pub order_number: String,
    pub order: Order,
}

#[derive(Debug, Deserialize)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
}

async fn place_order(
    State(state): State<AppState>,
    Json(new): Json<NewOrder>,
) -> ApiResult<(StatusCode, Json<OrderCreated>)> {
    let order = state.db.orders().place_order(&new).await?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreated {
            id: order.id,
            order_number: order.order_number.clone(),
            order,
        }),
    ))
}

async fn add_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(item): Json<NewOrderItem>,
) -> ApiResult<(StatusCode, Json<OrderItem>)> {
    let item = state.db.orders().add_item(id, &item).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn update_order(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<OrderUpdate>,
) -> ApiResult<Json<Order>> {
    Ok(Json(state.db.orders().update(id, &update).await?))
}

async fn list_orders(
    State(state): State<AppState>,
    Query(filter): Query<OrderFilter>,
) -> ApiResult<Json<Vec<Order>>> {
    Ok(Json(state.db.orders().list(filter.status).await?))
}

async fn get_order(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Order>> {
    Ok(Json(state.db.orders().get(id).await?))
}

/// Voids the order using the configured stock policy.
async fn void_order(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Order>> {
    let policy = state.config.void_policy();
    let order = state.db.orders().void(id, policy).await?;

    info!(order_id = id, ?policy, "Order voided via API");
    Ok(Json(order))
}
