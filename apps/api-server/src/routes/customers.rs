//! # Customer Routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{Customer, CustomerUpdate, CustomerVisit, NewCustomer};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/customers", post(create_customer).get(list_customers))
        .route(
            "/customers/{id}",
            get(get_customer)
                .put(update_customer)
                .delete(delete_customer),
        )
        .route("/customers/{id}/visits", get(customer_visits))
}

async fn create_customer(
    State(state): State<AppState>,
    Json(new): Json<NewCustomer>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    let customer = state.db.customers().create(&new).await?;
    Ok((StatusCode::CREATED, Json(customer)))
}

async fn list_customers(State(state): State<AppState>) -> ApiResult<Json<Vec<Customer>>> {
    Ok(Json(state.db.customers().list().await?))
}

async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.db.customers().get(id).await?))
}

async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<CustomerUpdate>,
) -> ApiResult<Json<Customer>> {
    Ok(Json(state.db.customers().update(id, &update).await?))
}

async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db.customers().soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Visit history, most recent first.
async fn customer_visits(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<CustomerVisit>>> {
    Ok(Json(state.db.visits().list_for_customer(id).await?))
}
