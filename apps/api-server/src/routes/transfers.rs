//! # Table Transfer Routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{NewTransfer, TableTransfer};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/table-transfer", get(list_transfers).post(create_transfer))
        .route(
            "/table-transfer/{id}",
            get(get_transfer).put(update_transfer).delete(delete_transfer),
        )
}

async fn create_transfer(
    State(state): State<AppState>,
    Json(new): Json<NewTransfer>,
) -> ApiResult<(StatusCode, Json<TableTransfer>)> {
    let transfer = state.db.transfers().transfer(&new).await?;
    Ok((StatusCode::CREATED, Json(transfer)))
}

async fn list_transfers(State(state): State<AppState>) -> ApiResult<Json<Vec<TableTransfer>>> {
    Ok(Json(state.db.transfers().list().await?))
}

async fn get_transfer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<TableTransfer>> {
    Ok(Json(state.db.transfers().get(id).await?))
}

async fn update_transfer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(new): Json<NewTransfer>,
) -> ApiResult<Json<TableTransfer>> {
    Ok(Json(state.db.transfers().update(id, &new).await?))
}

async fn delete_transfer(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db.transfers().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
