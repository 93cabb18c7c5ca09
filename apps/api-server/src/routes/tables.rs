//! # Dining Table Routes

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{DiningTable, DiningTableUpdate, NewDiningTable, TableStatus};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/tables", get(list_tables).post(create_table))
        .route(
            "/tables/{id}",
            get(get_table).put(update_table).delete(delete_table),
        )
}

/// `?outlet_id=&status=`, both optional.
#[derive(Debug, Deserialize)]
pub struct TableFilter {
    pub outlet_id: Option<i64>,
    pub status: Option<TableStatus>,
}

async fn create_table(
    State(state): State<AppState>,
    Json(new): Json<NewDiningTable>,
) -> ApiResult<(StatusCode, Json<DiningTable>)> {
    let table = state.db.tables().create(&new).await?;
    Ok((StatusCode::CREATED, Json(table)))
}

async fn list_tables(
    State(state): State<AppState>,
    Query(filter): Query<TableFilter>,
) -> ApiResult<Json<Vec<DiningTable>>> {
    Ok(Json(
        state.db.tables().list(filter.outlet_id, filter.status).await?,
    ))
}

async fn get_table(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<DiningTable>> {
    Ok(Json(state.db.tables().get(id).await?))
}

async fn update_table(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<DiningTableUpdate>,
) -> ApiResult<Json<DiningTable>> {
    Ok(Json(state.db.tables().update(id, &update).await?))
}

async fn delete_table(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.db.tables().soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
