//! # Customer Visit Routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{CustomerVisit, CustomerVisitUpdate, NewCustomerVisit};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/visits", post(create_visit).get(list_visits))
        .route(
            "/visits/{id}",
            get(get_visit).put(update_visit).delete(delete_visit),
        )
}

async fn create_visit(
    State(state): State<AppState>,
    Json(new): Json<NewCustomerVisit>,
) -> ApiResult<(StatusCode, Json<CustomerVisit>)> {
    let visit = state.db.visits().create(&new).await?;
    Ok((StatusCode::CREATED, Json(visit)))
}

async fn list_visits(State(state): State<AppState>) -> ApiResult<Json<Vec<CustomerVisit>>> {
    Ok(Json(state.db.visits().list().await?))
}

async fn get_visit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<CustomerVisit>> {
    Ok(Json(state.db.visits().get(id).await?))
}

async fn update_visit(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<CustomerVisitUpdate>,
) -> ApiResult<Json<CustomerVisit>> {
    Ok(Json(state.db.visits().update(id, &update).await?))
}

async fn delete_visit(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.db.visits().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
