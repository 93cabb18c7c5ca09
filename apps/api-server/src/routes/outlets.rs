//! # Outlet Routes

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{NewOutlet, Outlet, OutletUpdate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/outlets", post(create_outlet).get(list_outlets))
        .route(
            "/outlets/{id}",
            get(get_outlet).put(update_outlet).delete(delete_outlet),
        )
}

async fn create_outlet(
    State(state): State<AppState>,
    Json(new): Json<NewOutlet>,
) -> ApiResult<(StatusCode, Json<Outlet>)> {
    let outlet = state.db.outlets().create(&new).await?;
    Ok((StatusCode::CREATED, Json(outlet)))
}

async fn list_outlets(State(state): State<AppState>) -> ApiResult<Json<Vec<Outlet>>> {
    Ok(Json(state.db.outlets().list().await?))
}

async fn get_outlet(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Outlet>> {
    Ok(Json(state.db.outlets().get(id).await?))
}

async fn update_outlet(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<OutletUpdate>,
) -> ApiResult<Json<Outlet>> {
    Ok(Json(state.db.outlets().update(id, &update).await?))
}

async fn delete_outlet(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.db.outlets().soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
