//! # Staff Routes
//!
//! PINs are accepted on create and update but never returned.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{NewStaff, Staff, StaffUpdate};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/staff", post(create_staff).get(list_staff))
        .route(
            "/staff/{id}",
            get(get_staff).put(update_staff).delete(delete_staff),
        )
        .route("/staff/{id}/verify-pin", post(verify_pin))
}

#[derive(Deserialize)]
pub struct PinCheck {
    pub pin_code: String,
}

#[derive(Debug, Serialize)]
pub struct PinCheckResult {
    pub valid: bool,
}

async fn create_staff(
    State(state): State<AppState>,
    Json(new): Json<NewStaff>,
) -> ApiResult<(StatusCode, Json<Staff>)> {
    let staff = state.db.staff().create(&new).await?;
    Ok((StatusCode::CREATED, Json(staff)))
}

async fn list_staff(State(state): State<AppState>) -> ApiResult<Json<Vec<Staff>>> {
    Ok(Json(state.db.staff().list().await?))
}

async fn get_staff(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<Json<Staff>> {
    Ok(Json(state.db.staff().get(id).await?))
}

async fn update_staff(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<StaffUpdate>,
) -> ApiResult<Json<Staff>> {
    Ok(Json(state.db.staff().update(id, &update).await?))
}

async fn delete_staff(State(state): State<AppState>, Path(id): Path<i64>) -> ApiResult<StatusCode> {
    state.db.staff().soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Always 200; `valid` says whether the PIN opened the till.
async fn verify_pin(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(check): Json<PinCheck>,
) -> ApiResult<Json<PinCheckResult>> {
    let valid = state.db.staff().verify_pin(id, &check.pin_code).await?;
    Ok(Json(PinCheckResult { valid }))
}
