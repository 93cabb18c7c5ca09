//! # Health Route
//!
//! Liveness of the database behind the server.

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tracing::warn;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/health", get(health))
}

#[derive(Debug, Serialize)]
pub struct HealthStatus {
    pub status: &'static str,
    pub database: bool,
    pub migrations_applied: usize,
    pub migrations_total: usize,
}

async fn health(State(state): State<AppState>) -> ApiResult<(StatusCode, Json<HealthStatus>)> {
    if !state.db.health_check().await {
        warn!("Health check failed: database unreachable");
        return Err(ApiError::internal("Database unreachable"));
    }

    let (total, applied) = state.db.migration_status().await?;
    let status = if applied == total { "ok" } else { "degraded" };

    Ok((
        StatusCode::OK,
        Json(HealthStatus {
            status,
            database: true,
            migrations_applied: applied,
            migrations_total: total,
        }),
    ))
}
