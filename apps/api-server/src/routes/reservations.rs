//! # Reservation Routes

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{NewReservation, Reservation, ReservationSort};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/reservations",
            get(list_reservations).post(create_reservation),
        )
        .route(
            "/reservations/{id}",
            get(get_reservation)
                .put(update_reservation)
                .delete(delete_reservation),
        )
}

#[derive(Debug, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub sort_by: String,
}

async fn create_reservation(
    State(state): State<AppState>,
    Json(new): Json<NewReservation>,
) -> ApiResult<(StatusCode, Json<Reservation>)> {
    let reservation = state.db.reservations().create(&new).await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// `?sort_by=reservation_time|status|table`; unknown keys are a 400.
async fn list_reservations(
    State(state): State<AppState>,
    Query(query): Query<SortQuery>,
) -> ApiResult<Json<Vec<Reservation>>> {
    let sort: ReservationSort = query.sort_by.parse()?;
    Ok(Json(state.db.reservations().list(sort).await?))
}

async fn get_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Reservation>> {
    Ok(Json(state.db.reservations().get(id).await?))
}

async fn update_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(new): Json<NewReservation>,
) -> ApiResult<Json<Reservation>> {
    Ok(Json(state.db.reservations().update(id, &new).await?))
}

async fn delete_reservation(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db.reservations().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
