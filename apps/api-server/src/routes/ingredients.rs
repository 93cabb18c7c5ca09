//! # Ingredient Routes
//!
//! Ingredient CRUD, manual stock adjustments and the movement ledger.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use tracing::info;

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{Ingredient, IngredientUpdate, NewIngredient, StockAdjustment, StockMovement};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/ingredients", post(create_ingredient).get(list_ingredients))
        .route(
            "/ingredients/{id}",
            get(get_ingredient)
                .put(update_ingredient)
                .delete(delete_ingredient),
        )
        .route("/ingredients/{id}/adjust", post(adjust_stock))
        .route("/ingredients/{id}/movements", get(list_movements))
}

async fn create_ingredient(
    State(state): State<AppState>,
    Json(new): Json<NewIngredient>,
) -> ApiResult<(StatusCode, Json<Ingredient>)> {
    let ingredient = state.db.ingredients().create(&new).await?;
    Ok((StatusCode::CREATED, Json(ingredient)))
}

async fn list_ingredients(State(state): State<AppState>) -> ApiResult<Json<Vec<Ingredient>>> {
    Ok(Json(state.db.ingredients().list().await?))
}

async fn get_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Ingredient>> {
    Ok(Json(state.db.ingredients().get(id).await?))
}

async fn update_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<IngredientUpdate>,
) -> ApiResult<Json<Ingredient>> {
    Ok(Json(state.db.ingredients().update(id, &update).await?))
}

async fn delete_ingredient(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db.ingredients().soft_delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Deliveries (positive delta) and waste or corrections (negative delta).
async fn adjust_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(adjustment): Json<StockAdjustment>,
) -> ApiResult<Json<Ingredient>> {
    let ingredient = state.db.ingredients().adjust(id, &adjustment).await?;

    info!(
        ingredient_id = id,
        delta = adjustment.delta,
        quantity = ingredient.quantity,
        "Stock adjusted via API"
    );
    Ok(Json(ingredient))
}

async fn list_movements(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<StockMovement>>> {
    Ok(Json(state.db.ingredients().movements(id).await?))
}
