//! # Catalog Routes
//!
//! Categories, menu items and the recipe lines linking menu items to
//! ingredients.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;
use resto_core::{
    Category, MenuItem, MenuItemDetail, MenuItemUpdate, NewCategory, NewMenuItem, NewRecipeLine,
    RecipeLine, RecipeLineUpdate,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/menu/category", post(create_category).get(list_categories))
        .route("/menu/category/{id}", delete(delete_category))
        .route("/menu/menu-items", post(create_menu_item).get(list_menu_items))
        .route("/menu/menu-items/active", get(list_active_menu_items))
        .route("/menu/menu-items/search", get(search_menu_items))
        .route(
            "/menu/menu-items/{id}",
            get(get_menu_item)
                .put(update_menu_item)
                .delete(delete_menu_item),
        )
        .route("/menu/menu-items/{id}/detail", get(menu_item_detail))
        .route("/menu/menu-items/{id}/ingredients", get(list_recipe_lines))
        .route("/menu-ingredients", post(add_recipe_line))
        .route(
            "/menu-ingredients/{id}",
            put(update_recipe_line).delete(delete_recipe_line),
        )
}

#[derive(Debug, Deserialize)]
pub struct MenuFilter {
    pub category_id: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

// =============================================================================
// Categories
// =============================================================================

async fn create_category(
    State(state): State<AppState>,
    Json(new): Json<NewCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let category = state.db.catalog().create_category(&new).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.db.catalog().list_categories().await?))
}

async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db.catalog().delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// =============================================================================
// Menu Items
// =============================================================================

/// Creates a menu item. It starts inactive when it costs more than it sells for.
async fn create_menu_item(
    State(state): State<AppState>,
    Json(new): Json<NewMenuItem>,
) -> ApiResult<(StatusCode, Json<MenuItem>)> {
    let item = state.db.catalog().create_menu_item(&new).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

async fn list_menu_items(
    State(state): State<AppState>,
    Query(filter): Query<MenuFilter>,
) -> ApiResult<Json<Vec<MenuItem>>> {
    let items = match filter.category_id {
        Some(category_id) => state.db.catalog().list_by_category(category_id).await?,
        None => state.db.catalog().list_menu_items(false).await?,
    };
    Ok(Json(items))
}

async fn list_active_menu_items(State(state): State<AppState>) -> ApiResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.db.catalog().list_menu_items(true).await?))
}

async fn search_menu_items(
    State(state): State<AppState>,
    Query(search): Query<SearchQuery>,
) -> ApiResult<Json<Vec<MenuItem>>> {
    Ok(Json(state.db.catalog().search_menu_items(&search.q).await?))
}

async fn get_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(state.db.catalog().get_menu_item(id).await?))
}

async fn update_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<MenuItemUpdate>,
) -> ApiResult<Json<MenuItem>> {
    Ok(Json(state.db.catalog().update_menu_item(id, &update).await?))
}

async fn delete_menu_item(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db.catalog().delete_menu_item(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn menu_item_detail(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<MenuItemDetail>> {
    Ok(Json(state.db.catalog().menu_item_detail(id).await?))
}

// =============================================================================
// Recipe Lines
// =============================================================================

async fn list_recipe_lines(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Vec<RecipeLine>>> {
    Ok(Json(state.db.catalog().recipe_lines(id).await?))
}

async fn add_recipe_line(
    State(state): State<AppState>,
    Json(new): Json<NewRecipeLine>,
) -> ApiResult<(StatusCode, Json<RecipeLine>)> {
    let line = state.db.catalog().add_recipe_line(&new).await?;
    Ok((StatusCode::CREATED, Json(line)))
}

async fn update_recipe_line(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(update): Json<RecipeLineUpdate>,
) -> ApiResult<Json<RecipeLine>> {
    Ok(Json(state.db.catalog().update_recipe_line(id, &update).await?))
}

async fn delete_recipe_line(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state.db.catalog().delete_recipe_line(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
