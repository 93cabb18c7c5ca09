//! # Catalog Repository
//!
//! Menu categories, menu items and recipe lines (the bill of materials the
//! order engine expands into ingredient consumption).
//!
//! ## Visibility Rules
//! ```text
//! ┌───────────────────────┬──────────────────┬───────────────────────────┐
//! │ State                 │ Listed / fetched │ Orderable                 │
//! ├───────────────────────┼──────────────────┼───────────────────────────┤
//! │ is_active = true      │ yes              │ yes                       │
//! │ is_active = false     │ yes (not /active)│ yes, price is captured    │
//! │ deleted_at set        │ no               │ no (NotFound)             │
//! └───────────────────────┴──────────────────┴───────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::types::Json;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use resto_core::validation::{
    validate_money_cents, validate_name, validate_new_menu_item, validate_price_cents,
    validate_search_query, validate_stock_quantity, validate_tags,
};
use resto_core::{
    Category, MenuItem, MenuItemDetail, MenuItemUpdate, NewCategory, NewMenuItem, NewRecipeLine,
    RecipeLine, RecipeLineDetail, RecipeLineUpdate,
};

const MENU_ITEM_COLUMNS: &str = r#"
    id, category_id, sku, name, description, price_cents, cost_cents, is_active,
    preparation_time_minutes, tags, created_at, updated_at
"#;

const RECIPE_COLUMNS: &str =
    "id, menu_item_id, ingredient_id, qty_per_unit, is_removable, is_default";

/// Repository for the menu catalog.
#[derive(Debug, Clone)]
pub struct CatalogRepository {
    pool: SqlitePool,
}

impl CatalogRepository {
    /// Creates a new CatalogRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CatalogRepository { pool }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    pub async fn create_category(&self, new: &NewCategory) -> DbResult<Category> {
        validate_name("name", &new.name)?;

        let now = Utc::now();
        let result = sqlx::query("INSERT INTO categories (name, created_at) VALUES (?1, ?2)")
            .bind(new.name.trim())
            .bind(now)
            .execute(&self.pool)
            .await?;

        let id = result.last_insert_rowid();
        debug!(category_id = id, name = %new.name, "Category created");

        Ok(Category {
            id,
            name: new.name.trim().to_string(),
            created_at: now,
        })
    }

    pub async fn list_categories(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>(
            "SELECT id, name, created_at FROM categories WHERE deleted_at IS NULL ORDER BY name, id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(categories)
    }

    pub async fn delete_category(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE categories SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Category", id));
        }

        info!(category_id = id, "Category deleted");
        Ok(())
    }

    async fn ensure_category(&self, id: i64) -> DbResult<()> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM categories WHERE id = ?1 AND deleted_at IS NULL")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        found
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("Category", id))
    }

    // =========================================================================
    // Menu Items
    // =========================================================================

    /// Creates a menu item.
    ///
    /// ## Profitability Rule
    /// An item whose cost exceeds its price is created inactive, whatever
    /// `is_active` the caller asked for. See [`NewMenuItem::starts_active`].
    pub async fn create_menu_item(&self, new: &NewMenuItem) -> DbResult<MenuItem> {
        validate_new_menu_item(new)?;
        self.ensure_category(new.category_id).await?;

        let is_active = new.starts_active();
        if new.is_active != Some(false) && new.is_unprofitable() {
            info!(
                sku = %new.sku,
                price_cents = new.price_cents,
                cost_cents = new.cost_cents,
                "Menu item costs more than its price, creating inactive"
            );
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO menu_items (
                category_id, sku, name, description, price_cents, cost_cents,
                is_active, preparation_time_minutes, tags, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?10)
            "#,
        )
        .bind(new.category_id)
        .bind(new.sku.trim())
        .bind(new.name.trim())
        .bind(&new.description)
        .bind(new.price_cents)
        .bind(new.cost_cents)
        .bind(is_active)
        .bind(new.preparation_time_minutes)
        .bind(Json(tidy_tags(&new.tags)))
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => DbError::duplicate("sku", new.sku.trim()),
            other => other,
        })?;

        let id = result.last_insert_rowid();
        debug!(menu_item_id = id, sku = %new.sku, "Menu item created");

        self.get_menu_item(id).await
    }

    pub async fn get_menu_item(&self, id: i64) -> DbResult<MenuItem> {
        let mut conn = self.pool.acquire().await?;
        Self::menu_item_in(&mut conn, id).await
    }

    /// Lists live menu items, optionally only the active ones.
    pub async fn list_menu_items(&self, active_only: bool) -> DbResult<Vec<MenuItem>> {
        let sql = format!(
            r#"
            SELECT {MENU_ITEM_COLUMNS} FROM menu_items
            WHERE deleted_at IS NULL AND (?1 = 0 OR is_active = 1)
            ORDER BY name, id
            "#
        );

        let items = sqlx::query_as::<_, MenuItem>(&sql)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Case-insensitive name search.
    pub async fn search_menu_items(&self, query: &str) -> DbResult<Vec<MenuItem>> {
        let query = validate_search_query(query)?;
        let pattern = format!("%{}%", escape_like(&query));

        let sql = format!(
            r#"
            SELECT {MENU_ITEM_COLUMNS} FROM menu_items
            WHERE deleted_at IS NULL AND name LIKE ?1 ESCAPE '\'
            ORDER BY name, id
            "#
        );

        let items = sqlx::query_as::<_, MenuItem>(&sql)
            .bind(pattern)
            .fetch_all(&self.pool)
            .await?;

        debug!(query = %query, results = items.len(), "Menu search");
        Ok(items)
    }

    pub async fn list_by_category(&self, category_id: i64) -> DbResult<Vec<MenuItem>> {
        self.ensure_category(category_id).await?;

        let sql = format!(
            r#"
            SELECT {MENU_ITEM_COLUMNS} FROM menu_items
            WHERE deleted_at IS NULL AND category_id = ?1
            ORDER BY name, id
            "#
        );

        let items = sqlx::query_as::<_, MenuItem>(&sql)
            .bind(category_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Partial update. Does not re-run the profitability rule.
    pub async fn update_menu_item(&self, id: i64, update: &MenuItemUpdate) -> DbResult<MenuItem> {
        if let Some(name) = &update.name {
            validate_name("name", name)?;
        }
        if let Some(price) = update.price_cents {
            validate_price_cents(price)?;
        }
        if let Some(cost) = update.cost_cents {
            validate_money_cents("cost_cents", cost)?;
        }
        if let Some(tags) = &update.tags {
            validate_tags(tags)?;
        }
        if let Some(category_id) = update.category_id {
            self.ensure_category(category_id).await?;
        }

        let result = sqlx::query(
            r#"
            UPDATE menu_items SET
                category_id = COALESCE(?1, category_id),
                name = COALESCE(?2, name),
                description = COALESCE(?3, description),
                price_cents = COALESCE(?4, price_cents),
                cost_cents = COALESCE(?5, cost_cents),
                is_active = COALESCE(?6, is_active),
                preparation_time_minutes = COALESCE(?7, preparation_time_minutes),
                tags = COALESCE(?8, tags),
                updated_at = ?9
            WHERE id = ?10 AND deleted_at IS NULL
            "#,
        )
        .bind(update.category_id)
        .bind(update.name.as_deref().map(str::trim))
        .bind(&update.description)
        .bind(update.price_cents)
        .bind(update.cost_cents)
        .bind(update.is_active)
        .bind(update.preparation_time_minutes)
        .bind(update.tags.as_deref().map(|tags| Json(tidy_tags(tags))))
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", id));
        }

        info!(menu_item_id = id, "Menu item updated");
        self.get_menu_item(id).await
    }

    pub async fn delete_menu_item(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE menu_items SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Menu item", id));
        }

        info!(menu_item_id = id, "Menu item deleted");
        Ok(())
    }

    /// A menu item with its recipe and ingredient names.
    pub async fn menu_item_detail(&self, id: i64) -> DbResult<MenuItemDetail> {
        let item = self.get_menu_item(id).await?;

        let ingredients = sqlx::query_as::<_, RecipeLineDetail>(
            r#"
            SELECT
                mi.id,
                mi.ingredient_id,
                i.name AS ingredient_name,
                i.unit,
                mi.qty_per_unit,
                mi.is_removable,
                mi.is_default,
                i.is_allergen
            FROM menu_ingredients mi
            JOIN ingredients i ON i.id = mi.ingredient_id
            WHERE mi.menu_item_id = ?1
            ORDER BY mi.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(MenuItemDetail { item, ingredients })
    }

    // =========================================================================
    // Recipe Lines
    // =========================================================================

    /// Links an ingredient to a menu item.
    pub async fn add_recipe_line(&self, new: &NewRecipeLine) -> DbResult<RecipeLine> {
        validate_stock_quantity("qty_per_unit", new.qty_per_unit)?;
        self.get_menu_item(new.menu_item_id).await?;

        let ingredient: Option<i64> =
            sqlx::query_scalar("SELECT id FROM ingredients WHERE id = ?1 AND deleted_at IS NULL")
                .bind(new.ingredient_id)
                .fetch_optional(&self.pool)
                .await?;
        if ingredient.is_none() {
            return Err(DbError::not_found("Ingredient", new.ingredient_id));
        }

        let result = sqlx::query(
            r#"
            INSERT INTO menu_ingredients (
                menu_item_id, ingredient_id, qty_per_unit, is_removable, is_default
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(new.menu_item_id)
        .bind(new.ingredient_id)
        .bind(new.qty_per_unit)
        .bind(new.is_removable)
        .bind(new.is_default)
        .execute(&self.pool)
        .await
        .map_err(|e| match DbError::from(e) {
            DbError::UniqueViolation { .. } => {
                DbError::duplicate("ingredient_id", new.ingredient_id.to_string())
            }
            other => other,
        })?;

        let id = result.last_insert_rowid();
        debug!(
            recipe_line_id = id,
            menu_item_id = new.menu_item_id,
            ingredient_id = new.ingredient_id,
            "Recipe line added"
        );

        self.get_recipe_line(id).await
    }

    /// Recipe lines of a menu item.
    pub async fn recipe_lines(&self, menu_item_id: i64) -> DbResult<Vec<RecipeLine>> {
        self.get_menu_item(menu_item_id).await?;
        let mut conn = self.pool.acquire().await?;
        Self::recipe_in(&mut conn, menu_item_id).await
    }

    pub async fn update_recipe_line(
        &self,
        id: i64,
        update: &RecipeLineUpdate,
    ) -> DbResult<RecipeLine> {
        if let Some(qty) = update.qty_per_unit {
            validate_stock_quantity("qty_per_unit", qty)?;
        }

        let result = sqlx::query(
            r#"
            UPDATE menu_ingredients SET
                qty_per_unit = COALESCE(?1, qty_per_unit),
                is_removable = COALESCE(?2, is_removable),
                is_default = COALESCE(?3, is_default)
            WHERE id = ?4
            "#,
        )
        .bind(update.qty_per_unit)
        .bind(update.is_removable)
        .bind(update.is_default)
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Recipe line", id));
        }

        self.get_recipe_line(id).await
    }

    /// Removes a recipe line. Past consumption stays in the ledger.
    pub async fn delete_recipe_line(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM menu_ingredients WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Recipe line", id));
        }

        Ok(())
    }

    async fn get_recipe_line(&self, id: i64) -> DbResult<RecipeLine> {
        let sql = format!("SELECT {RECIPE_COLUMNS} FROM menu_ingredients WHERE id = ?1");

        sqlx::query_as::<_, RecipeLine>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Recipe line", id))
    }

    // =========================================================================
    // Transaction-scoped reads (used by the order engine)
    // =========================================================================

    /// A live menu item, read on the caller's connection.
    pub(crate) async fn menu_item_in(conn: &mut SqliteConnection, id: i64) -> DbResult<MenuItem> {
        let sql = format!(
            "SELECT {MENU_ITEM_COLUMNS} FROM menu_items WHERE id = ?1 AND deleted_at IS NULL"
        );

        sqlx::query_as::<_, MenuItem>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| DbError::not_found("Menu item", id))
    }

    /// The recipe of a menu item, read on the caller's connection.
    pub(crate) async fn recipe_in(
        conn: &mut SqliteConnection,
        menu_item_id: i64,
    ) -> DbResult<Vec<RecipeLine>> {
        let sql = format!(
            "SELECT {RECIPE_COLUMNS} FROM menu_ingredients WHERE menu_item_id = ?1 ORDER BY id"
        );

        let lines = sqlx::query_as::<_, RecipeLine>(&sql)
            .bind(menu_item_id)
            .fetch_all(conn)
            .await?;

        Ok(lines)
    }
}

/// Escapes LIKE wildcards so a search for "50%" matches literally.
fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn tidy_tags(tags: &[String]) -> Vec<String> {
    tags.iter().map(|tag| tag.trim().to_string()).collect()
}

// =============================================================================
// Unit Tests
// =============================================================================
