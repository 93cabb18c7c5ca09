//! # Ingredient Repository
//!
//! Ingredient stock and the append-only stock movement ledger.
//!
//! ## Conditional Decrement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Two orders race for the last 3.0 kg of rice                           │
//! │                                                                         │
//! │  Order A: UPDATE ... quantity = quantity - 3.0                          │
//! │           WHERE id = rice AND quantity >= 3.0      → 1 row  ✓          │
//! │                                                                         │
//! │  Order B: (waits for A's write lock, then)                             │
//! │           UPDATE ... WHERE id = rice AND quantity >= 3.0               │
//! │                                                    → 0 rows ✗          │
//! │           read stock → InsufficientStock { available: 0.0 }            │
//! │                                                                         │
//! │  The check and the decrement are one statement evaluated by SQLite,    │
//! │  so no reader ever acts on a stale quantity.                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use resto_core::validation::{validate_name, validate_stock_quantity};
use resto_core::{
    CoreError, Ingredient, IngredientUpdate, MovementReason, NewIngredient, StockAdjustment,
    StockMovement, ValidationError,
};

const INGREDIENT_COLUMNS: &str = r#"
    id, name, quantity, unit, is_allergen, is_active, description, created_at, updated_at
"#;

/// Repository for ingredient stock.
#[derive(Debug, Clone)]
pub struct IngredientRepository {
    pool: SqlitePool,
}

impl IngredientRepository {
    /// Creates a new IngredientRepository.
    pub fn new(pool: SqlitePool) -> Self {
        IngredientRepository { pool }
    }

    /// Creates an ingredient with its opening stock.
    pub async fn create(&self, new: &NewIngredient) -> DbResult<Ingredient> {
        validate_name("name", &new.name)?;
        validate_name("unit", &new.unit)?;
        validate_stock_quantity("quantity", new.quantity)?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO ingredients (
                name, quantity, unit, is_allergen, is_active, description,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?6, ?6)
            "#,
        )
        .bind(new.name.trim())
        .bind(new.quantity)
        .bind(new.unit.trim())
        .bind(new.is_allergen)
        .bind(&new.description)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(ingredient_id = id, name = %new.name, "Ingredient created");

        self.get(id).await
    }

    /// Gets a live ingredient by ID.
    pub async fn get(&self, id: i64) -> DbResult<Ingredient> {
        let sql = format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE id = ?1 AND deleted_at IS NULL"
        );

        sqlx::query_as::<_, Ingredient>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Ingredient", id))
    }

    /// Lists live ingredients by name.
    pub async fn list(&self) -> DbResult<Vec<Ingredient>> {
        let sql = format!(
            "SELECT {INGREDIENT_COLUMNS} FROM ingredients WHERE deleted_at IS NULL ORDER BY name, id"
        );

        let ingredients = sqlx::query_as::<_, Ingredient>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(ingredients)
    }

    /// Updates descriptive fields. Stock is never touched here.
    pub async fn update(&self, id: i64, update: &IngredientUpdate) -> DbResult<Ingredient> {
        if let Some(name) = &update.name {
            validate_name("name", name)?;
        }
        if let Some(unit) = &update.unit {
            validate_name("unit", unit)?;
        }

        let result = sqlx::query(
            r#"
            UPDATE ingredients SET
                name = COALESCE(?1, name),
                unit = COALESCE(?2, unit),
                is_allergen = COALESCE(?3, is_allergen),
                is_active = COALESCE(?4, is_active),
                description = COALESCE(?5, description),
                updated_at = ?6
            WHERE id = ?7 AND deleted_at IS NULL
            "#,
        )
        .bind(update.name.as_deref().map(str::trim))
        .bind(update.unit.as_deref().map(str::trim))
        .bind(update.is_allergen)
        .bind(update.is_active)
        .bind(&update.description)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Ingredient", id));
        }

        self.get(id).await
    }

    /// Tombstones an ingredient.
    pub async fn soft_delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE ingredients SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Ingredient", id));
        }

        info!(ingredient_id = id, "Ingredient deleted");
        Ok(())
    }

    /// Applies a manual stock correction and records it in the ledger.
    ///
    /// ## Rules
    /// - Positive deltas always succeed
    /// - Negative deltas may not take stock below zero
    ///   (`InsufficientStock` with the requested removal)
    pub async fn adjust(&self, id: i64, adjustment: &StockAdjustment) -> DbResult<Ingredient> {
        let delta = adjustment.delta;
        if !delta.is_finite() || delta == 0.0 {
            return Err(ValidationError::InvalidFormat {
                field: "delta".to_string(),
                reason: "must be a non-zero finite number".to_string(),
            }
            .into());
        }

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE ingredients SET quantity = quantity + ?1, updated_at = ?2
            WHERE id = ?3 AND deleted_at IS NULL AND quantity + ?1 >= 0
            "#,
        )
        .bind(delta)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(shortage_or_missing(&mut tx, id, -delta).await);
        }

        record_movement(&mut tx, id, None, delta, MovementReason::ManualAdjustment).await?;
        tx.commit().await?;

        info!(ingredient_id = id, delta, "Stock adjusted");
        self.get(id).await
    }

    /// Returns the stock ledger of an ingredient, oldest first.
    pub async fn movements(&self, id: i64) -> DbResult<Vec<StockMovement>> {
        self.get(id).await?;

        let movements = sqlx::query_as::<_, StockMovement>(
            r#"
            SELECT id, ingredient_id, order_item_id, delta, reason, created_at
            FROM stock_movements
            WHERE ingredient_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(movements)
    }

    // =========================================================================
    // Transaction-scoped operations
    // =========================================================================

    /// Decrements stock by `quantity` if enough is available.
    ///
    /// Runs on the caller's transaction. On success an `order_consumption`
    /// movement is appended; on shortage the caller's transaction must be
    /// abandoned (the returned error does that when propagated with `?`).
    pub(crate) async fn consume_in(
        conn: &mut SqliteConnection,
        ingredient_id: i64,
        quantity: f64,
        order_item_id: i64,
    ) -> DbResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE ingredients SET quantity = quantity - ?1, updated_at = ?2
            WHERE id = ?3 AND deleted_at IS NULL AND quantity >= ?1
            "#,
        )
        .bind(quantity)
        .bind(Utc::now())
        .bind(ingredient_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(shortage_or_missing(conn, ingredient_id, quantity).await);
        }

        record_movement(
            conn,
            ingredient_id,
            Some(order_item_id),
            -quantity,
            MovementReason::OrderConsumption,
        )
        .await?;

        debug!(ingredient_id, quantity, order_item_id, "Stock consumed");
        Ok(())
    }

    /// Adds `quantity` back to stock and records a `void_restock` movement.
    pub(crate) async fn restock_in(
        conn: &mut SqliteConnection,
        ingredient_id: i64,
        quantity: f64,
        order_item_id: i64,
    ) -> DbResult<()> {
        sqlx::query(
            "UPDATE ingredients SET quantity = quantity + ?1, updated_at = ?2 WHERE id = ?3",
        )
        .bind(quantity)
        .bind(Utc::now())
        .bind(ingredient_id)
        .execute(&mut *conn)
        .await?;

        record_movement(
            conn,
            ingredient_id,
            Some(order_item_id),
            quantity,
            MovementReason::VoidRestock,
        )
        .await?;

        debug!(ingredient_id, quantity, order_item_id, "Stock restocked");
        Ok(())
    }
}

async fn record_movement(
    conn: &mut SqliteConnection,
    ingredient_id: i64,
    order_item_id: Option<i64>,
    delta: f64,
    reason: MovementReason,
) -> DbResult<()> {
    sqlx::query(
        r#"
        INSERT INTO stock_movements (ingredient_id, order_item_id, delta, reason, created_at)
        VALUES (?1, ?2, ?3, ?4, ?5)
        "#,
    )
    .bind(ingredient_id)
    .bind(order_item_id)
    .bind(delta)
    .bind(reason)
    .bind(Utc::now())
    .execute(conn)
    .await?;

    Ok(())
}

/// Explains why a conditional decrement matched no row.
async fn shortage_or_missing(conn: &mut SqliteConnection, ingredient_id: i64, requested: f64) -> DbError {
    let row: Result<Option<(String, f64)>, sqlx::Error> = sqlx::query_as(
        "SELECT name, quantity FROM ingredients WHERE id = ?1 AND deleted_at IS NULL",
    )
    .bind(ingredient_id)
    .fetch_optional(conn)
    .await;

    match row {
        Ok(Some((name, available))) => CoreError::InsufficientStock {
            ingredient_id,
            name,
            available,
            requested,
        }
        .into(),
        Ok(None) => DbError::not_found("Ingredient", ingredient_id),
        Err(e) => e.into(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
