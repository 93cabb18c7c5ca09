//! # Table Transfer Repository
//!
//! Moves an order to another table and keeps an audit row of the move.
//! The order update and the audit row are written in one transaction: a
//! transfer record never exists without the order pointing at its
//! `to_table_id`, and the reverse.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::info;

use crate::error::{DbError, DbResult};
use crate::repository::order::order_unavailable_in;
use resto_core::validation::validate_transfer;
use resto_core::{NewTransfer, OrderStatus, TableTransfer};

const TRANSFER_COLUMNS: &str = r#"
    id, order_id, from_table_id, to_table_id, transferred_by, reason, transferred_at
"#;

/// Repository for table transfers.
#[derive(Debug, Clone)]
pub struct TransferRepository {
    pool: SqlitePool,
}

impl TransferRepository {
    /// Creates a new TransferRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransferRepository { pool }
    }

    /// Moves an order to `to_table_id` and records the transfer.
    ///
    /// ## Errors
    /// - `Domain(Validation)` - from and to are the same table
    /// - `NotFound` - order missing
    /// - `Domain(InvalidOrderStatus)` - order is void
    pub async fn transfer(&self, new: &NewTransfer) -> DbResult<TableTransfer> {
        validate_transfer(new)?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        move_order_in(&mut tx, new.order_id, new.to_table_id).await?;

        let result = sqlx::query(
            r#"
            INSERT INTO table_transfers (
                order_id, from_table_id, to_table_id, transferred_by, reason, transferred_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(new.order_id)
        .bind(new.from_table_id)
        .bind(new.to_table_id)
        .bind(new.transferred_by)
        .bind(&new.reason)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let id = result.last_insert_rowid();
        tx.commit().await?;

        info!(
            transfer_id = id,
            order_id = new.order_id,
            from_table = new.from_table_id,
            to_table = new.to_table_id,
            "Order transferred"
        );

        self.get(id).await
    }

    /// Corrects an existing transfer and re-points the order again.
    pub async fn update(&self, id: i64, new: &NewTransfer) -> DbResult<TableTransfer> {
        validate_transfer(new)?;

        let mut tx = self.pool.begin().await?;

        move_order_in(&mut tx, new.order_id, new.to_table_id).await?;

        let result = sqlx::query(
            r#"
            UPDATE table_transfers SET
                order_id = ?1,
                from_table_id = ?2,
                to_table_id = ?3,
                transferred_by = ?4,
                reason = ?5
            WHERE id = ?6
            "#,
        )
        .bind(new.order_id)
        .bind(new.from_table_id)
        .bind(new.to_table_id)
        .bind(new.transferred_by)
        .bind(&new.reason)
        .bind(id)
        .execute(&mut *tx)
        .await?;

        // Dropping the transaction also undoes the order move
        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Table transfer", id));
        }

        tx.commit().await?;

        info!(transfer_id = id, order_id = new.order_id, "Transfer updated");
        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> DbResult<TableTransfer> {
        let sql = format!("SELECT {TRANSFER_COLUMNS} FROM table_transfers WHERE id = ?1");

        sqlx::query_as::<_, TableTransfer>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Table transfer", id))
    }

    /// All transfers, newest first.
    pub async fn list(&self) -> DbResult<Vec<TableTransfer>> {
        let sql = format!(
            "SELECT {TRANSFER_COLUMNS} FROM table_transfers ORDER BY transferred_at DESC, id DESC"
        );

        Ok(sqlx::query_as::<_, TableTransfer>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Removes the audit row. The order stays where it is.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM table_transfers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Table transfer", id));
        }

        info!(transfer_id = id, "Transfer deleted");
        Ok(())
    }
}

/// Points a non-void order at `table_id`.
async fn move_order_in(conn: &mut SqliteConnection, order_id: i64, table_id: i64) -> DbResult<()> {
    let result = sqlx::query(
        "UPDATE orders SET table_id = ?1, updated_at = ?2 WHERE id = ?3 AND status != ?4",
    )
    .bind(table_id)
    .bind(Utc::now())
    .bind(order_id)
    .bind(OrderStatus::Void)
    .execute(&mut *conn)
    .await?;

    if result.rows_affected() == 0 {
        return Err(order_unavailable_in(conn, order_id).await);
    }

    Ok(())
}
