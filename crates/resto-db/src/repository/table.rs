//! # Dining Table Repository
//!
//! The floor plan: tables per outlet, their seat count and occupancy.
//!
//! Orders and reservations refer to tables by plain id, so retiring a
//! table (soft delete) never touches settlement history.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::outlet::OutletRepository;
use crate::error::{DbError, DbResult};
use resto_core::validation::{validate_capacity, validate_new_table, validate_table_number};
use resto_core::{DiningTable, DiningTableUpdate, NewDiningTable, TableStatus};

const TABLE_COLUMNS: &str = r#"
    id, outlet_id, table_number, capacity, location_type, status, created_at, updated_at
"#;

/// Repository for dining tables.
#[derive(Debug, Clone)]
pub struct TableRepository {
    pool: SqlitePool,
}

impl TableRepository {
    /// Creates a new TableRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TableRepository { pool }
    }

    /// Adds a table to a live outlet.
    ///
    /// ## Errors
    /// - `NotFound` - outlet missing or deleted
    /// - `UniqueViolation` - label already used by a live table of the outlet
    pub async fn create(&self, new: &NewDiningTable) -> DbResult<DiningTable> {
        validate_new_table(new)?;

        let mut tx = self.pool.begin().await?;
        OutletRepository::ensure_live_in(&mut tx, new.outlet_id).await?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO dining_tables (
                outlet_id, table_number, capacity, location_type, status,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            "#,
        )
        .bind(new.outlet_id)
        .bind(new.table_number.trim())
        .bind(new.capacity)
        .bind(&new.location_type)
        .bind(new.status)
        .bind(now)
        .execute(&mut *tx)
        .await
        .map_err(|e| duplicate_number(e, &new.table_number))?;

        tx.commit().await?;

        let id = result.last_insert_rowid();
        debug!(table_id = id, outlet_id = new.outlet_id, number = %new.table_number, "Table created");

        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> DbResult<DiningTable> {
        let sql = format!(
            "SELECT {TABLE_COLUMNS} FROM dining_tables WHERE id = ?1 AND deleted_at IS NULL"
        );

        sqlx::query_as::<_, DiningTable>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Table", id))
    }

    /// Live tables, optionally narrowed to one outlet and/or one state
    /// (e.g. the free tables of the terrace).
    pub async fn list(
        &self,
        outlet_id: Option<i64>,
        status: Option<TableStatus>,
    ) -> DbResult<Vec<DiningTable>> {
        let sql = format!(
            r#"
            SELECT {TABLE_COLUMNS} FROM dining_tables
            WHERE deleted_at IS NULL
              AND (?1 IS NULL OR outlet_id = ?1)
              AND (?2 IS NULL OR status = ?2)
            ORDER BY outlet_id, table_number
            "#
        );

        Ok(sqlx::query_as::<_, DiningTable>(&sql)
            .bind(outlet_id)
            .bind(status)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Partial update. Moving a table checks the target outlet is live.
    pub async fn update(&self, id: i64, update: &DiningTableUpdate) -> DbResult<DiningTable> {
        if let Some(number) = &update.table_number {
            validate_table_number(number)?;
        }
        if let Some(capacity) = update.capacity {
            validate_capacity(capacity)?;
        }

        let mut tx = self.pool.begin().await?;
        if let Some(outlet_id) = update.outlet_id {
            OutletRepository::ensure_live_in(&mut tx, outlet_id).await?;
        }

        let result = sqlx::query(
            r#"
            UPDATE dining_tables SET
                outlet_id = COALESCE(?1, outlet_id),
                table_number = COALESCE(?2, table_number),
                capacity = COALESCE(?3, capacity),
                location_type = COALESCE(?4, location_type),
                status = COALESCE(?5, status),
                updated_at = ?6
            WHERE id = ?7 AND deleted_at IS NULL
            "#,
        )
        .bind(update.outlet_id)
        .bind(update.table_number.as_deref().map(str::trim))
        .bind(update.capacity)
        .bind(&update.location_type)
        .bind(update.status)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await
        .map_err(|e| duplicate_number(e, update.table_number.as_deref().unwrap_or_default()))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Table", id));
        }
        tx.commit().await?;

        info!(table_id = id, status = ?update.status, "Table updated");
        self.get(id).await
    }

    pub async fn soft_delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query(
            "UPDATE dining_tables SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL",
        )
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Table", id));
        }

        info!(table_id = id, "Table deleted");
        Ok(())
    }
}

fn duplicate_number(err: sqlx::Error, number: &str) -> DbError {
    match DbError::from(err) {
        DbError::UniqueViolation { .. } => DbError::duplicate("table_number", number.trim()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::fixture;
    use resto_core::{CoreError, NewOutlet};

    fn table(outlet_id: i64, number: &str) -> NewDiningTable {
        NewDiningTable {
            outlet_id,
            table_number: number.to_string(),
            capacity: 4,
            location_type: Some("indoor".to_string()),
            status: TableStatus::Available,
        }
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let f = fixture().await;
        let tables = f.db.tables();

        let a4 = tables.create(&table(f.outlet.id, " A4 ")).await.unwrap();
        assert_eq!(a4.table_number, "A4");
        assert_eq!(a4.status, TableStatus::Available);

        let seated = tables
            .update(
                a4.id,
                &DiningTableUpdate {
                    status: Some(TableStatus::Occupied),
                    capacity: Some(6),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(seated.status, TableStatus::Occupied);
        assert_eq!(seated.capacity, 6);
        assert_eq!(seated.location_type.as_deref(), Some("indoor"));

        let free = tables
            .list(Some(f.outlet.id), Some(TableStatus::Available))
            .await
            .unwrap();
        assert!(free.is_empty());
        assert_eq!(tables.list(None, None).await.unwrap().len(), 1);

        tables.soft_delete(a4.id).await.unwrap();
        assert!(matches!(tables.get(a4.id).await, Err(DbError::NotFound { .. })));
        assert!(tables.list(None, None).await.unwrap().is_empty());
        assert!(matches!(
            tables.soft_delete(a4.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_label_unique_per_outlet_among_live_tables() {
        let f = fixture().await;
        let tables = f.db.tables();
        let terrace = f
            .db
            .outlets()
            .create(&NewOutlet {
                name: "Terrace".to_string(),
                location: None,
                tax_rate_bps: 0,
                service_charge_bps: 0,
            })
            .await
            .unwrap();

        let first = tables.create(&table(f.outlet.id, "7")).await.unwrap();
        let err = tables.create(&table(f.outlet.id, "7")).await.unwrap_err();
        assert!(err.is_unique_violation());

        // Another outlet may reuse the label
        tables.create(&table(terrace.id, "7")).await.unwrap();

        // So may a replacement once the old table is retired
        tables.soft_delete(first.id).await.unwrap();
        tables.create(&table(f.outlet.id, "7")).await.unwrap();
    }

    #[tokio::test]
    async fn test_outlet_must_be_live() {
        let f = fixture().await;
        let err = f.db.tables().create(&table(999, "1")).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        let err = f.db.tables().create(&table(f.outlet.id, "")).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }
}
