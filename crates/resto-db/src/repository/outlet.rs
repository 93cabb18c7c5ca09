//! # Outlet Repository
//!
//! Outlets and the tax / service charge rates bills are priced with.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use resto_core::billing::ChargeRates;
use resto_core::validation::{validate_name, validate_rate_bps};
use resto_core::{NewOutlet, Outlet, OutletUpdate};

const OUTLET_COLUMNS: &str = r#"
    id, name, location, tax_rate_bps, service_charge_bps, is_active, created_at, updated_at
"#;

/// Repository for outlets.
#[derive(Debug, Clone)]
pub struct OutletRepository {
    pool: SqlitePool,
}

impl OutletRepository {
    /// Creates a new OutletRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OutletRepository { pool }
    }

    pub async fn create(&self, new: &NewOutlet) -> DbResult<Outlet> {
        validate_name("name", &new.name)?;
        validate_rate_bps("tax_rate_bps", new.tax_rate_bps)?;
        validate_rate_bps("service_charge_bps", new.service_charge_bps)?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO outlets (
                name, location, tax_rate_bps, service_charge_bps, is_active,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, 1, ?5, ?5)
            "#,
        )
        .bind(new.name.trim())
        .bind(&new.location)
        .bind(new.tax_rate_bps)
        .bind(new.service_charge_bps)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(outlet_id = id, name = %new.name, "Outlet created");

        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> DbResult<Outlet> {
        let sql = format!("SELECT {OUTLET_COLUMNS} FROM outlets WHERE id = ?1 AND deleted_at IS NULL");

        sqlx::query_as::<_, Outlet>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Outlet", id))
    }

    pub async fn list(&self) -> DbResult<Vec<Outlet>> {
        let sql = format!("SELECT {OUTLET_COLUMNS} FROM outlets WHERE deleted_at IS NULL ORDER BY id");

        Ok(sqlx::query_as::<_, Outlet>(&sql).fetch_all(&self.pool).await?)
    }

    /// Partial update. Rate changes only affect bills created afterwards.
    pub async fn update(&self, id: i64, update: &OutletUpdate) -> DbResult<Outlet> {
        if let Some(name) = &update.name {
            validate_name("name", name)?;
        }
        if let Some(bps) = update.tax_rate_bps {
            validate_rate_bps("tax_rate_bps", bps)?;
        }
        if let Some(bps) = update.service_charge_bps {
            validate_rate_bps("service_charge_bps", bps)?;
        }

        let result = sqlx::query(
            r#"
            UPDATE outlets SET
                name = COALESCE(?1, name),
                location = COALESCE(?2, location),
                tax_rate_bps = COALESCE(?3, tax_rate_bps),
                service_charge_bps = COALESCE(?4, service_charge_bps),
                is_active = COALESCE(?5, is_active),
                updated_at = ?6
            WHERE id = ?7 AND deleted_at IS NULL
            "#,
        )
        .bind(update.name.as_deref().map(str::trim))
        .bind(&update.location)
        .bind(update.tax_rate_bps)
        .bind(update.service_charge_bps)
        .bind(update.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Outlet", id));
        }

        info!(outlet_id = id, "Outlet updated");
        self.get(id).await
    }

    pub async fn soft_delete(&self, id: i64) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE outlets SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL")
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Outlet", id));
        }

        info!(outlet_id = id, "Outlet deleted");
        Ok(())
    }

    /// Rates for an outlet, read on the caller's transaction.
    ///
    /// Tombstoned outlets still price the bills of orders placed there.
    pub(crate) async fn charge_rates_in(
        conn: &mut SqliteConnection,
        outlet_id: i64,
    ) -> DbResult<ChargeRates> {
        let sql = format!("SELECT {OUTLET_COLUMNS} FROM outlets WHERE id = ?1");

        let outlet = sqlx::query_as::<_, Outlet>(&sql)
            .bind(outlet_id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| DbError::not_found("Outlet", outlet_id))?;

        Ok(outlet.charge_rates())
    }

    /// Fails with NotFound unless the outlet is live.
    pub(crate) async fn ensure_live_in(conn: &mut SqliteConnection, outlet_id: i64) -> DbResult<()> {
        let found: Option<i64> =
            sqlx::query_scalar("SELECT id FROM outlets WHERE id = ?1 AND deleted_at IS NULL")
                .bind(outlet_id)
                .fetch_optional(conn)
                .await?;

        found
            .map(|_| ())
            .ok_or_else(|| DbError::not_found("Outlet", outlet_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use resto_core::CoreError;

    fn new_outlet(tax: u32, service: u32) -> NewOutlet {
        NewOutlet {
            name: "Rooftop".to_string(),
            location: Some("Level 12".to_string()),
            tax_rate_bps: tax,
            service_charge_bps: service,
        }
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let outlet = db.outlets().create(&new_outlet(1000, 500)).await.unwrap();
        assert_eq!(outlet.tax_rate_bps, 1000);
        assert!(outlet.is_active);

        let updated = db
            .outlets()
            .update(
                outlet.id,
                &OutletUpdate {
                    service_charge_bps: Some(750),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.service_charge_bps, 750);
        assert_eq!(updated.tax_rate_bps, 1000);
        assert_eq!(updated.location.as_deref(), Some("Level 12"));

        db.outlets().soft_delete(outlet.id).await.unwrap();
        assert!(db.outlets().get(outlet.id).await.is_err());
        assert!(db.outlets().list().await.unwrap().is_empty());

        // Tombstoned outlets still price bills
        let mut conn = db.pool().acquire().await.unwrap();
        let rates = OutletRepository::charge_rates_in(&mut conn, outlet.id)
            .await
            .unwrap();
        assert_eq!(rates.service.bps(), 750);
    }

    #[tokio::test]
    async fn test_rate_above_100_percent_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.outlets().create(&new_outlet(10_001, 0)).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }
}
