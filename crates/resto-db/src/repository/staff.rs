//! # Staff Repository
//!
//! Waiters, cashiers and managers. The PIN column is written here and
//! checked by [`StaffRepository::verify_pin`]; it is never selected into
//! [`Staff`].

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use resto_core::validation::{validate_name, validate_new_staff, validate_pin};
use resto_core::{NewStaff, Staff, StaffUpdate};

const STAFF_COLUMNS: &str = "id, name, role, is_active, created_at, updated_at";

/// Repository for staff members.
#[derive(Debug, Clone)]
pub struct StaffRepository {
    pool: SqlitePool,
}

impl StaffRepository {
    /// Creates a new StaffRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StaffRepository { pool }
    }

    pub async fn create(&self, new: &NewStaff) -> DbResult<Staff> {
        validate_new_staff(new)?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO staff (name, role, pin_code, is_active, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?5)
            "#,
        )
        .bind(new.name.trim())
        .bind(new.role.trim())
        .bind(&new.pin_code)
        .bind(new.is_active)
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(staff_id = id, role = %new.role, "Staff member created");

        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> DbResult<Staff> {
        let sql = format!("SELECT {STAFF_COLUMNS} FROM staff WHERE id = ?1 AND deleted_at IS NULL");

        sqlx::query_as::<_, Staff>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Staff", id))
    }

    pub async fn list(&self) -> DbResult<Vec<Staff>> {
        let sql =
            format!("SELECT {STAFF_COLUMNS} FROM staff WHERE deleted_at IS NULL ORDER BY name, id");

        Ok(sqlx::query_as::<_, Staff>(&sql).fetch_all(&self.pool).await?)
    }

    /// Partial update. A new PIN replaces the old one.
    pub async fn update(&self, id: i64, update: &StaffUpdate) -> DbResult<Staff> {
        if let Some(name) = &update.name {
            validate_name("name", name)?;
        }
        if let Some(role) = &update.role {
            validate_name("role", role)?;
        }
        if let Some(pin) = &update.pin_code {
            validate_pin(pin)?;
        }

        let result = sqlx::query(
            r#"
            UPDATE staff SET
                name = COALESCE(?1, name),
                role = COALESCE(?2, role),
                pin_code = COALESCE(?3, pin_code),
                is_active = COALESCE(?4, is_active),
                updated_at = ?5
            WHERE id = ?6 AND deleted_at IS NULL
            "#,
        )
        .bind(update.name.as_deref().map(str::trim))
        .bind(update.role.as_deref().map(str::trim))
        .bind(&update.pin_code)
        .bind(update.is_active)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Staff", id));
        }

        info!(staff_id = id, pin_changed = update.pin_code.is_some(), "Staff member updated");
        self.get(id).await
    }

    pub async fn soft_delete(&self, id: i64) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE staff SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL")
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Staff", id));
        }

        info!(staff_id = id, "Staff member deleted");
        Ok(())
    }

    /// True when the PIN matches a live, active staff member.
    pub async fn verify_pin(&self, id: i64, pin: &str) -> DbResult<bool> {
        let stored: Option<String> = sqlx::query_scalar(
            "SELECT pin_code FROM staff WHERE id = ?1 AND deleted_at IS NULL AND is_active = 1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let matches = stored.as_deref() == Some(pin);
        if !matches {
            warn!(staff_id = id, "PIN check failed");
        }
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use resto_core::CoreError;

    fn waiter(pin: &str) -> NewStaff {
        NewStaff {
            name: "Budi".to_string(),
            role: "waiter".to_string(),
            pin_code: pin.to_string(),
            is_active: true,
        }
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let budi = db.staff().create(&waiter("1234")).await.unwrap();
        assert_eq!(budi.role, "waiter");
        assert!(budi.is_active);

        let promoted = db
            .staff()
            .update(
                budi.id,
                &StaffUpdate {
                    role: Some("cashier".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(promoted.role, "cashier");
        assert_eq!(promoted.name, "Budi");

        db.staff().soft_delete(budi.id).await.unwrap();
        assert!(matches!(
            db.staff().get(budi.id).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(db.staff().list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pin_is_write_only_and_checked() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let budi = db.staff().create(&waiter("0420")).await.unwrap();

        assert!(!format!("{budi:?}").contains("0420"));

        assert!(db.staff().verify_pin(budi.id, "0420").await.unwrap());
        assert!(!db.staff().verify_pin(budi.id, "0421").await.unwrap());

        db.staff()
            .update(
                budi.id,
                &StaffUpdate {
                    is_active: Some(false),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(!db.staff().verify_pin(budi.id, "0420").await.unwrap());
    }

    #[tokio::test]
    async fn test_bad_pin_rejected() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let err = db.staff().create(&waiter("12")).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }
}
