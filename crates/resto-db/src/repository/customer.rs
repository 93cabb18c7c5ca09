//! # Customer Repository
//!
//! Guest profiles. `visit_count` and `last_visit` are maintained by
//! [`super::visit::CustomerVisitRepository`] through
//! [`CustomerRepository::refresh_visit_stats_in`]; callers cannot write them.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use resto_core::validation::validate_new_customer;
use resto_core::{Customer, CustomerUpdate, NewCustomer};

const CUSTOMER_COLUMNS: &str = r#"
    id, hotel_guest_id, customer_type, name, phone, visit_count, last_visit,
    created_at, updated_at
"#;

/// Repository for customers.
#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    /// Creates a new CustomerRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    pub async fn create(&self, new: &NewCustomer) -> DbResult<Customer> {
        validate_new_customer(new)?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO customers (
                hotel_guest_id, customer_type, name, phone, visit_count,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, 0, ?5, ?5)
            "#,
        )
        .bind(new.hotel_guest_id.as_deref().map(str::trim))
        .bind(new.customer_type)
        .bind(new.name.trim())
        .bind(new.phone.as_deref().map(str::trim))
        .bind(now)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(customer_id = id, customer_type = ?new.customer_type, "Customer created");

        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> DbResult<Customer> {
        let mut conn = self.pool.acquire().await?;
        Self::live_in(&mut conn, id).await
    }

    pub async fn list(&self) -> DbResult<Vec<Customer>> {
        let sql = format!(
            "SELECT {CUSTOMER_COLUMNS} FROM customers WHERE deleted_at IS NULL ORDER BY name, id"
        );

        Ok(sqlx::query_as::<_, Customer>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Partial update, validated against the merged record so a customer
    /// cannot become a hotel guest without a guest id.
    pub async fn update(&self, id: i64, update: &CustomerUpdate) -> DbResult<Customer> {
        let mut tx = self.pool.begin().await?;
        let current = Self::live_in(&mut tx, id).await?;

        let merged = NewCustomer {
            hotel_guest_id: update.hotel_guest_id.clone().or(current.hotel_guest_id),
            customer_type: update.customer_type.unwrap_or(current.customer_type),
            name: update.name.clone().unwrap_or(current.name),
            phone: update.phone.clone().or(current.phone),
        };
        validate_new_customer(&merged)?;

        sqlx::query(
            r#"
            UPDATE customers SET
                hotel_guest_id = ?1, customer_type = ?2, name = ?3, phone = ?4,
                updated_at = ?5
            WHERE id = ?6
            "#,
        )
        .bind(merged.hotel_guest_id.as_deref().map(str::trim))
        .bind(merged.customer_type)
        .bind(merged.name.trim())
        .bind(merged.phone.as_deref().map(str::trim))
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(customer_id = id, "Customer updated");
        self.get(id).await
    }

    /// Tombstones the profile. Its visits stay on record.
    pub async fn soft_delete(&self, id: i64) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE customers SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL")
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        info!(customer_id = id, "Customer deleted");
        Ok(())
    }

    /// A live customer, read on the caller's connection.
    pub(crate) async fn live_in(conn: &mut SqliteConnection, id: i64) -> DbResult<Customer> {
        let sql =
            format!("SELECT {CUSTOMER_COLUMNS} FROM customers WHERE id = ?1 AND deleted_at IS NULL");

        sqlx::query_as::<_, Customer>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id))
    }

    /// Recomputes `visit_count` and `last_visit` from the visit rows.
    pub(crate) async fn refresh_visit_stats_in(
        conn: &mut SqliteConnection,
        customer_id: i64,
    ) -> DbResult<()> {
        sqlx::query(
            r#"
            UPDATE customers SET
                visit_count = (SELECT COUNT(*) FROM customer_visits WHERE customer_id = ?1),
                last_visit = (SELECT MAX(visit_date) FROM customer_visits WHERE customer_id = ?1)
            WHERE id = ?1
            "#,
        )
        .bind(customer_id)
        .execute(conn)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use resto_core::{CoreError, CustomerType};

    fn walk_in(name: &str) -> NewCustomer {
        NewCustomer {
            hotel_guest_id: None,
            customer_type: CustomerType::WalkIn,
            name: name.to_string(),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_create_update_delete() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sari = db.customers().create(&walk_in("Sari")).await.unwrap();
        assert_eq!(sari.visit_count, 0);
        assert!(sari.last_visit.is_none());

        let updated = db
            .customers()
            .update(
                sari.id,
                &CustomerUpdate {
                    phone: Some("0812 555 0101".to_string()),
                    customer_type: Some(CustomerType::Member),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.customer_type, CustomerType::Member);
        assert_eq!(updated.phone.as_deref(), Some("0812 555 0101"));
        assert_eq!(updated.name, "Sari");

        db.customers().soft_delete(sari.id).await.unwrap();
        assert!(matches!(
            db.customers().get(sari.id).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(matches!(
            db.customers()
                .update(sari.id, &CustomerUpdate::default())
                .await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_hotel_guest_needs_guest_id_after_merge() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sari = db.customers().create(&walk_in("Sari")).await.unwrap();

        let err = db
            .customers()
            .update(
                sari.id,
                &CustomerUpdate {
                    customer_type: Some(CustomerType::HotelGuest),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));

        let guest = db
            .customers()
            .update(
                sari.id,
                &CustomerUpdate {
                    customer_type: Some(CustomerType::HotelGuest),
                    hotel_guest_id: Some("G-1021".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(guest.hotel_guest_id.as_deref(), Some("G-1021"));
    }
}
