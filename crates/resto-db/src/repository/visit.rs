//! # Customer Visit Repository
//!
//! Visit history per guest. Every write also refreshes the owning
//! customer's `visit_count` and `last_visit` in the same transaction.
//!
//! Visits are history rather than master data, so delete is a hard delete.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};

use super::customer::CustomerRepository;
use super::outlet::OutletRepository;
use crate::error::{DbError, DbResult};
use resto_core::validation::{validate_money_cents, validate_new_visit, validate_pax};
use resto_core::{CustomerVisit, CustomerVisitUpdate, NewCustomerVisit};

const VISIT_COLUMNS: &str = r#"
    id, customer_id, visit_type, visit_date, room_number, reservation_id, outlet_id,
    total_spent_cents, pax, created_at, updated_at
"#;

/// Repository for customer visits.
#[derive(Debug, Clone)]
pub struct CustomerVisitRepository {
    pool: SqlitePool,
}

impl CustomerVisitRepository {
    /// Creates a new CustomerVisitRepository.
    pub fn new(pool: SqlitePool) -> Self {
        CustomerVisitRepository { pool }
    }

    /// Records a visit.
    ///
    /// ## Errors
    /// - `NotFound` - customer or outlet missing or deleted, or an unknown
    ///   `reservation_id`
    pub async fn create(&self, new: &NewCustomerVisit) -> DbResult<CustomerVisit> {
        validate_new_visit(new)?;

        let mut tx = self.pool.begin().await?;
        CustomerRepository::live_in(&mut tx, new.customer_id).await?;
        OutletRepository::ensure_live_in(&mut tx, new.outlet_id).await?;
        if let Some(reservation_id) = new.reservation_id {
            ensure_reservation_in(&mut tx, reservation_id).await?;
        }

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO customer_visits (
                customer_id, visit_type, visit_date, room_number, reservation_id,
                outlet_id, total_spent_cents, pax, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            "#,
        )
        .bind(new.customer_id)
        .bind(new.visit_type)
        .bind(new.visit_date.unwrap_or(now))
        .bind(&new.room_number)
        .bind(new.reservation_id)
        .bind(new.outlet_id)
        .bind(new.total_spent_cents)
        .bind(new.pax)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        CustomerRepository::refresh_visit_stats_in(&mut tx, new.customer_id).await?;
        tx.commit().await?;

        let id = result.last_insert_rowid();
        debug!(visit_id = id, customer_id = new.customer_id, pax = new.pax, "Visit recorded");

        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> DbResult<CustomerVisit> {
        let sql = format!("SELECT {VISIT_COLUMNS} FROM customer_visits WHERE id = ?1");

        sqlx::query_as::<_, CustomerVisit>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Visit", id))
    }

    /// All visits, most recent first.
    pub async fn list(&self) -> DbResult<Vec<CustomerVisit>> {
        let sql =
            format!("SELECT {VISIT_COLUMNS} FROM customer_visits ORDER BY visit_date DESC, id DESC");

        Ok(sqlx::query_as::<_, CustomerVisit>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    /// Visits of one live customer, most recent first.
    pub async fn list_for_customer(&self, customer_id: i64) -> DbResult<Vec<CustomerVisit>> {
        let mut conn = self.pool.acquire().await?;
        CustomerRepository::live_in(&mut conn, customer_id).await?;

        let sql = format!(
            r#"
            SELECT {VISIT_COLUMNS} FROM customer_visits
            WHERE customer_id = ?1
            ORDER BY visit_date DESC, id DESC
            "#
        );

        Ok(sqlx::query_as::<_, CustomerVisit>(&sql)
            .bind(customer_id)
            .fetch_all(&mut *conn)
            .await?)
    }

    /// Partial update. The customer, outlet and reservation of a visit are
    /// fixed once recorded.
    pub async fn update(&self, id: i64, update: &CustomerVisitUpdate) -> DbResult<CustomerVisit> {
        if let Some(pax) = update.pax {
            validate_pax(pax)?;
        }
        if let Some(cents) = update.total_spent_cents {
            validate_money_cents("total_spent_cents", cents)?;
        }

        let mut tx = self.pool.begin().await?;
        let customer_id = customer_of_in(&mut tx, id).await?;

        sqlx::query(
            r#"
            UPDATE customer_visits SET
                visit_type = COALESCE(?1, visit_type),
                visit_date = COALESCE(?2, visit_date),
                room_number = COALESCE(?3, room_number),
                total_spent_cents = COALESCE(?4, total_spent_cents),
                pax = COALESCE(?5, pax),
                updated_at = ?6
            WHERE id = ?7
            "#,
        )
        .bind(update.visit_type)
        .bind(update.visit_date)
        .bind(&update.room_number)
        .bind(update.total_spent_cents)
        .bind(update.pax)
        .bind(Utc::now())
        .bind(id)
        .execute(&mut *tx)
        .await?;

        CustomerRepository::refresh_visit_stats_in(&mut tx, customer_id).await?;
        tx.commit().await?;

        info!(visit_id = id, customer_id, "Visit updated");
        self.get(id).await
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let mut tx = self.pool.begin().await?;
        let customer_id = customer_of_in(&mut tx, id).await?;

        sqlx::query("DELETE FROM customer_visits WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        CustomerRepository::refresh_visit_stats_in(&mut tx, customer_id).await?;
        tx.commit().await?;

        info!(visit_id = id, customer_id, "Visit deleted");
        Ok(())
    }
}

async fn customer_of_in(conn: &mut SqliteConnection, visit_id: i64) -> DbResult<i64> {
    sqlx::query_scalar("SELECT customer_id FROM customer_visits WHERE id = ?1")
        .bind(visit_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| DbError::not_found("Visit", visit_id))
}

async fn ensure_reservation_in(conn: &mut SqliteConnection, reservation_id: i64) -> DbResult<()> {
    let found: Option<i64> = sqlx::query_scalar("SELECT id FROM reservations WHERE id = ?1")
        .bind(reservation_id)
        .fetch_optional(conn)
        .await?;

    found
        .map(|_| ())
        .ok_or_else(|| DbError::not_found("Reservation", reservation_id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::{fixture, Fixture};
    use chrono::{TimeZone, Utc};
    use resto_core::{Customer, CustomerType, NewCustomer, OrderType};

    async fn guest(f: &Fixture) -> Customer {
        f.db.customers()
            .create(&NewCustomer {
                hotel_guest_id: Some("G-88".to_string()),
                customer_type: CustomerType::HotelGuest,
                name: "Ayu".to_string(),
                phone: None,
            })
            .await
            .unwrap()
    }

    fn visit(f: &Fixture, customer_id: i64, day: u32) -> NewCustomerVisit {
        NewCustomerVisit {
            customer_id,
            visit_type: OrderType::RoomService,
            visit_date: Some(Utc.with_ymd_and_hms(2026, 3, day, 19, 0, 0).unwrap()),
            room_number: Some("1204".to_string()),
            reservation_id: None,
            outlet_id: f.outlet.id,
            total_spent_cents: 4_500,
            pax: 2,
        }
    }

    #[tokio::test]
    async fn test_visits_drive_customer_counters() {
        let f = fixture().await;
        let ayu = guest(&f).await;
        let visits = f.db.visits();

        let first = visits.create(&visit(&f, ayu.id, 10)).await.unwrap();
        let second = visits.create(&visit(&f, ayu.id, 14)).await.unwrap();
        assert_eq!(second.visit_type, OrderType::RoomService);

        let ayu_now = f.db.customers().get(ayu.id).await.unwrap();
        assert_eq!(ayu_now.visit_count, 2);
        assert_eq!(ayu_now.last_visit, Some(second.visit_date));

        let history = visits.list_for_customer(ayu.id).await.unwrap();
        assert_eq!(
            history.iter().map(|v| v.id).collect::<Vec<_>>(),
            vec![second.id, first.id]
        );

        visits.delete(second.id).await.unwrap();
        let ayu_now = f.db.customers().get(ayu.id).await.unwrap();
        assert_eq!(ayu_now.visit_count, 1);
        assert_eq!(ayu_now.last_visit, Some(first.visit_date));

        assert!(matches!(
            visits.delete(second.id).await,
            Err(DbError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_counters_in_step() {
        let f = fixture().await;
        let ayu = guest(&f).await;
        let recorded = f.db.visits().create(&visit(&f, ayu.id, 10)).await.unwrap();

        let later = Utc.with_ymd_and_hms(2026, 3, 20, 12, 30, 0).unwrap();
        let updated = f
            .db
            .visits()
            .update(
                recorded.id,
                &CustomerVisitUpdate {
                    visit_date: Some(later),
                    pax: Some(3),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.pax, 3);
        assert_eq!(updated.total_spent_cents, 4_500);

        let ayu_now = f.db.customers().get(ayu.id).await.unwrap();
        assert_eq!(ayu_now.last_visit, Some(later));
    }

    #[tokio::test]
    async fn test_visit_needs_live_customer_and_outlet() {
        let f = fixture().await;
        let ayu = guest(&f).await;

        let mut bad = visit(&f, ayu.id, 10);
        bad.outlet_id = 999;
        assert!(matches!(
            f.db.visits().create(&bad).await,
            Err(DbError::NotFound { .. })
        ));

        let mut bad = visit(&f, ayu.id, 10);
        bad.reservation_id = Some(77);
        assert!(matches!(
            f.db.visits().create(&bad).await,
            Err(DbError::NotFound { .. })
        ));

        f.db.customers().soft_delete(ayu.id).await.unwrap();
        assert!(matches!(
            f.db.visits().create(&visit(&f, ayu.id, 10)).await,
            Err(DbError::NotFound { .. })
        ));
        assert!(f.db.visits().list().await.unwrap().is_empty());
    }
}
