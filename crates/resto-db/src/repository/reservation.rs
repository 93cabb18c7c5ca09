//! # Reservation Repository
//!
//! Table reservations with double-booking protection.
//!
//! A table can hold one live (non-cancelled) reservation per exact time.
//! The pre-check gives a readable error; the partial unique index
//! `idx_reservations_table_slot` closes the race between two concurrent
//! bookings, and its violation maps to the same `DoubleBooked` error.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{info, warn};

use crate::error::{DbError, DbResult};
use resto_core::validation::validate_reservation;
use resto_core::{CoreError, NewReservation, Reservation, ReservationSort, ReservationStatus};

const RESERVATION_COLUMNS: &str = r#"
    id, customer_id, table_id, reservation_time, pax, status, special_request,
    created_at, updated_at
"#;

/// Repository for reservations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    /// Creates a new ReservationRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReservationRepository { pool }
    }

    /// Books a table.
    ///
    /// ## Errors
    /// - `Domain(DoubleBooked)` - another live reservation holds the slot
    pub async fn create(&self, new: &NewReservation) -> DbResult<Reservation> {
        validate_reservation(new)?;
        self.ensure_slot_free(new, None).await?;

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            INSERT INTO reservations (
                customer_id, table_id, reservation_time, pax, status, special_request,
                created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?7)
            "#,
        )
        .bind(new.customer_id)
        .bind(new.table_id)
        .bind(new.reservation_time)
        .bind(new.pax)
        .bind(new.status)
        .bind(&new.special_request)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| double_booked_or(e.into(), new))?;

        let id = result.last_insert_rowid();
        info!(
            reservation_id = id,
            table_id = new.table_id,
            time = %new.reservation_time,
            pax = new.pax,
            "Reservation created"
        );

        self.get(id).await
    }

    /// Replaces a reservation, re-checking the slot against every other booking.
    pub async fn update(&self, id: i64, new: &NewReservation) -> DbResult<Reservation> {
        validate_reservation(new)?;
        self.ensure_slot_free(new, Some(id)).await?;

        let result = sqlx::query(
            r#"
            UPDATE reservations SET
                customer_id = ?1,
                table_id = ?2,
                reservation_time = ?3,
                pax = ?4,
                status = ?5,
                special_request = ?6,
                updated_at = ?7
            WHERE id = ?8
            "#,
        )
        .bind(new.customer_id)
        .bind(new.table_id)
        .bind(new.reservation_time)
        .bind(new.pax)
        .bind(new.status)
        .bind(&new.special_request)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(|e| double_booked_or(e.into(), new))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Reservation", id));
        }

        info!(reservation_id = id, status = ?new.status, "Reservation updated");
        self.get(id).await
    }

    pub async fn get(&self, id: i64) -> DbResult<Reservation> {
        let sql = format!("SELECT {RESERVATION_COLUMNS} FROM reservations WHERE id = ?1");

        sqlx::query_as::<_, Reservation>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Reservation", id))
    }

    pub async fn list(&self, sort: ReservationSort) -> DbResult<Vec<Reservation>> {
        let sql = format!(
            "SELECT {RESERVATION_COLUMNS} FROM reservations ORDER BY {}",
            sort.order_by()
        );

        Ok(sqlx::query_as::<_, Reservation>(&sql)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM reservations WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Reservation", id));
        }

        info!(reservation_id = id, "Reservation deleted");
        Ok(())
    }

    /// Fails with `DoubleBooked` if a live reservation other than `exclude`
    /// holds the same table and time. Cancelled requests never conflict.
    async fn ensure_slot_free(&self, new: &NewReservation, exclude: Option<i64>) -> DbResult<()> {
        if new.status == ReservationStatus::Cancelled {
            return Ok(());
        }

        let taken: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM reservations
                WHERE table_id = ?1
                  AND reservation_time = ?2
                  AND status != 'cancelled'
                  AND (?3 IS NULL OR id != ?3)
            )
            "#,
        )
        .bind(new.table_id)
        .bind(new.reservation_time)
        .bind(exclude)
        .fetch_one(&self.pool)
        .await?;

        if taken {
            warn!(table_id = new.table_id, time = %new.reservation_time, "Double booking rejected");
            return Err(double_booked(new));
        }

        Ok(())
    }
}

fn double_booked(new: &NewReservation) -> DbError {
    CoreError::DoubleBooked {
        table_id: new.table_id,
        reservation_time: new.reservation_time.to_rfc3339(),
    }
    .into()
}

/// A booking that raced past the pre-check hits the slot index instead.
fn double_booked_or(err: DbError, new: &NewReservation) -> DbError {
    if err.is_unique_violation() {
        double_booked(new)
    } else {
        err
    }
}
