//! # Bill Repository
//!
//! Bills, split bills and the payment ledger.
//!
//! ## Payment Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    record_payment (ONE transaction)                     │
//! │                                                                         │
//! │  UPDATE bills SET paid_cents = paid_cents + amount   ← store-evaluated │
//! │       │  0 rows ──► NotFound                                           │
//! │       ▼                                                                 │
//! │  INSERT bill_payments                                 ← append-only    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BillStatus::after_payment(paid, total, current)                       │
//! │       │  changed? ──► UPDATE bills SET status                          │
//! │       ▼                                                                 │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Concurrent payments on one bill serialize on the first UPDATE, so the
//! paid amount always equals the sum of the stored payments.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::order::order_unavailable_in;
use crate::repository::outlet::OutletRepository;
use resto_core::billing::{BillTotals, ChargeRates};
use resto_core::validation::{validate_discount, validate_payment, validate_split_request};
use resto_core::{
    Bill, BillPayment, BillStatus, CoreError, Money, NewPayment, OrderStatus, SplitBillRequest,
    ValidationError,
};

const BILL_COLUMNS: &str = r#"
    id, bill_number, order_id, parent_bill_id, status,
    subtotal_cents, service_charge_cents, tax_cents, discount_cents, total_cents,
    paid_cents, (total_cents - paid_cents) AS balance_due_cents,
    created_at, updated_at
"#;

const PAYMENT_COLUMNS: &str = r#"
    id, bill_id, method, amount_cents, reference_number, room_charge_approved_by, paid_at
"#;

/// Repository for bills and payments.
#[derive(Debug, Clone)]
pub struct BillRepository {
    pool: SqlitePool,
}

impl BillRepository {
    /// Creates a new BillRepository.
    pub fn new(pool: SqlitePool) -> Self {
        BillRepository { pool }
    }

    /// Bills a whole order.
    ///
    /// ## Arguments
    /// * `order_id` - Order to bill; must exist and not be void
    /// * `discount_cents` - Flat discount applied after tax
    ///
    /// ## Returns
    /// The new bill, status `open`.
    pub async fn create_bill(&self, order_id: i64, discount_cents: i64) -> DbResult<Bill> {
        validate_discount(discount_cents)?;

        let mut tx = self.pool.begin().await?;

        // Lock the order row so items cannot change while it is priced
        let result = sqlx::query(
            "UPDATE orders SET status = status WHERE id = ?1 AND status != ?2",
        )
        .bind(order_id)
        .bind(OrderStatus::Void)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(order_unavailable_in(&mut tx, order_id).await);
        }

        let lines: Vec<(i64, i64)> = sqlx::query_as(
            "SELECT quantity, unit_price_cents FROM order_items WHERE order_id = ?1",
        )
        .bind(order_id)
        .fetch_all(&mut *tx)
        .await?;

        let subtotal = lines
            .iter()
            .try_fold(Money::zero(), |acc, &(quantity, price)| {
                price
                    .checked_mul(quantity)
                    .and_then(|line| acc.checked_add(Money::from_cents(line)))
            })
            .ok_or_else(subtotal_overflow)?;

        let rates = order_rates_in(&mut tx, order_id).await?;
        let totals =
            BillTotals::compute(subtotal, rates, Money::from_cents(discount_cents))?;

        let bill_id = insert_bill_in(&mut tx, order_id, None, &totals).await?;
        tx.commit().await?;

        info!(
            bill_id,
            order_id,
            total = %totals.total,
            "Bill created"
        );

        self.get(bill_id).await
    }

    /// Splits a bill into child bills, one per split, all or nothing.
    ///
    /// ## Errors
    /// - `Domain(DuplicateSplitItem)` - an item named by two splits
    /// - `NotFound` - original bill missing, or an item not on the order
    /// - `Domain(BillOrderMismatch)` - bill belongs to another order
    pub async fn create_split_bills(&self, request: &SplitBillRequest) -> DbResult<Vec<Bill>> {
        validate_split_request(request)?;

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE bills SET updated_at = updated_at WHERE id = ?1 AND deleted_at IS NULL",
        )
        .bind(request.original_bill_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Bill", request.original_bill_id));
        }

        let bill_order_id: i64 = sqlx::query_scalar("SELECT order_id FROM bills WHERE id = ?1")
            .bind(request.original_bill_id)
            .fetch_one(&mut *tx)
            .await?;

        if bill_order_id != request.original_order_id {
            return Err(CoreError::BillOrderMismatch {
                bill_id: request.original_bill_id,
                bill_order_id,
                requested_order_id: request.original_order_id,
            }
            .into());
        }

        let rates = order_rates_in(&mut tx, bill_order_id).await?;

        let mut bill_ids = Vec::with_capacity(request.splits.len());
        for split in &request.splits {
            let mut subtotal = Money::zero();
            for item_id in &split.item_ids {
                let price: Option<i64> = sqlx::query_scalar(
                    "SELECT unit_price_cents FROM order_items WHERE id = ?1 AND order_id = ?2",
                )
                .bind(item_id)
                .bind(bill_order_id)
                .fetch_optional(&mut *tx)
                .await?;

                let price = price.ok_or_else(|| DbError::not_found("Order item", item_id))?;
                subtotal = subtotal
                    .checked_add(Money::from_cents(price))
                    .ok_or_else(subtotal_overflow)?;
            }

            let totals =
                BillTotals::compute(subtotal, rates, Money::from_cents(split.discount_cents))?;
            let bill_id = insert_bill_in(
                &mut tx,
                bill_order_id,
                Some(request.original_bill_id),
                &totals,
            )
            .await?;

            debug!(bill_id, items = split.item_ids.len(), total = %totals.total, "Split bill stored");
            bill_ids.push(bill_id);
        }

        tx.commit().await?;

        info!(
            original_bill_id = request.original_bill_id,
            order_id = bill_order_id,
            splits = bill_ids.len(),
            "Bill split"
        );

        let mut bills = Vec::with_capacity(bill_ids.len());
        for id in bill_ids {
            bills.push(self.get(id).await?);
        }
        Ok(bills)
    }

    /// Records a payment and advances the bill's status.
    ///
    /// ## Returns
    /// The bill after the payment.
    pub async fn record_payment(&self, payment: &NewPayment) -> DbResult<Bill> {
        validate_payment(payment)?;

        let now = Utc::now();
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE bills SET paid_cents = paid_cents + ?1, updated_at = ?2
            WHERE id = ?3 AND deleted_at IS NULL
            "#,
        )
        .bind(payment.amount_cents)
        .bind(now)
        .bind(payment.bill_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Bill", payment.bill_id));
        }

        sqlx::query(
            r#"
            INSERT INTO bill_payments (
                bill_id, method, amount_cents, reference_number,
                room_charge_approved_by, paid_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(payment.bill_id)
        .bind(payment.method)
        .bind(payment.amount_cents)
        .bind(&payment.reference_number)
        .bind(payment.room_charge_approved_by)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let (paid, total, current): (i64, i64, BillStatus) =
            sqlx::query_as("SELECT paid_cents, total_cents, status FROM bills WHERE id = ?1")
                .bind(payment.bill_id)
                .fetch_one(&mut *tx)
                .await?;

        let next =
            BillStatus::after_payment(Money::from_cents(paid), Money::from_cents(total), current);
        if next != current {
            sqlx::query("UPDATE bills SET status = ?1 WHERE id = ?2")
                .bind(next)
                .bind(payment.bill_id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        info!(
            bill_id = payment.bill_id,
            method = ?payment.method,
            amount = payment.amount_cents,
            paid,
            status = ?next,
            "Payment recorded"
        );

        self.get(payment.bill_id).await
    }

    pub async fn get(&self, id: i64) -> DbResult<Bill> {
        let sql = format!("SELECT {BILL_COLUMNS} FROM bills WHERE id = ?1 AND deleted_at IS NULL");

        sqlx::query_as::<_, Bill>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("Bill", id))
    }

    pub async fn list(&self) -> DbResult<Vec<Bill>> {
        let sql = format!("SELECT {BILL_COLUMNS} FROM bills WHERE deleted_at IS NULL ORDER BY id");

        Ok(sqlx::query_as::<_, Bill>(&sql).fetch_all(&self.pool).await?)
    }

    /// Payments of a bill in the order they were recorded.
    pub async fn payments(&self, bill_id: i64) -> DbResult<Vec<BillPayment>> {
        self.get(bill_id).await?;

        let sql = format!("SELECT {PAYMENT_COLUMNS} FROM bill_payments WHERE bill_id = ?1 ORDER BY id");
        Ok(sqlx::query_as::<_, BillPayment>(&sql)
            .bind(bill_id)
            .fetch_all(&self.pool)
            .await?)
    }

    pub async fn soft_delete(&self, id: i64) -> DbResult<()> {
        let result =
            sqlx::query("UPDATE bills SET deleted_at = ?1 WHERE id = ?2 AND deleted_at IS NULL")
                .bind(Utc::now())
                .bind(id)
                .execute(&self.pool)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Bill", id));
        }

        info!(bill_id = id, "Bill deleted");
        Ok(())
    }
}

/// Rates of the outlet an order was placed at.
async fn order_rates_in(conn: &mut SqliteConnection, order_id: i64) -> DbResult<ChargeRates> {
    let outlet_id: i64 = sqlx::query_scalar("SELECT outlet_id FROM orders WHERE id = ?1")
        .bind(order_id)
        .fetch_optional(&mut *conn)
        .await?
        .ok_or_else(|| DbError::not_found("Order", order_id))?;

    OutletRepository::charge_rates_in(conn, outlet_id).await
}

fn subtotal_overflow() -> DbError {
    ValidationError::Overflow {
        field: "subtotal_cents".to_string(),
    }
    .into()
}

async fn insert_bill_in(
    conn: &mut SqliteConnection,
    order_id: i64,
    parent_bill_id: Option<i64>,
    totals: &BillTotals,
) -> DbResult<i64> {
    let now = Utc::now();

    let result = sqlx::query(
        r#"
        INSERT INTO bills (
            bill_number, order_id, parent_bill_id, status,
            subtotal_cents, service_charge_cents, tax_cents, discount_cents, total_cents,
            paid_cents, created_at, updated_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, 0, ?10, ?10)
        "#,
    )
    .bind(Uuid::new_v4().to_string())
    .bind(order_id)
    .bind(parent_bill_id)
    .bind(BillStatus::Open)
    .bind(totals.subtotal.cents())
    .bind(totals.service_charge.cents())
    .bind(totals.tax.cents())
    .bind(totals.discount.cents())
    .bind(totals.total.cents())
    .bind(now)
    .execute(conn)
    .await?;

    Ok(result.last_insert_rowid())
}

// =============================================================================
// Unit Tests
// =============================================================================
