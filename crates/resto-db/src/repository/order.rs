//! # Order Repository
//!
//! Order placement with atomic ingredient consumption.
//!
//! ## Place Order Transaction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order (ONE transaction)                        │
//! │                                                                         │
//! │  validate_new_order (before BEGIN)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  INSERT orders (status = open)          ← first statement is a write   │
//! │  outlet must be live                                                   │
//! │       │                                                                 │
//! │       ▼  for each line                                                  │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │ menu item live?             ── no ──► NotFound      ─┐          │   │
//! │  │ plan_consumption(recipe)    ── bad exclusion ──────► ─┤          │   │
//! │  │ INSERT order_items + exclusions                       │          │   │
//! │  │ for each ingredient usage:                            │ ROLLBACK │   │
//! │  │   UPDATE ... WHERE quantity >= used                   │ (guard   │   │
//! │  │   0 rows ──► InsufficientStock ───────────────────── ─┤ dropped) │   │
//! │  │   INSERT stock_movements (order_consumption)          │          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A failure on the Nth line leaves no trace of lines 1..N-1: no items, no
//! decrements, no movements, no order header.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::repository::catalog::CatalogRepository;
use crate::repository::ingredient::IngredientRepository;
use crate::repository::outlet::OutletRepository;
use resto_core::recipe::plan_consumption;
use resto_core::validation::{validate_new_order, validate_order_item};
use resto_core::{
    CoreError, NewOrder, NewOrderItem, Order, OrderItem, OrderStatus, OrderUpdate,
    ValidationError, VoidPolicy,
};

const ORDER_COLUMNS: &str = r#"
    id, order_number, table_id, customer_id, hotel_room, waiter_id, outlet_id,
    status, order_type, created_at, updated_at
"#;

/// Repository for orders and order items.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Places an order and consumes its ingredients in one transaction.
    ///
    /// ## Returns
    /// The stored order with its items.
    ///
    /// ## Errors
    /// - `Domain(Validation)` - bad input, nothing opened
    /// - `NotFound` - outlet or menu item missing
    /// - `Domain(IngredientNotRemovable)` - exclusion of a fixed ingredient
    /// - `Domain(InsufficientStock)` - any ingredient short; nothing written
    pub async fn place_order(&self, new: &NewOrder) -> DbResult<Order> {
        validate_new_order(new)?;

        let order_number = Uuid::new_v4().to_string();
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO orders (
                order_number, table_id, customer_id, hotel_room, waiter_id,
                outlet_id, status, order_type, created_at, updated_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?9)
            "#,
        )
        .bind(&order_number)
        .bind(new.table_id)
        .bind(new.customer_id)
        .bind(&new.hotel_room)
        .bind(new.waiter_id)
        .bind(new.outlet_id)
        .bind(OrderStatus::Open)
        .bind(new.order_type)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        let order_id = result.last_insert_rowid();

        OutletRepository::ensure_live_in(&mut tx, new.outlet_id).await?;

        for item in &new.items {
            insert_line_in(&mut tx, order_id, item).await?;
        }

        tx.commit().await?;

        info!(
            order_id,
            order_number = %order_number,
            items = new.items.len(),
            "Order placed"
        );

        self.get(order_id).await
    }

    /// Adds one line to an open order, consuming its ingredients.
    ///
    /// ## Errors
    /// - `NotFound` - order or menu item missing
    /// - `Domain(InvalidOrderStatus)` - order closed or void
    /// - `Domain(InsufficientStock)` - nothing written
    pub async fn add_item(&self, order_id: i64, item: &NewOrderItem) -> DbResult<OrderItem> {
        validate_order_item(item)?;

        let mut tx = self.pool.begin().await?;

        // Takes the write lock and checks the order is still open
        let result = sqlx::query(
            "UPDATE orders SET updated_at = ?1 WHERE id = ?2 AND status = ?3",
        )
        .bind(Utc::now())
        .bind(order_id)
        .bind(OrderStatus::Open)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(order_unavailable_in(&mut tx, order_id).await);
        }

        let added = insert_line_in(&mut tx, order_id, item).await?;
        tx.commit().await?;

        info!(
            order_id,
            order_item_id = added.id,
            menu_item_id = item.menu_item_id,
            quantity = item.quantity,
            "Item added to order"
        );

        Ok(added)
    }

    /// Updates header fields of a non-void order.
    ///
    /// Status may move between `open` and `closed`; voiding goes through
    /// [`OrderRepository::void`].
    pub async fn update(&self, order_id: i64, update: &OrderUpdate) -> DbResult<Order> {
        if update.status == Some(OrderStatus::Void) {
            return Err(ValidationError::InvalidFormat {
                field: "status".to_string(),
                reason: "orders are voided with DELETE, not update".to_string(),
            }
            .into());
        }

        let mut conn = self.pool.acquire().await?;

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                table_id = COALESCE(?1, table_id),
                customer_id = COALESCE(?2, customer_id),
                hotel_room = COALESCE(?3, hotel_room),
                waiter_id = COALESCE(?4, waiter_id),
                outlet_id = COALESCE(?5, outlet_id),
                status = COALESCE(?6, status),
                order_type = COALESCE(?7, order_type),
                updated_at = ?8
            WHERE id = ?9 AND status != 'void'
            "#,
        )
        .bind(update.table_id)
        .bind(update.customer_id)
        .bind(&update.hotel_room)
        .bind(update.waiter_id)
        .bind(update.outlet_id)
        .bind(update.status)
        .bind(update.order_type)
        .bind(Utc::now())
        .bind(order_id)
        .execute(&mut *conn)
        .await?;

        if result.rows_affected() == 0 {
            return Err(order_unavailable_in(&mut conn, order_id).await);
        }
        drop(conn);

        info!(order_id, "Order updated");
        self.get(order_id).await
    }

    /// Voids an order.
    ///
    /// ## Stock
    /// - [`VoidPolicy::KeepStock`]: consumed ingredients stay consumed
    /// - [`VoidPolicy::Restock`]: every `order_consumption` movement of the
    ///   order's items is reversed with a `void_restock` movement, in the
    ///   same transaction as the status change
    pub async fn void(&self, order_id: i64, policy: VoidPolicy) -> DbResult<Order> {
        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            "UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status != ?1",
        )
        .bind(OrderStatus::Void)
        .bind(Utc::now())
        .bind(order_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(order_unavailable_in(&mut tx, order_id).await);
        }

        if policy == VoidPolicy::Restock {
            let consumed: Vec<(i64, i64, f64)> = sqlx::query_as(
                r#"
                SELECT sm.ingredient_id, sm.order_item_id, sm.delta
                FROM stock_movements sm
                JOIN order_items oi ON oi.id = sm.order_item_id
                WHERE oi.order_id = ?1 AND sm.reason = 'order_consumption'
                ORDER BY sm.id
                "#,
            )
            .bind(order_id)
            .fetch_all(&mut *tx)
            .await?;

            for (ingredient_id, order_item_id, delta) in &consumed {
                IngredientRepository::restock_in(&mut tx, *ingredient_id, -delta, *order_item_id)
                    .await?;
            }

            debug!(order_id, movements = consumed.len(), "Order stock restored");
        }

        tx.commit().await?;

        warn!(order_id, policy = ?policy, "Order voided");
        self.get(order_id).await
    }

    /// Gets an order with its items and exclusions.
    pub async fn get(&self, order_id: i64) -> DbResult<Order> {
        let mut conn = self.pool.acquire().await?;

        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1");
        let mut order = sqlx::query_as::<_, Order>(&sql)
            .bind(order_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or_else(|| DbError::not_found("Order", order_id))?;

        order.items = items_in(&mut conn, order_id).await?;
        Ok(order)
    }

    /// Lists orders newest first, optionally filtered by status.
    pub async fn list(&self, status: Option<OrderStatus>) -> DbResult<Vec<Order>> {
        let mut conn = self.pool.acquire().await?;

        let sql = format!(
            r#"
            SELECT {ORDER_COLUMNS} FROM orders
            WHERE (?1 IS NULL OR status = ?1)
            ORDER BY created_at DESC, id DESC
            "#
        );
        let mut orders = sqlx::query_as::<_, Order>(&sql)
            .bind(status)
            .fetch_all(&mut *conn)
            .await?;

        for order in &mut orders {
            order.items = items_in(&mut conn, order.id).await?;
        }

        Ok(orders)
    }
}

// =============================================================================
// Transaction helpers
// =============================================================================

/// Inserts one order line and consumes its recipe.
async fn insert_line_in(
    conn: &mut SqliteConnection,
    order_id: i64,
    item: &NewOrderItem,
) -> DbResult<OrderItem> {
    CatalogRepository::menu_item_in(conn, item.menu_item_id).await?;

    let recipe = CatalogRepository::recipe_in(conn, item.menu_item_id).await?;
    let plan = plan_consumption(
        item.menu_item_id,
        &recipe,
        item.quantity,
        &item.excluded_ingredient_ids,
    )?;

    let result = sqlx::query(
        r#"
        INSERT INTO order_items (
            order_id, menu_item_id, quantity, unit_price_cents, notes, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)
        "#,
    )
    .bind(order_id)
    .bind(item.menu_item_id)
    .bind(item.quantity)
    .bind(item.unit_price_cents)
    .bind(&item.notes)
    .bind(Utc::now())
    .execute(&mut *conn)
    .await?;

    let order_item_id = result.last_insert_rowid();

    // Only exclusions that drop a recipe line are recorded
    let applied = item
        .excluded_ingredient_ids
        .iter()
        .filter(|id| recipe.iter().any(|line| line.ingredient_id == **id));

    for ingredient_id in applied {
        sqlx::query(
            "INSERT INTO order_item_exclusions (order_item_id, ingredient_id) VALUES (?1, ?2)",
        )
        .bind(order_item_id)
        .bind(ingredient_id)
        .execute(&mut *conn)
        .await?;
    }

    for usage in &plan {
        IngredientRepository::consume_in(conn, usage.ingredient_id, usage.quantity, order_item_id)
            .await?;
    }

    debug!(
        order_id,
        order_item_id,
        menu_item_id = item.menu_item_id,
        ingredients = plan.len(),
        "Order line stored"
    );

    Ok(OrderItem {
        id: order_item_id,
        order_id,
        menu_item_id: item.menu_item_id,
        quantity: item.quantity,
        unit_price_cents: item.unit_price_cents,
        notes: item.notes.clone(),
        excluded_ingredient_ids: item.excluded_ingredient_ids.clone(),
    })
}

/// Items of an order with their excluded ingredient ids.
async fn items_in(conn: &mut SqliteConnection, order_id: i64) -> DbResult<Vec<OrderItem>> {
    let mut items = sqlx::query_as::<_, OrderItem>(
        r#"
        SELECT id, order_id, menu_item_id, quantity, unit_price_cents, notes
        FROM order_items
        WHERE order_id = ?1
        ORDER BY id
        "#,
    )
    .bind(order_id)
    .fetch_all(&mut *conn)
    .await?;

    let exclusions: Vec<(i64, i64)> = sqlx::query_as(
        r#"
        SELECT e.order_item_id, e.ingredient_id
        FROM order_item_exclusions e
        JOIN order_items oi ON oi.id = e.order_item_id
        WHERE oi.order_id = ?1
        ORDER BY e.order_item_id, e.ingredient_id
        "#,
    )
    .bind(order_id)
    .fetch_all(&mut *conn)
    .await?;

    for item in &mut items {
        item.excluded_ingredient_ids = exclusions
            .iter()
            .filter(|(order_item_id, _)| *order_item_id == item.id)
            .map(|(_, ingredient_id)| *ingredient_id)
            .collect();
    }

    Ok(items)
}

/// Current status of an order, read on the caller's connection.
async fn order_status_in(
    conn: &mut SqliteConnection,
    order_id: i64,
) -> DbResult<Option<OrderStatus>> {
    let status = sqlx::query_scalar::<_, OrderStatus>("SELECT status FROM orders WHERE id = ?1")
        .bind(order_id)
        .fetch_optional(conn)
        .await?;

    Ok(status)
}

/// Explains why a guarded order update matched no row:
/// the order is missing, or its status forbids the operation.
pub(crate) async fn order_unavailable_in(conn: &mut SqliteConnection, order_id: i64) -> DbError {
    match order_status_in(conn, order_id).await {
        Ok(Some(status)) => CoreError::InvalidOrderStatus {
            order_id,
            current_status: status.to_string(),
        }
        .into(),
        Ok(None) => DbError::not_found("Order", order_id),
        Err(e) => e,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::test_support::fixture;
    use resto_core::{MovementReason, NewRecipeLine, OrderType};

    #[tokio::test]
    async fn test_place_order_consumes_recipe() {
        let f = fixture().await;

        // 2 plates: rice 1.5 each, egg 1 each
        let order = f.db.orders().place_order(&f.order(vec![f.line(2)])).await.unwrap();

        assert_eq!(order.status, OrderStatus::Open);
        assert_eq!(order.items.len(), 1);
        assert_eq!(order.items[0].quantity, 2);
        assert_eq!(order.items[0].unit_price_cents, 1000);
        assert!(Uuid::parse_str(&order.order_number).is_ok());

        assert_eq!(f.stock(f.rice.id).await, 7.0);
        assert_eq!(f.stock(f.egg.id).await, 3.0);

        let movements = f.db.ingredients().movements(f.rice.id).await.unwrap();
        assert_eq!(movements.len(), 1);
        assert_eq!(movements[0].delta, -3.0);
        assert_eq!(movements[0].reason, MovementReason::OrderConsumption);
        assert_eq!(movements[0].order_item_id, Some(order.items[0].id));
    }

    #[tokio::test]
    async fn test_excluded_ingredient_not_consumed() {
        let f = fixture().await;
        let mut line = f.line(1);
        line.excluded_ingredient_ids = vec![f.egg.id];

        let order = f.db.orders().place_order(&f.order(vec![line])).await.unwrap();

        assert_eq!(order.items[0].excluded_ingredient_ids, vec![f.egg.id]);
        assert_eq!(f.stock(f.egg.id).await, 5.0);
        assert_eq!(f.stock(f.rice.id).await, 8.5);
    }

    #[tokio::test]
    async fn test_excluding_fixed_ingredient_rejected() {
        let f = fixture().await;
        let mut line = f.line(1);
        line.excluded_ingredient_ids = vec![f.rice.id];

        let err = f.db.orders().place_order(&f.order(vec![line])).await.unwrap_err();

        assert!(matches!(
            err,
            DbError::Domain(CoreError::IngredientNotRemovable { .. })
        ));
        assert!(f.db.orders().list(None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_exclusion_outside_recipe_is_ignored() {
        let f = fixture().await;
        let mut line = f.line(2);
        line.excluded_ingredient_ids = vec![424_242];

        let order = f.db.orders().place_order(&f.order(vec![line])).await.unwrap();

        assert!(order.items[0].excluded_ingredient_ids.is_empty());
        assert_eq!(f.stock(f.rice.id).await, 7.0);
        assert_eq!(f.stock(f.egg.id).await, 3.0);
    }

    #[tokio::test]
    async fn test_failure_on_later_line_rolls_back_everything() {
        let f = fixture().await;

        // Line 1 fits (rice 10 → 8.5), line 2 needs 9 more rice
        let err = f
            .db
            .orders()
            .place_order(&f.order(vec![f.line(1), f.line(6)]))
            .await
            .unwrap_err();

        match err {
            DbError::Domain(CoreError::InsufficientStock {
                ingredient_id,
                available,
                requested,
                ..
            }) => {
                assert_eq!(ingredient_id, f.rice.id);
                assert_eq!(available, 8.5);
                assert_eq!(requested, 9.0);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        assert_eq!(f.stock(f.rice.id).await, 10.0);
        assert_eq!(f.stock(f.egg.id).await, 5.0);
        assert!(f.db.orders().list(None).await.unwrap().is_empty());
        assert!(f.db.ingredients().movements(f.rice.id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_menu_item_rolls_back() {
        let f = fixture().await;
        let mut missing = f.line(1);
        missing.menu_item_id = 9999;

        let err = f
            .db
            .orders()
            .place_order(&f.order(vec![f.line(1), missing]))
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::NotFound { .. }));
        assert_eq!(f.stock(f.rice.id).await, 10.0);
    }

    #[tokio::test]
    async fn test_unknown_outlet_rejected() {
        let f = fixture().await;
        let mut order = f.order(vec![f.line(1)]);
        order.outlet_id = 404;

        let err = f.db.orders().place_order(&order).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { ref entity, .. } if entity == "Outlet"));
    }

    #[tokio::test]
    async fn test_item_without_recipe_consumes_nothing() {
        let f = fixture().await;
        let mut line = f.line(1);
        let tea = f
            .db
            .catalog()
            .create_menu_item(&resto_core::NewMenuItem {
                category_id: f.fried_rice.category_id,
                sku: "TEA".to_string(),
                name: "Tea".to_string(),
                description: None,
                price_cents: 300,
                cost_cents: 50,
                preparation_time_minutes: 2,
                tags: vec![],
                is_active: None,
            })
            .await
            .unwrap();
        line.menu_item_id = tea.id;

        f.db.orders().place_order(&f.order(vec![line])).await.unwrap();
        assert_eq!(f.stock(f.rice.id).await, 10.0);
    }

    #[tokio::test]
    async fn test_add_item_to_open_order() {
        let f = fixture().await;
        let order = f.db.orders().place_order(&f.order(vec![f.line(1)])).await.unwrap();

        let added = f.db.orders().add_item(order.id, &f.line(2)).await.unwrap();
        assert_eq!(added.order_id, order.id);
        assert_eq!(f.stock(f.rice.id).await, 5.5);

        let reloaded = f.db.orders().get(order.id).await.unwrap();
        assert_eq!(reloaded.items.len(), 2);
    }

    #[tokio::test]
    async fn test_add_item_rejected_on_closed_or_missing_order() {
        let f = fixture().await;
        let order = f.db.orders().place_order(&f.order(vec![f.line(1)])).await.unwrap();

        f.db.orders()
            .update(
                order.id,
                &OrderUpdate {
                    status: Some(OrderStatus::Closed),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        let err = f.db.orders().add_item(order.id, &f.line(1)).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidOrderStatus { .. })
        ));

        let err = f.db.orders().add_item(777, &f.line(1)).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));

        // Nothing consumed by the rejected adds
        assert_eq!(f.stock(f.rice.id).await, 8.5);
    }

    #[tokio::test]
    async fn test_add_item_shortage_keeps_order_intact() {
        let f = fixture().await;
        let order = f.db.orders().place_order(&f.order(vec![f.line(1)])).await.unwrap();

        let err = f.db.orders().add_item(order.id, &f.line(50)).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InsufficientStock { .. })
        ));

        let reloaded = f.db.orders().get(order.id).await.unwrap();
        assert_eq!(reloaded.items.len(), 1);
        assert_eq!(f.stock(f.rice.id).await, 8.5);
    }

    #[tokio::test]
    async fn test_update_fields() {
        let f = fixture().await;
        let order = f.db.orders().place_order(&f.order(vec![f.line(1)])).await.unwrap();

        let updated = f
            .db
            .orders()
            .update(
                order.id,
                &OrderUpdate {
                    hotel_room: Some("1204".to_string()),
                    order_type: Some(OrderType::RoomService),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.hotel_room.as_deref(), Some("1204"));
        assert_eq!(updated.order_type, OrderType::RoomService);
        assert_eq!(updated.table_id, order.table_id);

        let err = f
            .db
            .orders()
            .update(
                order.id,
                &OrderUpdate {
                    status: Some(OrderStatus::Void),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));
    }

    #[tokio::test]
    async fn test_void_keeps_stock_by_default() {
        let f = fixture().await;
        let order = f.db.orders().place_order(&f.order(vec![f.line(2)])).await.unwrap();

        let voided = f.db.orders().void(order.id, VoidPolicy::KeepStock).await.unwrap();
        assert_eq!(voided.status, OrderStatus::Void);
        assert_eq!(f.stock(f.rice.id).await, 7.0);

        let err = f
            .db
            .orders()
            .void(order.id, VoidPolicy::KeepStock)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::InvalidOrderStatus { .. })
        ));
    }

    #[tokio::test]
    async fn test_void_with_restock_returns_exactly_what_was_consumed() {
        let f = fixture().await;

        let mut no_egg = f.line(1);
        no_egg.excluded_ingredient_ids = vec![f.egg.id];
        let order = f
            .db
            .orders()
            .place_order(&f.order(vec![f.line(2), no_egg]))
            .await
            .unwrap();
        assert_eq!(f.stock(f.rice.id).await, 5.5);
        assert_eq!(f.stock(f.egg.id).await, 3.0);

        // Recipe changes after the order must not affect the restock
        let lines = f.db.catalog().recipe_lines(f.fried_rice.id).await.unwrap();
        let rice_line = lines.iter().find(|l| l.ingredient_id == f.rice.id).unwrap();
        f.db.catalog().delete_recipe_line(rice_line.id).await.unwrap();
        f.db.catalog()
            .add_recipe_line(&NewRecipeLine {
                menu_item_id: f.fried_rice.id,
                ingredient_id: f.rice.id,
                qty_per_unit: 4.0,
                is_removable: false,
                is_default: true,
            })
            .await
            .unwrap();

        f.db.orders().void(order.id, VoidPolicy::Restock).await.unwrap();

        assert_eq!(f.stock(f.rice.id).await, 10.0);
        assert_eq!(f.stock(f.egg.id).await, 5.0);

        let movements = f.db.ingredients().movements(f.rice.id).await.unwrap();
        let restocked: f64 = movements
            .iter()
            .filter(|m| m.reason == MovementReason::VoidRestock)
            .map(|m| m.delta)
            .sum();
        assert_eq!(restocked, 4.5);
    }

    #[tokio::test]
    async fn test_list_filters_by_status() {
        let f = fixture().await;
        let first = f.db.orders().place_order(&f.order(vec![f.line(1)])).await.unwrap();
        let second = f.db.orders().place_order(&f.order(vec![f.line(1)])).await.unwrap();
        f.db.orders().void(first.id, VoidPolicy::KeepStock).await.unwrap();

        let open = f.db.orders().list(Some(OrderStatus::Open)).await.unwrap();
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, second.id);
        assert_eq!(open[0].items.len(), 1);

        let all = f.db.orders().list(None).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, second.id);
    }
}
