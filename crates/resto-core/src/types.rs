//! # Domain Types
//!
//! Core domain types used throughout Resto POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Catalog                  Inventory               Outlet                │
//! │  ┌─────────────────┐      ┌─────────────────┐     ┌─────────────────┐   │
//! │  │ Category        │      │ Ingredient      │     │ Outlet          │   │
//! │  │ MenuItem ───────┼──┐   │  quantity ≥ 0   │     │  tax_rate_bps   │   │
//! │  │ RecipeLine ─────┼──┼──►│ StockMovement   │     │  service_bps    │   │
//! │  └─────────────────┘  │   └─────────────────┘     └────────┬────────┘   │
//! │                       │                                    │            │
//! │  Settlement           ▼                                    ▼            │
//! │  ┌─────────────────┐      ┌─────────────────┐     ┌─────────────────┐   │
//! │  │ Order           │─────►│ Bill            │────►│ BillPayment     │   │
//! │  │  OrderItem[]    │      │  parent_bill_id │     │  method, amount │   │
//! │  └───────┬─────────┘      └─────────────────┘     └─────────────────┘   │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  TableTransfer (audit)            Reservation (table + exact time)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every row has a SQLite integer `id`. Orders and bills also carry a
//! UUID token (`order_number`, `bill_number`) that is safe to print on
//! tickets and never reused.
//!
//! ## Request Types
//! `New*` and `*Update` structs are the JSON request bodies. They are
//! validated by [`crate::validation`] before any transaction opens.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::billing::ChargeRates;
use crate::error::ValidationError;
use crate::money::{Money, Rate};

// =============================================================================
// Catalog: Category
// =============================================================================

/// A menu category ("Mains", "Drinks").
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCategory {
    pub name: String,
}

// =============================================================================
// Catalog: Menu Item
// =============================================================================

/// A dish or drink that can be ordered.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct MenuItem {
    pub id: i64,
    pub category_id: i64,

    /// Business identifier, unique among live items.
    pub sku: String,

    pub name: String,
    pub description: Option<String>,

    /// Menu price in cents.
    pub price_cents: i64,

    /// Ingredient cost in cents (for margin checks).
    pub cost_cents: i64,

    /// Whether the item can be ordered from the menu.
    ///
    /// This is a business flag, not a tombstone: an inactive item still
    /// appears in order history and in `GET /menu/menu-items`.
    pub is_active: bool,

    pub preparation_time_minutes: i64,

    /// Free-form labels such as "spicy" or "vegan", stored as a JSON array.
    #[cfg_attr(feature = "sqlx", sqlx(json))]
    pub tags: Vec<String>,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

/// Request body for creating a menu item.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewMenuItem {
    pub category_id: i64,
    pub sku: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price_cents: i64,
    #[serde(default)]
    pub cost_cents: i64,
    #[serde(default)]
    pub preparation_time_minutes: i64,
    #[serde(default)]
    pub tags: Vec<String>,

    /// Requested initial state; absent means active.
    #[serde(default)]
    pub is_active: Option<bool>,
}

impl NewMenuItem {
    /// Whether the item is created active.
    ///
    /// The caller's `is_active` is honoured, except that an item costing more
    /// to make than it sells for is always created inactive.
    ///
    /// ## Example
    /// ```rust
    /// use resto_core::NewMenuItem;
    ///
    /// let mut item = NewMenuItem {
    ///     category_id: 1,
    ///     sku: "LOBSTER".into(),
    ///     name: "Lobster".into(),
    ///     description: None,
    ///     price_cents: 1000,
    ///     cost_cents: 1500,
    ///     preparation_time_minutes: 20,
    ///     tags: vec![],
    ///     is_active: Some(true),
    /// };
    /// assert!(!item.starts_active());
    ///
    /// item.cost_cents = 500;
    /// item.is_active = Some(false);
    /// assert!(!item.starts_active());
    /// ```
    pub fn starts_active(&self) -> bool {
        self.is_active.unwrap_or(true) && !self.is_unprofitable()
    }

    /// Costs more to make than it sells for.
    pub fn is_unprofitable(&self) -> bool {
        self.cost_cents > self.price_cents
    }
}

/// Partial update for a menu item. Absent fields keep their value.
///
/// The cost/price auto-deactivation rule only runs on create.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItemUpdate {
    pub category_id: Option<i64>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub cost_cents: Option<i64>,
    pub is_active: Option<bool>,
    pub preparation_time_minutes: Option<i64>,

    /// Replaces the whole tag list.
    pub tags: Option<Vec<String>>,
}

// =============================================================================
// Catalog: Recipe Lines
// =============================================================================

/// One ingredient of a menu item's bill of materials.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct RecipeLine {
    pub id: i64,
    pub menu_item_id: i64,
    pub ingredient_id: i64,

    /// Quantity of the ingredient consumed per unit of the menu item,
    /// in the ingredient's own unit.
    pub qty_per_unit: f64,

    /// Guests may ask for this ingredient to be left out.
    pub is_removable: bool,

    /// Included unless excluded.
    pub is_default: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewRecipeLine {
    pub menu_item_id: i64,
    pub ingredient_id: i64,
    pub qty_per_unit: f64,
    #[serde(default)]
    pub is_removable: bool,
    #[serde(default = "default_true")]
    pub is_default: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RecipeLineUpdate {
    pub qty_per_unit: Option<f64>,
    pub is_removable: Option<bool>,
    pub is_default: Option<bool>,
}

/// A recipe line joined with its ingredient, for the menu detail view.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct RecipeLineDetail {
    pub id: i64,
    pub ingredient_id: i64,
    pub ingredient_name: String,
    pub unit: String,
    pub qty_per_unit: f64,
    pub is_removable: bool,
    pub is_default: bool,
    pub is_allergen: bool,
}

/// A menu item with its full recipe.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MenuItemDetail {
    #[serde(flatten)]
    pub item: MenuItem,
    pub ingredients: Vec<RecipeLineDetail>,
}

// =============================================================================
// Inventory
// =============================================================================

/// A stocked ingredient.
///
/// `quantity` is shared mutable state: order placement decrements it,
/// void-restock and manual adjustments move it. It never goes below zero.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub quantity: f64,
    /// Unit label ("kg", "pcs", "ml").
    pub unit: String,
    pub is_allergen: bool,
    pub is_active: bool,
    pub description: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewIngredient {
    pub name: String,
    #[serde(default)]
    pub quantity: f64,
    pub unit: String,
    #[serde(default)]
    pub is_allergen: bool,
    #[serde(default)]
    pub description: Option<String>,
}

/// Partial update for an ingredient.
///
/// No stock field: quantities only move through orders and
/// [`StockAdjustment`], so every change lands in the movement ledger.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct IngredientUpdate {
    pub name: Option<String>,
    pub unit: Option<String>,
    pub is_allergen: Option<bool>,
    pub is_active: Option<bool>,
    pub description: Option<String>,
}

/// Manual stock correction (delivery received, spoilage, stock take).
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockAdjustment {
    /// Signed change. Negative deltas may not take stock below zero.
    pub delta: f64,
}

/// Why a stock movement happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MovementReason {
    /// Consumed by an order line.
    OrderConsumption,
    /// Returned when an order was voided under [`VoidPolicy::Restock`].
    VoidRestock,
    /// Manual correction.
    ManualAdjustment,
}

/// One row of the append-only stock ledger.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct StockMovement {
    pub id: i64,
    pub ingredient_id: i64,
    pub order_item_id: Option<i64>,
    /// Signed: negative for consumption.
    pub delta: f64,
    pub reason: MovementReason,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Outlet
// =============================================================================

/// A point of sale location with its own tax and service charge.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Outlet {
    pub id: i64,
    pub name: String,
    pub location: Option<String>,
    /// Tax rate in basis points (1000 = 10%).
    pub tax_rate_bps: u32,
    /// Service charge in basis points (500 = 5%).
    pub service_charge_bps: u32,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Outlet {
    /// Rates applied to bills of orders placed at this outlet.
    pub fn charge_rates(&self) -> ChargeRates {
        ChargeRates::new(
            Rate::from_bps(self.tax_rate_bps),
            Rate::from_bps(self.service_charge_bps),
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewOutlet {
    pub name: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub tax_rate_bps: u32,
    #[serde(default)]
    pub service_charge_bps: u32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OutletUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub tax_rate_bps: Option<u32>,
    pub service_charge_bps: Option<u32>,
    pub is_active: Option<bool>,
}

// =============================================================================
// Order Status & Type
// =============================================================================

/// Lifecycle of an order.
///
/// ```text
///   open ──► closed
///     │
///     └────► void   (terminal, set by DELETE /orders/{id})
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Kitchen is working on it; items can still be added.
    Open,
    /// Service finished.
    Closed,
    /// Cancelled. Hidden from billing.
    Void,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Open
    }
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Open => "open",
            OrderStatus::Closed => "closed",
            OrderStatus::Void => "void",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum OrderType {
    DineIn,
    Takeaway,
    Delivery,
    RoomService,
}

impl Default for OrderType {
    fn default() -> Self {
        OrderType::DineIn
    }
}

// =============================================================================
// Order
// =============================================================================

/// An order placed for a table.
///
/// Reads always return the order with its items; the items are loaded by
/// the repository after the header row.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Order {
    pub id: i64,

    /// UUID token printed on the kitchen ticket.
    pub order_number: String,

    pub table_id: i64,
    pub customer_id: i64,
    pub hotel_room: Option<String>,
    pub waiter_id: i64,

    /// Outlet whose rates apply to this order's bills.
    pub outlet_id: i64,

    pub status: OrderStatus,
    pub order_type: OrderType,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,

    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub items: Vec<OrderItem>,
}

/// A line of an order.
///
/// `unit_price_cents` is captured when the line is placed; later menu price
/// changes do not affect existing orders.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub menu_item_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    pub notes: Option<String>,

    /// Recipe ingredients the guest asked to leave out.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub excluded_ingredient_ids: Vec<i64>,
}

impl OrderItem {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

/// Request body for `POST /orders`.
///
/// Unknown fields are rejected, so a misspelt field fails loudly instead of
/// falling back to its default.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct NewOrder {
    pub table_id: i64,
    pub customer_id: i64,
    #[serde(default)]
    pub hotel_room: Option<String>,
    pub waiter_id: i64,
    pub outlet_id: i64,
    #[serde(default)]
    pub order_type: OrderType,
    pub items: Vec<NewOrderItem>,
}

/// Request body for one order line (also `POST /orders/{id}/add`).
///
/// Also accepts the point-of-sale client names (`qty`, `unit_price`,
/// `excluded_ingredients`, and their camelCase forms). Prices are cents.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct NewOrderItem {
    #[serde(alias = "menuItemId")]
    pub menu_item_id: i64,
    #[serde(alias = "qty")]
    pub quantity: i64,
    #[serde(alias = "unit_price", alias = "unitPrice")]
    pub unit_price_cents: i64,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(
        default,
        alias = "excluded_ingredients",
        alias = "excludedIngredientIds"
    )]
    pub excluded_ingredient_ids: Vec<i64>,
}

/// Partial update for an order header.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct OrderUpdate {
    pub table_id: Option<i64>,
    pub customer_id: Option<i64>,
    pub hotel_room: Option<String>,
    pub waiter_id: Option<i64>,
    pub outlet_id: Option<i64>,
    pub status: Option<OrderStatus>,
    pub order_type: Option<OrderType>,
}

/// What happens to consumed ingredients when an order is voided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum VoidPolicy {
    /// Consumed stock stays consumed (food already prepared).
    KeepStock,
    /// Add back exactly what the order's items consumed.
    Restock,
}

impl Default for VoidPolicy {
    fn default() -> Self {
        VoidPolicy::KeepStock
    }
}

// =============================================================================
// Bill Status
// =============================================================================

/// Settlement state of a bill.
///
/// ```text
///   open ──► partial ──► paid
///     │                   ▲
///     └───────────────────┘   (one payment covering the total)
/// ```
///
/// Status only moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum BillStatus {
    Open,
    Partial,
    Paid,
}

impl Default for BillStatus {
    fn default() -> Self {
        BillStatus::Open
    }
}

impl BillStatus {
    /// Status of a bill after its paid amount became `paid`.
    ///
    /// ## Rules
    /// - `paid >= total` → `Paid`
    /// - `0 < paid < total` → `Partial`
    /// - otherwise the current status is kept
    ///
    /// The result is never behind `current`.
    ///
    /// ## Example
    /// ```rust
    /// use resto_core::{BillStatus, Money};
    ///
    /// let total = Money::from_cents(2110);
    /// let s = BillStatus::after_payment(Money::from_cents(1000), total, BillStatus::Open);
    /// assert_eq!(s, BillStatus::Partial);
    /// let s = BillStatus::after_payment(Money::from_cents(2110), total, s);
    /// assert_eq!(s, BillStatus::Paid);
    /// ```
    pub fn after_payment(paid: Money, total: Money, current: BillStatus) -> BillStatus {
        let next = if paid >= total {
            BillStatus::Paid
        } else if paid.is_positive() {
            BillStatus::Partial
        } else {
            current
        };
        next.max(current)
    }
}

// =============================================================================
// Bill
// =============================================================================

/// A bill for a whole order or for a split of one.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Bill {
    pub id: i64,
    /// UUID token printed on the receipt.
    pub bill_number: String,
    pub order_id: i64,
    /// Set on bills created by a split.
    pub parent_bill_id: Option<i64>,
    pub status: BillStatus,
    pub subtotal_cents: i64,
    pub service_charge_cents: i64,
    pub tax_cents: i64,
    pub discount_cents: i64,
    pub total_cents: i64,
    pub paid_cents: i64,
    /// `total_cents - paid_cents`, computed on read.
    pub balance_due_cents: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Bill {
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }

    #[inline]
    pub fn paid(&self) -> Money {
        Money::from_cents(self.paid_cents)
    }
}

/// Request body for `POST /bills`. `discount_amount` is accepted as an
/// alias; both carry cents.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct NewBill {
    pub order_id: i64,
    #[serde(default, alias = "discount_amount")]
    pub discount_cents: i64,
}

/// Request body for `POST /bills/split`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct SplitBillRequest {
    pub original_bill_id: i64,
    pub original_order_id: i64,
    pub splits: Vec<SplitPart>,
}

/// One child bill of a split: the order items it covers and its discount.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct SplitPart {
    pub item_ids: Vec<i64>,
    #[serde(default, alias = "discount_amount")]
    pub discount_cents: i64,
}

// =============================================================================
// Payments
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    EWallet,
    BankTransfer,
    /// Charged to a hotel room; needs a staff approver.
    RoomCharge,
}

/// A payment towards a bill. Append-only.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct BillPayment {
    pub id: i64,
    pub bill_id: i64,
    pub method: PaymentMethod,
    pub amount_cents: i64,
    /// Card slip, transfer or e-wallet reference.
    pub reference_number: Option<String>,
    /// Staff id that approved a room charge.
    pub room_charge_approved_by: Option<i64>,
    #[ts(as = "String")]
    pub paid_at: DateTime<Utc>,
}

/// Request body for `POST /bills/pay`.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(deny_unknown_fields)]
pub struct NewPayment {
    pub bill_id: i64,
    #[serde(alias = "payment_method")]
    pub method: PaymentMethod,
    #[serde(alias = "amount")]
    pub amount_cents: i64,
    #[serde(default)]
    pub reference_number: Option<String>,
    #[serde(default)]
    pub room_charge_approved_by: Option<i64>,
}

// =============================================================================
// Table Transfer
// =============================================================================

/// Audit record of an order moving between tables.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TableTransfer {
    pub id: i64,
    pub order_id: i64,
    pub from_table_id: i64,
    pub to_table_id: i64,
    pub transferred_by: i64,
    pub reason: Option<String>,
    #[ts(as = "String")]
    pub transferred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewTransfer {
    pub order_id: i64,
    pub from_table_id: i64,
    pub to_table_id: i64,
    pub transferred_by: i64,
    #[serde(default)]
    pub reason: Option<String>,
}

// =============================================================================
// Reservations
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ReservationStatus {
    Booked,
    Seated,
    Completed,
    /// Frees the table slot for another booking.
    Cancelled,
}

impl Default for ReservationStatus {
    fn default() -> Self {
        ReservationStatus::Booked
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Reservation {
    pub id: i64,
    pub customer_id: i64,
    pub table_id: i64,
    #[ts(as = "String")]
    pub reservation_time: DateTime<Utc>,
    pub pax: i64,
    pub status: ReservationStatus,
    pub special_request: Option<String>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or replacing a reservation.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewReservation {
    pub customer_id: i64,
    pub table_id: i64,
    #[ts(as = "String")]
    pub reservation_time: DateTime<Utc>,
    pub pax: i64,
    #[serde(default)]
    pub status: ReservationStatus,
    #[serde(default)]
    pub special_request: Option<String>,
}

/// Sort key for `GET /reservations?sort_by=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationSort {
    #[default]
    ReservationTime,
    Status,
    Table,
}

impl ReservationSort {
    /// SQL `ORDER BY` clause for this key. Only ever one of these literals.
    pub fn order_by(&self) -> &'static str {
        match self {
            ReservationSort::ReservationTime => "reservation_time ASC, id ASC",
            ReservationSort::Status => "status ASC, reservation_time ASC",
            ReservationSort::Table => "table_id ASC, reservation_time ASC",
        }
    }
}

impl FromStr for ReservationSort {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "reservation_time" => Ok(ReservationSort::ReservationTime),
            "status" => Ok(ReservationSort::Status),
            "table" | "table_id" => Ok(ReservationSort::Table),
            other => Err(ValidationError::InvalidFormat {
                field: "sort_by".to_string(),
                reason: format!("unknown sort key '{other}'"),
            }),
        }
    }
}

// =============================================================================
// Floor: Dining Tables
// =============================================================================

/// Occupancy of a dining table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TableStatus {
    Available,
    Occupied,
    Reserved,
    OutOfService,
}

impl Default for TableStatus {
    fn default() -> Self {
        TableStatus::Available
    }
}

/// A physical table at an outlet.
///
/// `table_number` is the label printed on the table ("A4", "12") and is
/// unique among the live tables of one outlet.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct DiningTable {
    pub id: i64,
    pub outlet_id: i64,
    pub table_number: String,
    pub capacity: i64,
    /// Free text such as "indoor", "terrace" or "poolside".
    pub location_type: Option<String>,
    pub status: TableStatus,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewDiningTable {
    pub outlet_id: i64,
    pub table_number: String,
    pub capacity: i64,
    #[serde(default)]
    pub location_type: Option<String>,
    #[serde(default)]
    pub status: TableStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DiningTableUpdate {
    pub outlet_id: Option<i64>,
    pub table_number: Option<String>,
    pub capacity: Option<i64>,
    pub location_type: Option<String>,
    pub status: Option<TableStatus>,
}

// =============================================================================
// Staff
// =============================================================================

/// A waiter, cashier or manager.
///
/// The PIN is write-only: it is stored but never part of this struct.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Staff {
    pub id: i64,
    pub name: String,
    pub role: String,
    pub is_active: bool,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewStaff {
    pub name: String,
    pub role: String,
    /// 4 to 6 digits.
    pub pin_code: String,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl fmt::Debug for NewStaff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewStaff")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("pin_code", &"****")
            .field("is_active", &self.is_active)
            .finish()
    }
}

#[derive(Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StaffUpdate {
    pub name: Option<String>,
    pub role: Option<String>,
    pub pin_code: Option<String>,
    pub is_active: Option<bool>,
}

impl fmt::Debug for StaffUpdate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StaffUpdate")
            .field("name", &self.name)
            .field("role", &self.role)
            .field("pin_code", &self.pin_code.as_ref().map(|_| "****"))
            .field("is_active", &self.is_active)
            .finish()
    }
}

// =============================================================================
// Guests: Customers & Visits
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum CustomerType {
    WalkIn,
    /// Staying at the hotel; carries a `hotel_guest_id`.
    HotelGuest,
    Member,
}

impl Default for CustomerType {
    fn default() -> Self {
        CustomerType::WalkIn
    }
}

/// A guest profile.
///
/// `visit_count` and `last_visit` are derived from the customer's recorded
/// visits and cannot be written directly.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Customer {
    pub id: i64,
    pub hotel_guest_id: Option<String>,
    pub customer_type: CustomerType,
    pub name: String,
    pub phone: Option<String>,
    pub visit_count: i64,
    #[ts(as = "Option<String>")]
    pub last_visit: Option<DateTime<Utc>>,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCustomer {
    #[serde(default)]
    pub hotel_guest_id: Option<String>,
    #[serde(default, alias = "type")]
    pub customer_type: CustomerType,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerUpdate {
    pub hotel_guest_id: Option<String>,
    #[serde(alias = "type")]
    pub customer_type: Option<CustomerType>,
    pub name: Option<String>,
    pub phone: Option<String>,
}

/// One recorded visit of a customer to an outlet.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct CustomerVisit {
    pub id: i64,
    pub customer_id: i64,
    pub visit_type: OrderType,
    #[ts(as = "String")]
    pub visit_date: DateTime<Utc>,
    pub room_number: Option<String>,
    pub reservation_id: Option<i64>,
    pub outlet_id: i64,
    /// Amount spent during the visit, in cents.
    pub total_spent_cents: i64,
    pub pax: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

/// Request body for recording a visit. `visit_date` defaults to now.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewCustomerVisit {
    pub customer_id: i64,
    #[serde(default)]
    pub visit_type: OrderType,
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub visit_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub reservation_id: Option<i64>,
    pub outlet_id: i64,
    #[serde(default)]
    pub total_spent_cents: i64,
    pub pax: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CustomerVisitUpdate {
    pub visit_type: Option<OrderType>,
    #[ts(as = "Option<String>")]
    pub visit_date: Option<DateTime<Utc>>,
    pub room_number: Option<String>,
    pub total_spent_cents: Option<i64>,
    pub pax: Option<i64>,
}

fn default_true() -> bool {
    true
}

// =============================================================================
// Unit Tests
// =============================================================================
