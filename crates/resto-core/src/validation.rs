//! # Validation Module
//!
//! Input validation run on request bodies before any transaction opens.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: HTTP extractors (axum)                                       │
//! │  ├── Malformed JSON, wrong types                                       │
//! │  └── Non-numeric path ids                                              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Quantities, prices, discounts, rates                              │
//! │  └── Request shape rules (items present, splits disjoint)              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Transaction (resto-db)                                       │
//! │  ├── Existence checks (menu item, bill, order)                         │
//! │  ├── Conditional stock decrement                                       │
//! │  └── UNIQUE / FOREIGN KEY constraints                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use resto_core::validation::{validate_sku, validate_quantity};
//!
//! assert!(validate_sku("NASI-GORENG").is_ok());
//! assert!(validate_quantity(5).is_ok());
//! ```

use std::collections::HashSet;

use crate::billing::ensure_disjoint_splits;
use crate::error::{CoreResult, ValidationError};
use crate::types::{
    CustomerType, NewCustomer, NewCustomerVisit, NewDiningTable, NewMenuItem, NewOrder,
    NewOrderItem, NewPayment, NewReservation, NewStaff, NewTransfer, PaymentMethod,
    SplitBillRequest,
};
use crate::{MAX_ITEM_QUANTITY, MAX_MONEY_CENTS, MAX_ORDER_ITEMS, MAX_TABLE_CAPACITY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Upper bound for tax and service rates (100%).
const MAX_RATE_BPS: u32 = 10_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
///
/// ## Example
/// ```rust
/// use resto_core::validation::validate_sku;
///
/// assert!(validate_sku("ICED-TEA").is_ok());
/// assert!(validate_sku("").is_err());
/// assert!(validate_sku("A".repeat(100).as_str()).is_err());
/// ```
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a display name (menu item, category, ingredient, outlet).
///
/// ## Rules
/// - Must not be empty
/// - At most 200 characters
pub fn validate_name(field: &str, name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a search query and returns it trimmed.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "q".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates menu item tags.
///
/// ## Rules
/// - At most 20 tags
/// - Each tag 1..=32 characters after trimming
/// - No tag listed twice (case-insensitive)
pub fn validate_tags(tags: &[String]) -> ValidationResult<()> {
    if tags.len() > 20 {
        return Err(ValidationError::OutOfRange {
            field: "tags".to_string(),
            min: 0,
            max: 20,
        });
    }

    let mut seen = HashSet::with_capacity(tags.len());
    for tag in tags {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(ValidationError::Required {
                field: "tags".to_string(),
            });
        }
        if tag.len() > 32 {
            return Err(ValidationError::TooLong {
                field: "tags".to_string(),
                max: 32,
            });
        }
        if !seen.insert(tag.to_lowercase()) {
            return Err(ValidationError::Duplicate {
                field: "tags".to_string(),
                value: tag.to_string(),
            });
        }
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates an order line quantity.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed MAX_ITEM_QUANTITY (999)
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents.
///
/// ## Example
/// ```rust
/// use resto_core::validation::validate_price_cents;
///
/// assert!(validate_price_cents(1099).is_ok());  // $10.99
/// assert!(validate_price_cents(0).is_ok());     // Complimentary item
/// assert!(validate_price_cents(-100).is_err());
/// assert!(validate_price_cents(i64::MAX).is_err());
/// ```
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    validate_money_cents("price_cents", cents)
}

/// Validates a flat discount in cents. Zero means no discount.
pub fn validate_discount(cents: i64) -> ValidationResult<()> {
    validate_money_cents("discount_cents", cents)
}

/// Validates a payment amount in cents.
///
/// ## Rules
/// - Must be positive (> 0)
/// - At most `MAX_MONEY_CENTS`
pub fn validate_payment_amount(cents: i64) -> ValidationResult<()> {
    if cents <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "amount_cents".to_string(),
        });
    }

    validate_money_cents("amount_cents", cents)
}

/// Validates a money amount in `0..=MAX_MONEY_CENTS`.
pub fn validate_money_cents(field: &str, cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    if cents > MAX_MONEY_CENTS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_MONEY_CENTS,
        });
    }

    Ok(())
}

/// Validates a tax or service rate in basis points (0% to 100%).
pub fn validate_rate_bps(field: &str, bps: u32) -> ValidationResult<()> {
    if bps > MAX_RATE_BPS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: 0,
            max: MAX_RATE_BPS as i64,
        });
    }

    Ok(())
}

/// Validates a stock or recipe quantity.
pub fn validate_stock_quantity(field: &str, qty: f64) -> ValidationResult<()> {
    if !qty.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if qty < 0.0 {
        return Err(ValidationError::MustNotBeNegative {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Request Validators
// =============================================================================

/// Validates a menu item before insert.
pub fn validate_new_menu_item(item: &NewMenuItem) -> ValidationResult<()> {
    validate_sku(&item.sku)?;
    validate_name("name", &item.name)?;
    validate_price_cents(item.price_cents)?;

    validate_money_cents("cost_cents", item.cost_cents)?;
    validate_tags(&item.tags)?;

    if item.preparation_time_minutes < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "preparation_time_minutes".to_string(),
        });
    }

    Ok(())
}

/// Validates one order line.
///
/// ## Rules
/// - Quantity in 1..=999
/// - Unit price non-negative
/// - Excluded ingredient ids listed at most once
pub fn validate_order_item(item: &NewOrderItem) -> ValidationResult<()> {
    validate_quantity(item.quantity)?;
    validate_price_cents(item.unit_price_cents)?;

    let mut seen = HashSet::new();
    for id in &item.excluded_ingredient_ids {
        if !seen.insert(*id) {
            return Err(ValidationError::Duplicate {
                field: "excluded_ingredient_ids".to_string(),
                value: id.to_string(),
            });
        }
    }

    Ok(())
}

/// Validates a new order.
///
/// ## User Workflow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  POST /orders                                                           │
/// │       │                                                                 │
/// │       ▼                                                                 │
/// │  validate_new_order ← THIS FUNCTION                                    │
/// │       │                                                                 │
/// │       ├── no items?        → "items is required"                       │
/// │       ├── > 100 items?     → "items must be between 1 and 100"         │
/// │       ├── bad line?        → quantity / price / exclusion error        │
/// │       │                                                                 │
/// │       └── OK → OrderRepository::place_order (one transaction)          │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn validate_new_order(order: &NewOrder) -> ValidationResult<()> {
    if order.items.is_empty() {
        return Err(ValidationError::Required {
            field: "items".to_string(),
        });
    }

    if order.items.len() > MAX_ORDER_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_ORDER_ITEMS as i64,
        });
    }

    for item in &order.items {
        validate_order_item(item)?;
    }

    Ok(())
}

/// Validates a split request.
///
/// Structural checks return `ValidationError`; an item named by two splits
/// returns `CoreError::DuplicateSplitItem`.
pub fn validate_split_request(request: &SplitBillRequest) -> CoreResult<()> {
    if request.splits.is_empty() {
        return Err(ValidationError::Required {
            field: "splits".to_string(),
        }
        .into());
    }

    for split in &request.splits {
        if split.item_ids.is_empty() {
            return Err(ValidationError::Required {
                field: "item_ids".to_string(),
            }
            .into());
        }
        validate_discount(split.discount_cents)?;
    }

    ensure_disjoint_splits(&request.splits)
}

/// Validates a payment.
///
/// ## Rules
/// - Amount must be positive
/// - Room charges must name the approving staff member
pub fn validate_payment(payment: &NewPayment) -> ValidationResult<()> {
    validate_payment_amount(payment.amount_cents)?;

    if payment.method == PaymentMethod::RoomCharge && payment.room_charge_approved_by.is_none() {
        return Err(ValidationError::Required {
            field: "room_charge_approved_by".to_string(),
        });
    }

    Ok(())
}

/// Validates a table transfer. Moving an order to its own table is rejected.
pub fn validate_transfer(transfer: &NewTransfer) -> ValidationResult<()> {
    if transfer.from_table_id == transfer.to_table_id {
        return Err(ValidationError::InvalidFormat {
            field: "to_table_id".to_string(),
            reason: "must differ from from_table_id".to_string(),
        });
    }

    Ok(())
}

/// Validates a reservation request.
pub fn validate_reservation(reservation: &NewReservation) -> ValidationResult<()> {
    validate_pax(reservation.pax)
}

/// Validates a table's seat count: 1..=50.
pub fn validate_capacity(capacity: i64) -> ValidationResult<()> {
    if !(1..=MAX_TABLE_CAPACITY).contains(&capacity) {
        return Err(ValidationError::OutOfRange {
            field: "capacity".to_string(),
            min: 1,
            max: MAX_TABLE_CAPACITY,
        });
    }

    Ok(())
}

/// Validates a new dining table.
pub fn validate_new_table(table: &NewDiningTable) -> ValidationResult<()> {
    validate_table_number(&table.table_number)?;
    validate_capacity(table.capacity)
}

/// Table labels: 1..=20 characters.
pub fn validate_table_number(number: &str) -> ValidationResult<()> {
    let number = number.trim();

    if number.is_empty() {
        return Err(ValidationError::Required {
            field: "table_number".to_string(),
        });
    }
    if number.len() > 20 {
        return Err(ValidationError::TooLong {
            field: "table_number".to_string(),
            max: 20,
        });
    }

    Ok(())
}

/// Validates a staff PIN: 4 to 6 ASCII digits.
///
/// ## Example
/// ```rust
/// use resto_core::validation::validate_pin;
///
/// assert!(validate_pin("0420").is_ok());
/// assert!(validate_pin("12a4").is_err());
/// assert!(validate_pin("123").is_err());
/// ```
pub fn validate_pin(pin: &str) -> ValidationResult<()> {
    if !(4..=6).contains(&pin.len()) || !pin.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pin_code".to_string(),
            reason: "must be 4 to 6 digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a new staff member.
pub fn validate_new_staff(staff: &NewStaff) -> ValidationResult<()> {
    validate_name("name", &staff.name)?;
    validate_name("role", &staff.role)?;
    validate_pin(&staff.pin_code)
}

/// Phone numbers: digits with optional `+`, spaces and hyphens, at most 30
/// characters.
pub fn validate_phone(phone: &str) -> ValidationResult<()> {
    let phone = phone.trim();

    if phone.len() > 30 {
        return Err(ValidationError::TooLong {
            field: "phone".to_string(),
            max: 30,
        });
    }
    if !phone.chars().any(|c| c.is_ascii_digit())
        || !phone
            .chars()
            .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | ' '))
    {
        return Err(ValidationError::InvalidFormat {
            field: "phone".to_string(),
            reason: "must contain only digits, '+', '-' and spaces".to_string(),
        });
    }

    Ok(())
}

/// Validates a new customer.
///
/// ## Rules
/// - Name required
/// - Hotel guests must carry a `hotel_guest_id`
pub fn validate_new_customer(customer: &NewCustomer) -> ValidationResult<()> {
    validate_name("name", &customer.name)?;

    if let Some(phone) = &customer.phone {
        validate_phone(phone)?;
    }

    let has_guest_id = customer
        .hotel_guest_id
        .as_deref()
        .is_some_and(|id| !id.trim().is_empty());
    if customer.customer_type == CustomerType::HotelGuest && !has_guest_id {
        return Err(ValidationError::Required {
            field: "hotel_guest_id".to_string(),
        });
    }

    Ok(())
}

/// Validates a guest count.
pub fn validate_pax(pax: i64) -> ValidationResult<()> {
    if pax <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "pax".to_string(),
        });
    }

    Ok(())
}

/// Validates a visit before insert.
pub fn validate_new_visit(visit: &NewCustomerVisit) -> ValidationResult<()> {
    validate_pax(visit.pax)?;
    validate_money_cents("total_spent_cents", visit.total_spent_cents)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::types::{OrderType, SplitPart};

    fn line(quantity: i64, price: i64) -> NewOrderItem {
        NewOrderItem {
            menu_item_id: 1,
            quantity,
            unit_price_cents: price,
            notes: None,
            excluded_ingredient_ids: vec![],
        }
    }

    fn order(items: Vec<NewOrderItem>) -> NewOrder {
        NewOrder {
            table_id: 1,
            customer_id: 1,
            hotel_room: None,
            waiter_id: 1,
            outlet_id: 1,
            order_type: OrderType::DineIn,
            items,
        }
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("NASI-GORENG").is_ok());
        assert!(validate_sku("item_1").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(1000).is_err());
    }

    #[test]
    fn test_validate_rate_bps() {
        assert!(validate_rate_bps("tax_rate_bps", 0).is_ok());
        assert!(validate_rate_bps("tax_rate_bps", 1000).is_ok());
        assert!(validate_rate_bps("tax_rate_bps", 10_001).is_err());
    }

    #[test]
    fn test_validate_new_order() {
        assert!(validate_new_order(&order(vec![line(2, 1000)])).is_ok());

        assert!(matches!(
            validate_new_order(&order(vec![])),
            Err(ValidationError::Required { .. })
        ));
        assert!(validate_new_order(&order(vec![line(0, 1000)])).is_err());
        assert!(validate_new_order(&order(vec![line(1, -5)])).is_err());
    }

    #[test]
    fn test_money_inputs_are_capped() {
        assert!(validate_price_cents(MAX_MONEY_CENTS).is_ok());
        assert!(matches!(
            validate_price_cents(MAX_MONEY_CENTS + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_new_order(&order(vec![line(1, i64::MAX)])).is_err());

        assert!(validate_discount(MAX_MONEY_CENTS).is_ok());
        assert!(validate_discount(MAX_MONEY_CENTS + 1).is_err());

        assert!(validate_payment_amount(MAX_MONEY_CENTS).is_ok());
        assert!(validate_payment_amount(i64::MAX).is_err());
    }

    #[test]
    fn test_validate_tags() {
        let tags = |list: &[&str]| list.iter().map(|t| t.to_string()).collect::<Vec<_>>();

        assert!(validate_tags(&[]).is_ok());
        assert!(validate_tags(&tags(&["spicy", "vegan"])).is_ok());
        assert!(matches!(
            validate_tags(&tags(&["spicy", " "])),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_tags(&tags(&["Spicy", "spicy"])),
            Err(ValidationError::Duplicate { .. })
        ));
        assert!(validate_tags(&tags(&[&"x".repeat(33)])).is_err());
    }

    #[test]
    fn test_floor_and_guest_rules() {
        let table = |number: &str, capacity| NewDiningTable {
            outlet_id: 1,
            table_number: number.to_string(),
            capacity,
            location_type: None,
            status: Default::default(),
        };
        assert!(validate_new_table(&table("A4", 4)).is_ok());
        assert!(validate_new_table(&table(" ", 4)).is_err());
        assert!(matches!(
            validate_new_table(&table("A4", 0)),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_new_table(&table("A4", MAX_TABLE_CAPACITY + 1)).is_err());

        assert!(validate_pin("123456").is_ok());
        assert!(validate_pin("1234567").is_err());
        assert!(validate_pin("12 4").is_err());

        let mut guest = NewCustomer {
            hotel_guest_id: None,
            customer_type: CustomerType::HotelGuest,
            name: "Dewi".to_string(),
            phone: Some("+62 812-3456".to_string()),
        };
        assert!(matches!(
            validate_new_customer(&guest),
            Err(ValidationError::Required { .. })
        ));
        guest.hotel_guest_id = Some("G-1021".to_string());
        assert!(validate_new_customer(&guest).is_ok());
        guest.phone = Some("call me".to_string());
        assert!(validate_new_customer(&guest).is_err());

        assert!(validate_pax(0).is_err());
    }

    #[test]
    fn test_duplicate_exclusions_rejected() {
        let mut item = line(1, 500);
        item.excluded_ingredient_ids = vec![3, 3];
        assert!(matches!(
            validate_order_item(&item),
            Err(ValidationError::Duplicate { .. })
        ));
    }

    #[test]
    fn test_validate_split_request() {
        let request = |splits| SplitBillRequest {
            original_bill_id: 1,
            original_order_id: 1,
            splits,
        };

        assert!(validate_split_request(&request(vec![SplitPart {
            item_ids: vec![1],
            discount_cents: 0
        }]))
        .is_ok());

        assert!(matches!(
            validate_split_request(&request(vec![])),
            Err(CoreError::Validation(_))
        ));

        assert!(matches!(
            validate_split_request(&request(vec![SplitPart {
                item_ids: vec![1],
                discount_cents: -1
            }])),
            Err(CoreError::Validation(_))
        ));

        assert!(matches!(
            validate_split_request(&request(vec![
                SplitPart {
                    item_ids: vec![1, 2],
                    discount_cents: 0
                },
                SplitPart {
                    item_ids: vec![2, 3],
                    discount_cents: 0
                },
            ])),
            Err(CoreError::DuplicateSplitItem { item_id: 2 })
        ));
    }

    #[test]
    fn test_room_charge_needs_approver() {
        let mut payment = NewPayment {
            bill_id: 1,
            method: PaymentMethod::RoomCharge,
            amount_cents: 1000,
            reference_number: None,
            room_charge_approved_by: None,
        };
        assert!(validate_payment(&payment).is_err());

        payment.room_charge_approved_by = Some(4);
        assert!(validate_payment(&payment).is_ok());

        payment.method = PaymentMethod::Cash;
        payment.amount_cents = 0;
        assert!(validate_payment(&payment).is_err());
    }

    #[test]
    fn test_validate_transfer() {
        let mut transfer = NewTransfer {
            order_id: 1,
            from_table_id: 3,
            to_table_id: 3,
            transferred_by: 2,
            reason: None,
        };
        assert!(validate_transfer(&transfer).is_err());

        transfer.to_table_id = 5;
        assert!(validate_transfer(&transfer).is_ok());
    }
}
