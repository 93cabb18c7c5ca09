//! # Error Types
//!
//! Domain-specific error types for resto-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  resto-core errors (this file)                                         │
//! │  ├── CoreError        - Business rule violations                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  resto-db errors (separate crate)                                      │
//! │  └── DbError          - Database failures, wraps CoreError             │
//! │                                                                         │
//! │  api-server errors (in app)                                            │
//! │  └── ApiError         - What clients see (code + message)              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → ApiError → Client       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (ingredient, bill, table)
//! 3. Conflicts are distinct variants so callers never match on message text

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. Inside a database
/// transaction they are raised as `DbError::Domain`, which aborts and rolls
/// back the transaction.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Not enough of an ingredient to fulfil an order line.
    ///
    /// ## User Workflow
    /// ```text
    /// POST /orders (2 × Fried Rice)
    ///      │
    ///      ▼
    /// Recipe: 1.5 rice per plate → needs 3.0
    ///      │
    ///      ▼
    /// Stock check: available=2.0
    ///      │
    ///      ▼
    /// InsufficientStock { ingredient: "Rice", available: 2.0, requested: 3.0 }
    ///      │
    ///      ▼
    /// Whole order rolled back, nothing decremented
    /// ```
    #[error("Insufficient stock for {name} (ingredient {ingredient_id}): available {available}, requested {requested}")]
    InsufficientStock {
        ingredient_id: i64,
        name: String,
        available: f64,
        requested: f64,
    },

    /// The same order item appears in more than one split.
    #[error("Order item {item_id} appears in more than one split")]
    DuplicateSplitItem { item_id: i64 },

    /// A split request names a bill that belongs to another order.
    #[error("Bill {bill_id} belongs to order {bill_order_id}, not order {requested_order_id}")]
    BillOrderMismatch {
        bill_id: i64,
        bill_order_id: i64,
        requested_order_id: i64,
    },

    /// Table already has a live reservation at this exact time.
    #[error("Table {table_id} is already reserved at {reservation_time}")]
    DoubleBooked {
        table_id: i64,
        reservation_time: String,
    },

    /// Order is not in a state that allows the requested operation.
    ///
    /// ## When This Occurs
    /// - Adding items to a closed or void order
    /// - Billing a void order
    /// - Voiding an already void order
    /// - Transferring a void order to another table
    #[error("Order {order_id} is {current_status}, cannot perform operation")]
    InvalidOrderStatus {
        order_id: i64,
        current_status: String,
    },

    /// An order line tried to drop an ingredient the recipe marks as fixed.
    #[error("Ingredient {ingredient_id} cannot be removed from menu item {menu_item_id}")]
    IngredientNotRemovable {
        menu_item_id: i64,
        ingredient_id: i64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when request input doesn't meet requirements.
/// They are raised before any transaction is opened.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., bad SKU characters, bad sort key).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Arithmetic on the value would leave the representable money range.
    #[error("{field} is too large")]
    Overflow { field: String },

    /// Duplicate value inside a single request.
    #[error("{field} '{value}' is duplicated")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            ingredient_id: 7,
            name: "Rice".to_string(),
            available: 2.0,
            requested: 3.0,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Rice (ingredient 7): available 2, requested 3"
        );

        let err = CoreError::DuplicateSplitItem { item_id: 12 };
        assert_eq!(err.to_string(), "Order item 12 appears in more than one split");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "items".to_string(),
        };
        assert_eq!(err.to_string(), "items is required");

        let err = ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: 999,
        };
        assert_eq!(err.to_string(), "quantity must be between 1 and 999");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "amount_cents".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
