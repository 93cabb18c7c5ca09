//! # resto-core: Pure Business Logic for Resto POS
//!
//! This crate holds the settlement rules of the restaurant POS as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Resto POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    api-server (axum)                            │   │
//! │  │    POST /orders ──► POST /bills ──► POST /bills/pay             │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ resto-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  billing  │  │  recipe   │  │   │
//! │  │   │  Order    │  │   Money   │  │ BillTotals│  │  Usage    │  │   │
//! │  │   │  Bill     │  │   Rate    │  │  Splits   │  │  Plans    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    resto-db (Database Layer)                    │   │
//! │  │          SQLite transactions, migrations, repositories          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Order, Bill, Ingredient, Outlet, etc.)
//! - [`money`] - Money type with integer arithmetic and basis-point rates
//! - [`billing`] - Bill totals, split validation, payment status transitions
//! - [`recipe`] - Ingredient consumption planning for order lines
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation run before any transaction
//!
//! ## Example Usage
//!
//! ```rust
//! use resto_core::billing::{BillTotals, ChargeRates};
//! use resto_core::money::{Money, Rate};
//!
//! // Two plates at $10.00, 10% tax, 5% service, $2.00 discount
//! let subtotal = Money::from_cents(1000).multiply_quantity(2);
//! let rates = ChargeRates::new(Rate::from_bps(1000), Rate::from_bps(500));
//! let totals = BillTotals::compute(subtotal, rates, Money::from_cents(200)).unwrap();
//!
//! assert_eq!(totals.service_charge.cents(), 100);
//! assert_eq!(totals.tax.cents(), 210);
//! assert_eq!(totals.total.cents(), 2110);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod billing;
pub mod error;
pub mod money;
pub mod recipe;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, Rate};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum number of lines accepted in a single order request.
pub const MAX_ORDER_ITEMS: usize = 100;

/// Maximum quantity of a single order line.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10)
/// which would also drain ingredient stock in one keystroke.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Largest money amount accepted in a request: $1,000,000,000.00.
///
/// Keeps every sum a bill can reach (999 × this, plus charges) far inside
/// `i64`.
pub const MAX_MONEY_CENTS: i64 = 100_000_000_000;

/// Most seats a single dining table can have.
pub const MAX_TABLE_CAPACITY: i64 = 50;
