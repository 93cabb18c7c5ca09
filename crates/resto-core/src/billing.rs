//! # Billing Module
//!
//! Pure bill arithmetic shared by whole-order bills and split bills.
//!
//! ## Calculation Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  subtotal            Σ line prices                                      │
//! │     │                                                                   │
//! │     ├──► service  = round(subtotal × service_bps / 10000)               │
//! │     │                                                                   │
//! │     ├──► tax      = round((subtotal + service) × tax_bps / 10000)       │
//! │     │               (service charge is taxable)                         │
//! │     │                                                                   │
//! │     └──► total    = max(0, subtotal + service + tax − discount)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The same function prices every bill, so a split can never round
//! differently from the bill it came from.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::{Money, Rate};
use crate::types::SplitPart;

// =============================================================================
// Charge Rates
// =============================================================================

/// Tax and service charge rates of an outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChargeRates {
    pub tax: Rate,
    pub service: Rate,
}

impl ChargeRates {
    pub const fn new(tax: Rate, service: Rate) -> Self {
        ChargeRates { tax, service }
    }
}

// =============================================================================
// Bill Totals
// =============================================================================

/// Computed money columns of a bill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct BillTotals {
    pub subtotal: Money,
    pub service_charge: Money,
    pub tax: Money,
    pub discount: Money,
    pub total: Money,
}

impl BillTotals {
    /// Prices a bill.
    ///
    /// ## Arguments
    /// * `subtotal` - Sum of the line prices being billed
    /// * `rates` - The outlet's tax and service rates
    /// * `discount` - Flat discount, applied after tax
    ///
    /// ## Returns
    /// The bill's money columns. `total` is floored at zero, so a discount
    /// larger than the bill yields a free bill, never a negative one.
    /// Fails with `ValidationError::Overflow` when a sum leaves `i64`.
    ///
    /// ## Example
    /// ```rust
    /// use resto_core::billing::{BillTotals, ChargeRates};
    /// use resto_core::money::{Money, Rate};
    ///
    /// let rates = ChargeRates::new(Rate::from_bps(1000), Rate::from_bps(500));
    /// let totals = BillTotals::compute(Money::from_cents(500), rates, Money::from_cents(10_000)).unwrap();
    /// assert!(totals.total.is_zero());
    /// ```
    pub fn compute(subtotal: Money, rates: ChargeRates, discount: Money) -> CoreResult<Self> {
        let service_charge = subtotal.apply_rate(rates.service);
        let taxable = subtotal
            .checked_add(service_charge)
            .ok_or_else(|| overflow("subtotal_cents"))?;
        let tax = taxable.apply_rate(rates.tax);
        let total = taxable
            .checked_add(tax)
            .and_then(|gross| gross.checked_sub(discount))
            .ok_or_else(|| overflow("total_cents"))?
            .clamp_non_negative();

        Ok(BillTotals {
            subtotal,
            service_charge,
            tax,
            discount,
            total,
        })
    }
}

fn overflow(field: &str) -> CoreError {
    ValidationError::Overflow {
        field: field.to_string(),
    }
    .into()
}

// =============================================================================
// Split Validation
// =============================================================================

/// Checks that no order item is named by more than one split.
///
/// Runs before any bill is written; a duplicate rejects the whole request.
///
/// ## Example
/// ```rust
/// use resto_core::billing::ensure_disjoint_splits;
/// use resto_core::SplitPart;
///
/// let splits = vec![
///     SplitPart { item_ids: vec![1, 2], discount_cents: 0 },
///     SplitPart { item_ids: vec![2], discount_cents: 0 },
/// ];
/// assert!(ensure_disjoint_splits(&splits).is_err());
/// ```
pub fn ensure_disjoint_splits(splits: &[SplitPart]) -> CoreResult<()> {
    let mut seen = HashSet::new();
    for item_id in splits.iter().flat_map(|s| s.item_ids.iter().copied()) {
        if !seen.insert(item_id) {
            return Err(CoreError::DuplicateSplitItem { item_id });
        }
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
