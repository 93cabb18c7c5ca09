//! # Recipe Module
//!
//! Turns an order line into the ingredient quantities it consumes.
//!
//! ```text
//! OrderLine: 2 × Fried Rice, exclude [Egg]
//!
//! Recipe (per plate)          Usage
//! ┌───────────────┬──────┐    ┌───────────────┬──────┐
//! │ Rice          │ 1.0  │ ─► │ Rice          │ 2.0  │
//! │ Egg (remov.)  │ 1.0  │ ✗  │               │      │
//! │ Oil           │ 0.05 │ ─► │ Oil           │ 0.1  │
//! └───────────────┴──────┘    └───────────────┴──────┘
//! ```
//!
//! The plan is computed here; the database layer applies it with one
//! conditional decrement per ingredient.

use std::collections::HashSet;

use crate::error::{CoreError, CoreResult};
use crate::types::RecipeLine;

/// Quantity of one ingredient consumed by an order line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IngredientUsage {
    pub ingredient_id: i64,
    pub quantity: f64,
}

/// Plans the ingredient consumption of one order line.
///
/// ## Arguments
/// * `menu_item_id` - Item being ordered (for error context)
/// * `recipe` - The item's recipe lines
/// * `quantity` - Units ordered
/// * `excluded` - Ingredient ids the guest asked to leave out
///
/// ## Returns
/// One usage per recipe line that is not excluded, in recipe order.
/// Fails with `IngredientNotRemovable` when an excluded id names a fixed
/// ingredient of the recipe. Ids the recipe does not use are ignored.
///
/// ## Example
/// ```rust
/// use resto_core::recipe::plan_consumption;
/// use resto_core::RecipeLine;
///
/// let recipe = vec![RecipeLine {
///     id: 1, menu_item_id: 9, ingredient_id: 3,
///     qty_per_unit: 1.5, is_removable: false, is_default: true,
/// }];
/// let plan = plan_consumption(9, &recipe, 2, &[]).unwrap();
/// assert_eq!(plan[0].quantity, 3.0);
/// ```
pub fn plan_consumption(
    menu_item_id: i64,
    recipe: &[RecipeLine],
    quantity: i64,
    excluded: &[i64],
) -> CoreResult<Vec<IngredientUsage>> {
    let fixed: HashSet<i64> = recipe
        .iter()
        .filter(|line| !line.is_removable)
        .map(|line| line.ingredient_id)
        .collect();

    if let Some(&ingredient_id) = excluded.iter().find(|id| fixed.contains(id)) {
        return Err(CoreError::IngredientNotRemovable {
            menu_item_id,
            ingredient_id,
        });
    }

    Ok(recipe
        .iter()
        .filter(|line| !excluded.contains(&line.ingredient_id))
        .map(|line| IngredientUsage {
            ingredient_id: line.ingredient_id,
            quantity: line.qty_per_unit * quantity as f64,
        })
        .collect())
}
