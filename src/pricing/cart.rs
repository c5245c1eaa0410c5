//! Cart line items and validity filtering.
//!
//! A cart here is an in-memory pricing input, not a persisted entity. Invalid
//! entries are silently excluded before any total is computed: the discount
//! engine is a live pricing preview and favors availability over strictness.

use serde::{Deserialize, Serialize};

/// A purchasable line item in a cart.
///
/// Amounts are minor currency units (whole pesos for CLP). The `id` is unique
/// within one cart only; carts are rebuilt per computation and never persisted
/// by this crate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Identifier unique within the cart.
    pub id: String,
    /// Display name of the item.
    pub name: String,
    /// Price per unit in minor currency units.
    pub unit_price: u64,
    /// Number of units.
    pub quantity: u32,
}

impl CartItem {
    /// Creates a cart line item.
    #[must_use]
    pub fn new<S: Into<String>>(id: S, name: S, unit_price: u64, quantity: u32) -> Self {
        Self { id: id.into(), name: name.into(), unit_price, quantity }
    }

    /// Returns whether this entry may participate in pricing.
    ///
    /// An entry with an empty id or name, a zero unit price, or a zero
    /// quantity is invalid and contributes nothing to any total.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !self.id.trim().is_empty()
            && !self.name.trim().is_empty()
            && self.unit_price > 0
            && self.quantity > 0
    }

    /// Returns `unit_price * quantity` for this line.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.unit_price.saturating_mul(u64::from(self.quantity))
    }
}

/// Drops invalid entries from a cart.
///
/// This is the only normalization the pricing engine performs. Exclusion is
/// silent: a dropped entry is not an error (see crate docs on the pricing
/// preview contract).
#[must_use]
pub fn sanitize_cart(cart: &[CartItem]) -> Vec<CartItem> {
    cart.iter().filter(|item| item.is_valid()).cloned().collect()
}

/// Sums the line totals of the given items.
#[must_use]
pub fn cart_subtotal(items: &[CartItem]) -> u64 {
    items.iter().map(CartItem::line_total).fold(0, u64::saturating_add)
}

/// Sums the quantities of the given items.
///
/// Discount tiers are keyed on this aggregate count across dissimilar items,
/// not on any single line's quantity.
#[must_use]
pub fn total_quantity(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.quantity)).fold(0, u64::saturating_add)
}
