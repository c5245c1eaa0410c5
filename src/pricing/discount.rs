//! Quantity-based discount calculation.
//!
//! [`calculate_discount`] is the single pricing entry point: it filters the
//! cart, selects the best-matching promotion rule, and produces the discounted
//! totals. It is pure and idempotent, so the checkout can recompute on every
//! quantity change without side effects.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::cart::{CartItem, cart_subtotal, sanitize_cart, total_quantity};
use super::rules::{DiscountKind, PromotionRule};

/// A promotion that was applied to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppliedPromotion {
    /// Rule identifier, persisted as a foreign key on the order.
    pub id: String,
    /// Rule description at the time of application.
    pub description: String,
    /// Discount granted, in minor currency units.
    pub discount_amount: u64,
    /// Discount interpretation of `value`.
    pub kind: DiscountKind,
    /// Rule value at the time of application.
    pub value: Decimal,
    /// Aggregate cart quantity that triggered the rule.
    pub applied_to_quantity: u64,
}

/// Result of a discount calculation over a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountSummary {
    /// Total discount granted, in minor currency units.
    pub total_discount: u64,
    /// Subtotal of the valid cart before discounts.
    pub original_total: u64,
    /// `original_total - total_discount`, floored at zero.
    pub final_total: u64,
    /// The applied promotion, if any. Discounts never stack, so this holds at
    /// most one entry.
    pub applied_promotions: Vec<AppliedPromotion>,
    /// The cart after invalid entries were dropped.
    pub updated_cart: Vec<CartItem>,
}

/// Result of a single-quantity discount preview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityPreview {
    /// Undiscounted total for the previewed quantity.
    pub original_total: u64,
    /// Discount the best-matching rule would grant.
    pub discount_amount: u64,
    /// Total after discount.
    pub final_total: u64,
    /// The rule that would apply, if any.
    pub applied_rule: Option<PromotionRule>,
}

/// Computes the best quantity discount for a cart.
///
/// Invalid cart entries (blank id or name, zero price or quantity) are
/// silently dropped before computation; they never affect totals and never
/// produce an error. Eligibility is keyed on the aggregate quantity across
/// the valid cart: a rule applies when it is active and the cart holds at
/// least `min_quantity` units. Among eligible rules the highest threshold
/// wins, then the highest value; at most one rule is ever applied.
///
/// Percentage discounts round to the nearest minor currency unit (half away
/// from zero). Fixed discounts are clamped to the subtotal. The final total
/// is never negative, regardless of how pathological the supplied rules are.
///
/// Rules are always injected by the caller; pass
/// [`default_promotion_rules()`](super::rules::default_promotion_rules) to
/// use the built-in tier table.
#[must_use]
#[instrument(skip_all, fields(items = cart.len(), rules = rules.len()))]
pub fn calculate_discount(cart: &[CartItem], rules: &[PromotionRule]) -> DiscountSummary {
    let valid_cart = sanitize_cart(cart);
    let original_total = cart_subtotal(&valid_cart);
    let quantity = total_quantity(&valid_cart);

    let best_rule = rules
        .iter()
        .filter(|rule| rule.active && quantity >= u64::from(rule.min_quantity))
        .max_by(|a, b| (a.min_quantity, a.value).cmp(&(b.min_quantity, b.value)));

    let Some(rule) = best_rule else {
        debug!(original_total, quantity, "no promotion rule eligible");
        return DiscountSummary {
            total_discount: 0,
            original_total,
            final_total: original_total,
            applied_promotions: Vec::new(),
            updated_cart: valid_cart,
        };
    };

    let total_discount = discount_amount(rule, original_total);
    let final_total = original_total.saturating_sub(total_discount);

    debug!(rule_id = %rule.id, original_total, total_discount, "applied promotion rule");

    DiscountSummary {
        total_discount,
        original_total,
        final_total,
        applied_promotions: vec![AppliedPromotion {
            id: rule.id.clone(),
            description: rule.description.clone(),
            discount_amount: total_discount,
            kind: rule.kind,
            value: rule.value,
            applied_to_quantity: quantity,
        }],
        updated_cart: valid_cart,
    }
}

/// Previews the discount for buying `quantity` units at `unit_price`.
///
/// Builds a synthetic single-item cart and delegates to
/// [`calculate_discount`]; backs the "what would I pay at N units" hint in
/// the checkout.
#[must_use]
pub fn preview_discount_for_quantity(
    unit_price: u64,
    quantity: u32,
    rules: &[PromotionRule],
) -> QuantityPreview {
    let cart = [CartItem::new("preview", "preview", unit_price, quantity)];
    let summary = calculate_discount(&cart, rules);

    let applied_rule = summary
        .applied_promotions
        .first()
        .and_then(|applied| rules.iter().find(|rule| rule.id == applied.id).cloned());

    QuantityPreview {
        original_total: summary.original_total,
        discount_amount: summary.total_discount,
        final_total: summary.final_total,
        applied_rule,
    }
}

/// Formats a promotion rule for display.
///
/// Percentage rules render as `N% off`; fixed rules as `N CODE off` with the
/// store currency code. Pure formatting, no locale awareness beyond the
/// currency code.
#[must_use]
pub fn format_discount_display(rule: &PromotionRule, currency: &str) -> String {
    match rule.kind {
        DiscountKind::Percentage => format!("{}% off", rule.value.normalize()),
        DiscountKind::Fixed => format!("{} {currency} off", rule.value.normalize()),
    }
}

/// Computes the discount a rule grants on a subtotal, clamped to
/// `[0, subtotal]`.
fn discount_amount(rule: &PromotionRule, subtotal: u64) -> u64 {
    if rule.value.is_sign_negative() {
        return 0;
    }

    let raw = match rule.kind {
        DiscountKind::Percentage => Decimal::from(subtotal)
            .checked_mul(rule.value)
            .and_then(|gross| gross.checked_div(Decimal::from(100))),
        DiscountKind::Fixed => Some(rule.value),
    };

    // A value large enough to overflow Decimal dwarfs any subtotal.
    raw.map_or(u64::MAX, |amount| {
        amount
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u64()
            .unwrap_or(u64::MAX)
    })
    .min(subtotal)
}
