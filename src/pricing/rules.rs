//! Quantity-threshold promotion rules.
//!
//! A rule grants a percentage or fixed discount once the aggregate unit count
//! of a cart reaches its threshold. Rules are normally loaded from the store's
//! backoffice; [`default_promotion_rules`] is the static fallback the checkout
//! uses when none are configured.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, Result};

/// How a promotion rule discounts the cart subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountKind {
    /// `value` is percentage points off the subtotal (nominally 0-100).
    Percentage,
    /// `value` is a fixed amount off, in minor currency units.
    Fixed,
}

/// A quantity-threshold discount definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromotionRule {
    /// Unique rule identifier, persisted as a foreign key on orders that
    /// applied it.
    pub id: String,
    /// Minimum aggregate cart quantity for the rule to apply.
    pub min_quantity: u32,
    /// Discount interpretation of `value`.
    pub kind: DiscountKind,
    /// Percentage points or minor-currency amount, per `kind`.
    pub value: Decimal,
    /// Human-readable description shown in the checkout.
    pub description: String,
    /// Inactive rules are never eligible.
    pub active: bool,
}

impl PromotionRule {
    /// Validates an operator-entered rule before it is persisted.
    ///
    /// The discount engine itself never rejects a rule at computation time;
    /// this check belongs to the backoffice edit path.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidPromotionRule`] if the id or description is
    /// blank, the threshold is zero, the value is negative, or a percentage
    /// value exceeds 100.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CoreError::InvalidPromotionRule("id cannot be empty".into()));
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::InvalidPromotionRule("description cannot be empty".into()));
        }
        if self.min_quantity == 0 {
            return Err(CoreError::InvalidPromotionRule("min_quantity cannot be zero".into()));
        }
        if self.value.is_sign_negative() {
            return Err(CoreError::InvalidPromotionRule("value cannot be negative".into()));
        }
        if self.kind == DiscountKind::Percentage && self.value > Decimal::from(100) {
            return Err(CoreError::InvalidPromotionRule(
                "percentage value cannot exceed 100".into(),
            ));
        }
        Ok(())
    }
}

/// Returns the built-in three-tier promotion table.
///
/// Used when the store has no configured rules: 2+ units 10 % off, 5+ units
/// 15 % off, 10+ units 20 % off.
#[must_use]
pub fn default_promotion_rules() -> Vec<PromotionRule> {
    vec![
        PromotionRule {
            id: "tier-2plus".to_owned(),
            min_quantity: 2,
            kind: DiscountKind::Percentage,
            value: Decimal::from(10),
            description: "10% off for 2 or more stickers".to_owned(),
            active: true,
        },
        PromotionRule {
            id: "tier-5plus".to_owned(),
            min_quantity: 5,
            kind: DiscountKind::Percentage,
            value: Decimal::from(15),
            description: "15% off for 5 or more stickers".to_owned(),
            active: true,
        },
        PromotionRule {
            id: "tier-10plus".to_owned(),
            min_quantity: 10,
            kind: DiscountKind::Percentage,
            value: Decimal::from(20),
            description: "20% off for 10 or more stickers".to_owned(),
            active: true,
        },
    ]
}

/// Returns the active rules sorted ascending by threshold.
///
/// This is the display order for "next tier" incentives in the checkout.
#[must_use]
pub fn promotion_tiers(rules: &[PromotionRule]) -> Vec<PromotionRule> {
    let mut tiers: Vec<PromotionRule> = rules.iter().filter(|r| r.active).cloned().collect();
    tiers.sort_by_key(|r| r.min_quantity);
    tiers
}

/// Returns the lowest active tier the cart has not yet reached.
///
/// Backs the "add N more for X% off" hint; `None` when the cart already
/// qualifies for the highest tier or no rules are active.
#[must_use]
pub fn next_tier(total_quantity: u64, rules: &[PromotionRule]) -> Option<PromotionRule> {
    promotion_tiers(rules)
        .into_iter()
        .find(|rule| u64::from(rule.min_quantity) > total_quantity)
}
