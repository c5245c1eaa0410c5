//! Pricing engine: carts, promotion rules, and discount calculation.
//!
//! The engine is a pure, synchronous pricing preview. HTTP handlers build a
//! cart from checkout request data, load the store's promotion rules (or fall
//! back to [`default_promotion_rules`]), and call [`calculate_discount`];
//! nothing in this module performs I/O or holds state.

pub mod cart;
pub mod discount;
pub mod rules;

pub use cart::{CartItem, cart_subtotal, sanitize_cart, total_quantity};
pub use discount::{
    AppliedPromotion, DiscountSummary, QuantityPreview, calculate_discount,
    format_discount_display, preview_discount_for_quantity,
};
pub use rules::{
    DiscountKind, PromotionRule, default_promotion_rules, next_tier, promotion_tiers,
};
