//! Error types for the SafeTap core rule engines.
//!
//! The rule engines themselves are total functions: a malformed cart entry is
//! filtered, an illegal status transition is reported as `false`. Errors exist
//! only at the crate's edges, where persisted strings and operator-entered
//! promotion rules cross into the typed world.

use thiserror::Error;

/// Result type alias for SafeTap core operations.
///
/// All fallible functions in this crate return this type.
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur at the boundaries of the SafeTap core.
///
/// All variants carry the offending input so callers can surface an
/// actionable message (the HTTP layer maps these to 400 responses).
#[must_use = "errors should be handled, propagated, or explicitly panicked"]
#[derive(Debug, Error)]
pub enum CoreError {
    /// A persisted order status string did not match any known status.
    ///
    /// The transition guard assumes its inputs are already-validated enums;
    /// parsing via [`OrderStatus`](crate::orders::OrderStatus) enforces that
    /// assumption at the persistence boundary.
    #[error("unknown order status: {0}")]
    UnknownOrderStatus(String),

    /// A persisted payment status string did not match any known status.
    #[error("unknown payment status: {0}")]
    UnknownPaymentStatus(String),

    /// An operator-supplied promotion rule failed validation.
    ///
    /// Returned by [`PromotionRule::validate`](crate::pricing::PromotionRule)
    /// before a rule is persisted. The discount engine itself never rejects a
    /// rule; it degrades by exclusion instead.
    #[error("invalid promotion rule: {0}")]
    InvalidPromotionRule(String),

    /// Payment records attached to one order carried different currencies.
    ///
    /// A [`PaymentInfo`](crate::orders::PaymentInfo) summary aggregates
    /// amounts, which is only meaningful in a single currency.
    #[error("currency mismatch in payment records: expected {expected}, found {found}")]
    CurrencyMismatch {
        /// Currency of the order.
        expected: String,
        /// Currency found on the offending payment record.
        found: String,
    },
}
