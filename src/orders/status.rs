//! Order and payment status enums.
//!
//! Both enums serialize in the spelling persisted by the store database
//! (`ORDERED`, `TRANSFER_PAYMENT`, ...). The `FromStr` impls are the one
//! place that spelling is parsed; the HTTP layer uses them to reject
//! unrecognized status strings before the transition guard runs.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Fulfillment-pipeline stage of a physical sticker order.
///
/// Orders are created as [`Ordered`](Self::Ordered) and advance through the
/// pipeline only via the transition guard. [`Active`](Self::Active) is the
/// normal terminal success state; [`Lost`](Self::Lost) is the side channel
/// for items lost in fulfillment or shipping, with an escape back to
/// [`Ordered`](Self::Ordered).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    /// Order placed, awaiting payment.
    Ordered,
    /// Payment confirmed.
    Paid,
    /// Sticker being printed.
    Printing,
    /// Sticker shipped to the customer.
    Shipped,
    /// Sticker delivered and emergency profile live.
    Active,
    /// Item lost in the fulfillment or shipping pipeline.
    Lost,
}

impl OrderStatus {
    /// All order statuses, in pipeline order.
    pub const ALL: [Self; 6] =
        [Self::Ordered, Self::Paid, Self::Printing, Self::Shipped, Self::Active, Self::Lost];

    /// Returns the persisted spelling of this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ordered => "ORDERED",
            Self::Paid => "PAID",
            Self::Printing => "PRINTING",
            Self::Shipped => "SHIPPED",
            Self::Active => "ACTIVE",
            Self::Lost => "LOST",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ORDERED" => Ok(Self::Ordered),
            "PAID" => Ok(Self::Paid),
            "PRINTING" => Ok(Self::Printing),
            "SHIPPED" => Ok(Self::Shipped),
            "ACTIVE" => Ok(Self::Active),
            "LOST" => Ok(Self::Lost),
            other => Err(CoreError::UnknownOrderStatus(other.to_owned())),
        }
    }
}

/// Status of a single payment record attached to an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    /// Payment initiated, not yet settled.
    Pending,
    /// Payment settled by the payment provider.
    Paid,
    /// Payment manually verified by staff.
    Verified,
    /// Payment rejected by the provider or by staff.
    Rejected,
    /// Payment cancelled before settlement.
    Cancelled,
    /// Funds transferred out (refund/chargeback bookkeeping).
    Transferred,
    /// Bank-transfer receipt uploaded, awaiting verification.
    TransferPayment,
}

impl PaymentStatus {
    /// Whether this payment counts as confirmed money.
    #[must_use]
    pub fn is_confirmed(self) -> bool {
        matches!(self, Self::Paid | Self::Verified)
    }

    /// Whether this payment is still settling.
    #[must_use]
    pub fn is_pending(self) -> bool {
        matches!(self, Self::Pending | Self::TransferPayment)
    }

    /// Whether this payment was rejected.
    #[must_use]
    pub fn is_rejected(self) -> bool {
        matches!(self, Self::Rejected)
    }

    /// Returns the persisted spelling of this status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Paid => "PAID",
            Self::Verified => "VERIFIED",
            Self::Rejected => "REJECTED",
            Self::Cancelled => "CANCELLED",
            Self::Transferred => "TRANSFERRED",
            Self::TransferPayment => "TRANSFER_PAYMENT",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "PAID" => Ok(Self::Paid),
            "VERIFIED" => Ok(Self::Verified),
            "REJECTED" => Ok(Self::Rejected),
            "CANCELLED" => Ok(Self::Cancelled),
            "TRANSFERRED" => Ok(Self::Transferred),
            "TRANSFER_PAYMENT" => Ok(Self::TransferPayment),
            other => Err(CoreError::UnknownPaymentStatus(other.to_owned())),
        }
    }
}
