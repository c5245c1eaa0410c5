//! Payment records and the read-only summary consumed by the transition guard.
//!
//! The guard never inspects raw payment rows. HTTP handlers aggregate an
//! order's payments into a [`PaymentInfo`] once, here, and pass that summary
//! around; this keeps the guard decoupled from persistence concerns.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::status::PaymentStatus;
use crate::error::{CoreError, Result};

/// A single payment attempt attached to an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Payment identifier.
    pub id: String,
    /// Current status of this payment.
    pub status: PaymentStatus,
    /// Amount in minor currency units.
    pub amount: u64,
    /// Currency code (ISO 4217).
    pub currency: String,
    /// When the payment was created.
    pub created_at: DateTime<Utc>,
}

/// Derived, read-only projection over an order's payment records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentInfo {
    /// Sum of all payment amounts, in minor currency units.
    pub total_amount: u64,
    /// Currency code (ISO 4217) shared by all records.
    pub currency: String,
    /// Whether any payment is confirmed (PAID or VERIFIED).
    pub has_confirmed_payment: bool,
    /// Whether any payment is still settling (PENDING or TRANSFER_PAYMENT).
    pub has_pending_payment: bool,
    /// Whether any payment was rejected.
    pub has_rejected_payment: bool,
    /// Status of the most recently created payment, if any.
    pub latest_status: Option<PaymentStatus>,
    /// Number of payment records on the order.
    pub payment_count: u32,
}

impl PaymentInfo {
    /// Summary for an order with no payments, e.g. a zero-cost promotional
    /// order.
    #[must_use]
    pub fn empty<S: Into<String>>(currency: S) -> Self {
        Self {
            total_amount: 0,
            currency: currency.into(),
            has_confirmed_payment: false,
            has_pending_payment: false,
            has_rejected_payment: false,
            latest_status: None,
            payment_count: 0,
        }
    }

    /// Aggregates an order's payment records into a summary.
    ///
    /// `currency` is the order's currency; every record must match it.
    /// `latest_status` is taken from the record with the newest `created_at`
    /// (ties resolve to the later record in the slice, matching insertion
    /// order for equal timestamps).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::CurrencyMismatch`] if any record carries a
    /// different currency than the order.
    #[instrument(skip(records), fields(count = records.len()))]
    pub fn from_records(currency: &str, records: &[PaymentRecord]) -> Result<Self> {
        let mut info = Self::empty(currency);

        let mut latest: Option<&PaymentRecord> = None;
        for record in records {
            if record.currency != currency {
                return Err(CoreError::CurrencyMismatch {
                    expected: currency.to_owned(),
                    found: record.currency.clone(),
                });
            }

            info.total_amount = info.total_amount.saturating_add(record.amount);
            info.has_confirmed_payment |= record.status.is_confirmed();
            info.has_pending_payment |= record.status.is_pending();
            info.has_rejected_payment |= record.status.is_rejected();
            info.payment_count += 1;

            if latest.map_or(true, |l| record.created_at >= l.created_at) {
                latest = Some(record);
            }
        }

        info.latest_status = latest.map(|record| record.status);
        debug!(
            total_amount = info.total_amount,
            confirmed = info.has_confirmed_payment,
            pending = info.has_pending_payment,
            "summarized payment records"
        );
        Ok(info)
    }
}
