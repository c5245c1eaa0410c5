//! Order fulfillment: statuses, payment summaries, and the transition guard.
//!
//! An order's status changes only through the guard's approval: the admin
//! HTTP handler parses the persisted status, summarizes the order's payment
//! records with [`PaymentInfo::from_records`], asks
//! [`is_valid_status_transition`] for a verdict, and persists the new status
//! only on `true`. [`available_status_transitions`] backs the admin UI's
//! action menu.

pub mod payment;
pub mod status;
pub mod transitions;

pub use payment::{PaymentInfo, PaymentRecord};
pub use status::{OrderStatus, PaymentStatus};
pub use transitions::{
    AvailableTransition, TransitionDirection, available_status_transitions,
    is_valid_status_transition,
};
