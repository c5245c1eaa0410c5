//! SafeTap Core: Pricing and Fulfillment Rule Engines
//!
//! The business rules of the SafeTap emergency-sticker store, extracted into
//! a pure, I/O-free library: the quantity-discount engine the checkout prices
//! carts with, and the order status transition guard the admin backoffice
//! consults before moving an order through the fulfillment pipeline.
//!
//! # What lives here, and what doesn't
//!
//! Both engines are leaves. They read only their arguments, allocate only
//! their outputs, and are safe to call from any number of concurrent
//! requests. Everything stateful (routing, sessions, the database, email,
//! the admin screens) sits above this crate and is out of scope:
//!
//! ```text
//! ┌──────────────────────────────┐
//! │  HTTP handlers (external)    │  fetch cart/order/payment rows,
//! │  checkout + admin backoffice │  persist results, map bool -> 400
//! └───────┬──────────────┬───────┘
//!         │              │
//! ┌───────▼──────┐  ┌────▼─────────────────┐
//! │   pricing    │  │   orders             │
//! │  discount    │  │  payment summary +   │
//! │  engine      │  │  transition guard    │
//! └──────────────┘  └──────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Price a cart
//!
//! ```rust
//! use safetap_core::pricing::{CartItem, calculate_discount, default_promotion_rules};
//!
//! let cart = vec![CartItem::new("sticker-classic", "SafeTap sticker", 6990, 2)];
//! let summary = calculate_discount(&cart, &default_promotion_rules());
//!
//! assert_eq!(summary.original_total, 13980);
//! assert_eq!(summary.total_discount, 1398); // 10% tier at 2+ units
//! assert_eq!(summary.final_total, 12582);
//! assert_eq!(summary.applied_promotions[0].id, "tier-2plus");
//! ```
//!
//! ## Guard a status change
//!
//! ```rust
//! use safetap_core::orders::{
//!     OrderStatus, PaymentInfo, PaymentRecord, PaymentStatus, is_valid_status_transition,
//! };
//!
//! # fn example() -> safetap_core::Result<()> {
//! let records = vec![PaymentRecord {
//!     id: "pay-1".to_owned(),
//!     status: PaymentStatus::Paid,
//!     amount: 6990,
//!     currency: "CLP".to_owned(),
//!     created_at: chrono::Utc::now(),
//! }];
//! let info = PaymentInfo::from_records("CLP", &records)?;
//!
//! assert!(is_valid_status_transition(OrderStatus::Ordered, OrderStatus::Paid, &info));
//! assert!(!is_valid_status_transition(OrderStatus::Ordered, OrderStatus::Shipped, &info));
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Module Organization
//!
//! - [`pricing`]: carts, promotion rules, discount calculation
//! - [`orders`]: order/payment statuses, payment summaries, transition guard
//! - [`error`]: boundary errors (status parsing, rule validation)
//!
//! # Design Notes
//!
//! - Promotion rules are injected at every call site; the built-in tier table
//!   is an exported default the caller opts into, never hidden module state.
//! - Invalid cart entries are silently excluded, not rejected. The checkout
//!   recomputes prices live as quantities change, and a half-edited line must
//!   not break the preview.
//! - The transition machine is a data table of gated edges. The guard returns
//!   a plain `bool`; the HTTP layer owns the "Invalid state" 400 response.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod error;
pub mod orders;
pub mod pricing;

pub use error::{CoreError, Result};
