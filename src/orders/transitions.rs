//! Order status transition guard.
//!
//! The guard is a static table of edges, each gated by a predicate over the
//! order's [`PaymentInfo`] summary. Adding a status or an edge is a data
//! change, not a control-flow change. The gates enforce two product rules:
//! an order cannot advance past a point that requires confirmed money
//! (except the explicit zero-amount carve-out), and it cannot reach the
//! public-facing ACTIVE state while any payment is still settling.

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::payment::PaymentInfo;
use super::status::OrderStatus;

/// Direction of a transition relative to the fulfillment pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionDirection {
    /// Progresses the fulfillment pipeline.
    Forward,
    /// Reverts to an earlier pipeline stage (staff correction).
    Backward,
    /// The LOST side channel, the zero-amount fast path, or the LOST restart.
    Special,
}

/// Payment-state predicate gating an edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Gate {
    /// Edge is always available.
    Always,
    /// Requires a confirmed payment on the order.
    ConfirmedPayment,
    /// Requires a confirmed payment and no payment still settling.
    SettledPayment,
    /// Requires a zero-amount order. Deliberately ignores payment status:
    /// a free order is never blocked by a rejected or pending record.
    ZeroAmount,
}

impl Gate {
    fn allows(self, payment_info: &PaymentInfo) -> bool {
        match self {
            Self::Always => true,
            Self::ConfirmedPayment => payment_info.has_confirmed_payment,
            Self::SettledPayment => {
                payment_info.has_confirmed_payment && !payment_info.has_pending_payment
            }
            Self::ZeroAmount => payment_info.total_amount == 0,
        }
    }
}

/// One edge of the status machine.
#[derive(Debug)]
struct Transition {
    from: OrderStatus,
    to: OrderStatus,
    gate: Gate,
    direction: TransitionDirection,
    description: Option<&'static str>,
}

/// The complete status machine. Every edge not listed here is invalid.
const TRANSITIONS: &[Transition] = &[
    Transition {
        from: OrderStatus::Ordered,
        to: OrderStatus::Paid,
        gate: Gate::ConfirmedPayment,
        direction: TransitionDirection::Forward,
        description: None,
    },
    Transition {
        from: OrderStatus::Ordered,
        to: OrderStatus::Printing,
        gate: Gate::ZeroAmount,
        direction: TransitionDirection::Special,
        description: Some("skip payment for transactions without cost"),
    },
    Transition {
        from: OrderStatus::Ordered,
        to: OrderStatus::Lost,
        gate: Gate::Always,
        direction: TransitionDirection::Special,
        description: Some("item lost in the fulfillment pipeline"),
    },
    Transition {
        from: OrderStatus::Paid,
        to: OrderStatus::Printing,
        gate: Gate::ConfirmedPayment,
        direction: TransitionDirection::Forward,
        description: None,
    },
    Transition {
        from: OrderStatus::Paid,
        to: OrderStatus::Ordered,
        gate: Gate::Always,
        direction: TransitionDirection::Backward,
        description: None,
    },
    Transition {
        from: OrderStatus::Paid,
        to: OrderStatus::Lost,
        gate: Gate::Always,
        direction: TransitionDirection::Special,
        description: Some("item lost in the fulfillment pipeline"),
    },
    Transition {
        from: OrderStatus::Printing,
        to: OrderStatus::Shipped,
        gate: Gate::ConfirmedPayment,
        direction: TransitionDirection::Forward,
        description: None,
    },
    Transition {
        from: OrderStatus::Printing,
        to: OrderStatus::Paid,
        gate: Gate::Always,
        direction: TransitionDirection::Backward,
        description: None,
    },
    Transition {
        from: OrderStatus::Printing,
        to: OrderStatus::Lost,
        gate: Gate::Always,
        direction: TransitionDirection::Special,
        description: Some("item lost in the fulfillment pipeline"),
    },
    Transition {
        from: OrderStatus::Shipped,
        to: OrderStatus::Active,
        gate: Gate::SettledPayment,
        direction: TransitionDirection::Forward,
        description: None,
    },
    Transition {
        from: OrderStatus::Shipped,
        to: OrderStatus::Printing,
        gate: Gate::Always,
        direction: TransitionDirection::Backward,
        description: None,
    },
    Transition {
        from: OrderStatus::Shipped,
        to: OrderStatus::Lost,
        gate: Gate::Always,
        direction: TransitionDirection::Special,
        description: Some("item lost in the shipping pipeline"),
    },
    Transition {
        from: OrderStatus::Active,
        to: OrderStatus::Lost,
        gate: Gate::Always,
        direction: TransitionDirection::Special,
        description: Some("item lost after activation"),
    },
    Transition {
        from: OrderStatus::Active,
        to: OrderStatus::Shipped,
        gate: Gate::Always,
        direction: TransitionDirection::Backward,
        description: Some("troubleshooting escape"),
    },
    Transition {
        from: OrderStatus::Lost,
        to: OrderStatus::Ordered,
        gate: Gate::Always,
        direction: TransitionDirection::Special,
        description: Some("restart the order"),
    },
];

/// A transition currently available from some status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailableTransition {
    /// Target status.
    pub status: OrderStatus,
    /// Pipeline direction of the edge.
    pub direction: TransitionDirection,
    /// Human-readable reason, where the edge warrants one.
    pub description: Option<String>,
}

/// Returns whether moving `current` to `candidate` is permitted given the
/// order's payment summary.
///
/// Any (from, to) pair not in the transition table is invalid; listed edges
/// are additionally gated on the payment summary. This is a pure predicate:
/// the caller persists the new status only on `true` and surfaces an HTTP 400
/// otherwise.
#[must_use]
#[instrument(skip(payment_info), fields(total_amount = payment_info.total_amount))]
pub fn is_valid_status_transition(
    current: OrderStatus,
    candidate: OrderStatus,
    payment_info: &PaymentInfo,
) -> bool {
    let allowed = TRANSITIONS
        .iter()
        .any(|t| t.from == current && t.to == candidate && t.gate.allows(payment_info));
    if !allowed {
        debug!(%current, %candidate, "status transition rejected");
    }
    allowed
}

/// Enumerates the transitions currently available from `current`.
///
/// Returns exactly the table edges originating at `current` whose gate
/// evaluates true for the given payment summary, in table order, tagged with
/// their pipeline direction.
#[must_use]
pub fn available_status_transitions(
    current: OrderStatus,
    payment_info: &PaymentInfo,
) -> Vec<AvailableTransition> {
    TRANSITIONS
        .iter()
        .filter(|t| t.from == current && t.gate.allows(payment_info))
        .map(|t| AvailableTransition {
            status: t.to,
            direction: t.direction,
            description: t.description.map(str::to_owned),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orders::status::PaymentStatus;

    fn unpaid(total_amount: u64) -> PaymentInfo {
        PaymentInfo { total_amount, ..PaymentInfo::empty("CLP") }
    }

    fn confirmed(total_amount: u64) -> PaymentInfo {
        PaymentInfo {
            total_amount,
            has_confirmed_payment: true,
            latest_status: Some(PaymentStatus::Paid),
            payment_count: 1,
            ..PaymentInfo::empty("CLP")
        }
    }

    fn confirmed_with_pending(total_amount: u64) -> PaymentInfo {
        PaymentInfo {
            has_pending_payment: true,
            payment_count: 2,
            ..confirmed(total_amount)
        }
    }

    // ========================================================================
    // Forward Edges
    // ========================================================================

    #[test]
    fn test_ordered_to_paid_requires_confirmed_payment() {
        assert!(!is_valid_status_transition(
            OrderStatus::Ordered,
            OrderStatus::Paid,
            &unpaid(6990)
        ));
        assert!(is_valid_status_transition(
            OrderStatus::Ordered,
            OrderStatus::Paid,
            &confirmed(6990)
        ));
    }

    #[test]
    fn test_paid_to_printing_requires_confirmed_payment() {
        assert!(is_valid_status_transition(
            OrderStatus::Paid,
            OrderStatus::Printing,
            &confirmed(6990)
        ));
        assert!(!is_valid_status_transition(
            OrderStatus::Paid,
            OrderStatus::Printing,
            &unpaid(6990)
        ));
    }

    #[test]
    fn test_printing_to_shipped_requires_confirmed_payment() {
        assert!(is_valid_status_transition(
            OrderStatus::Printing,
            OrderStatus::Shipped,
            &confirmed(6990)
        ));
        assert!(!is_valid_status_transition(
            OrderStatus::Printing,
            OrderStatus::Shipped,
            &unpaid(6990)
        ));
    }

    #[test]
    fn test_shipped_to_active_requires_settled_payment() {
        assert!(is_valid_status_transition(
            OrderStatus::Shipped,
            OrderStatus::Active,
            &confirmed(6990)
        ));
        // A pending payment keeps the emergency profile unexposed.
        assert!(!is_valid_status_transition(
            OrderStatus::Shipped,
            OrderStatus::Active,
            &confirmed_with_pending(6990)
        ));
        assert!(!is_valid_status_transition(
            OrderStatus::Shipped,
            OrderStatus::Active,
            &unpaid(6990)
        ));
    }

    // ========================================================================
    // Zero-Amount Carve-Out
    // ========================================================================

    #[test]
    fn test_zero_amount_order_skips_to_printing() {
        assert!(is_valid_status_transition(
            OrderStatus::Ordered,
            OrderStatus::Printing,
            &unpaid(0)
        ));
        assert!(!is_valid_status_transition(
            OrderStatus::Ordered,
            OrderStatus::Printing,
            &unpaid(6990)
        ));
    }

    #[test]
    fn test_zero_amount_carve_out_ignores_payment_status() {
        // A free order is not blocked even if its lone record is rejected
        // or still pending.
        let rejected = PaymentInfo {
            has_rejected_payment: true,
            latest_status: Some(PaymentStatus::Rejected),
            payment_count: 1,
            ..PaymentInfo::empty("CLP")
        };
        assert!(is_valid_status_transition(
            OrderStatus::Ordered,
            OrderStatus::Printing,
            &rejected
        ));

        let pending = PaymentInfo {
            has_pending_payment: true,
            latest_status: Some(PaymentStatus::Pending),
            payment_count: 1,
            ..PaymentInfo::empty("CLP")
        };
        assert!(is_valid_status_transition(
            OrderStatus::Ordered,
            OrderStatus::Printing,
            &pending
        ));
    }

    #[test]
    fn test_zero_amount_edge_carries_description() {
        let transitions = available_status_transitions(OrderStatus::Ordered, &unpaid(0));
        let skip = transitions
            .iter()
            .find(|t| t.status == OrderStatus::Printing)
            .expect("zero-amount fast path should be available");

        assert_eq!(skip.direction, TransitionDirection::Special);
        assert!(skip.description.as_deref().unwrap().contains("without cost"));
    }

    // ========================================================================
    // Backward and Special Edges
    // ========================================================================

    #[test]
    fn test_backward_edges_are_always_available() {
        let info = unpaid(6990);
        assert!(is_valid_status_transition(OrderStatus::Paid, OrderStatus::Ordered, &info));
        assert!(is_valid_status_transition(OrderStatus::Printing, OrderStatus::Paid, &info));
        assert!(is_valid_status_transition(OrderStatus::Shipped, OrderStatus::Printing, &info));
        assert!(is_valid_status_transition(OrderStatus::Active, OrderStatus::Shipped, &info));
    }

    #[test]
    fn test_every_pipeline_status_can_reach_lost() {
        let info = unpaid(6990);
        for status in [
            OrderStatus::Ordered,
            OrderStatus::Paid,
            OrderStatus::Printing,
            OrderStatus::Shipped,
            OrderStatus::Active,
        ] {
            assert!(
                is_valid_status_transition(status, OrderStatus::Lost, &info),
                "{status} should reach LOST"
            );
        }
    }

    #[test]
    fn test_lost_only_escapes_back_to_ordered() {
        let info = confirmed(6990);
        let transitions = available_status_transitions(OrderStatus::Lost, &info);

        assert_eq!(transitions.len(), 1);
        assert_eq!(transitions[0].status, OrderStatus::Ordered);
        assert_eq!(transitions[0].direction, TransitionDirection::Special);
    }

    // ========================================================================
    // Invalid Edges
    // ========================================================================

    #[test]
    fn test_skipping_pipeline_stages_is_invalid() {
        let info = confirmed(6990);
        assert!(!is_valid_status_transition(OrderStatus::Ordered, OrderStatus::Shipped, &info));
        assert!(!is_valid_status_transition(OrderStatus::Ordered, OrderStatus::Active, &info));
        assert!(!is_valid_status_transition(OrderStatus::Paid, OrderStatus::Active, &info));
        assert!(!is_valid_status_transition(OrderStatus::Lost, OrderStatus::Active, &info));
    }

    #[test]
    fn test_self_transitions_are_invalid() {
        let info = confirmed(6990);
        for status in OrderStatus::ALL {
            assert!(
                !is_valid_status_transition(status, status, &info),
                "{status} -> {status} should be invalid"
            );
        }
    }

    // ========================================================================
    // Enumeration Agreement
    // ========================================================================

    #[test]
    fn test_enumeration_agrees_with_predicate() {
        let summaries = [unpaid(0), unpaid(6990), confirmed(6990), confirmed_with_pending(6990)];

        for info in &summaries {
            for from in OrderStatus::ALL {
                let listed = available_status_transitions(from, info);
                for to in OrderStatus::ALL {
                    let valid = is_valid_status_transition(from, to, info);
                    let enumerated = listed.iter().any(|t| t.status == to);
                    assert_eq!(
                        valid, enumerated,
                        "{from} -> {to} predicate/enumeration disagreement"
                    );
                }
            }
        }
    }

    #[test]
    fn test_ordered_enumeration_with_confirmed_payment() {
        let transitions = available_status_transitions(OrderStatus::Ordered, &confirmed(6990));
        let targets: Vec<OrderStatus> = transitions.iter().map(|t| t.status).collect();

        assert_eq!(targets, vec![OrderStatus::Paid, OrderStatus::Lost]);
    }

    #[test]
    fn test_direction_tags() {
        let transitions = available_status_transitions(OrderStatus::Shipped, &confirmed(6990));

        let by_status = |s: OrderStatus| {
            transitions.iter().find(|t| t.status == s).map(|t| t.direction).unwrap()
        };
        assert_eq!(by_status(OrderStatus::Active), TransitionDirection::Forward);
        assert_eq!(by_status(OrderStatus::Printing), TransitionDirection::Backward);
        assert_eq!(by_status(OrderStatus::Lost), TransitionDirection::Special);
    }

    #[test]
    fn test_available_transition_serialization() {
        let transitions = available_status_transitions(OrderStatus::Lost, &unpaid(6990));
        let json = serde_json::to_string(&transitions).unwrap();

        assert!(json.contains("\"status\":\"ORDERED\""));
        assert!(json.contains("\"direction\":\"special\""));
    }
}
