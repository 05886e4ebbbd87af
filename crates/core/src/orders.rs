//! Order-cancellation policy and the status display machine.
//!
//! These are *display* rules: the client decides which controls to offer,
//! then requests the transition and lets the server accept or reject it.
//! Nothing here pre-validates a transition.

use crate::types::{OrderStatus, Role};

/// Whether `role` may request cancellation of an order in `status`.
///
/// Buyers may only cancel pending orders. Admins may cancel anything not
/// already delivered or cancelled; the asymmetry is the admin override.
#[must_use]
pub const fn can_cancel(role: Role, status: OrderStatus) -> bool {
    match role {
        Role::Buyer => matches!(status, OrderStatus::Pending),
        Role::Admin => !matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled),
    }
}

/// Whether the admin console offers the status-change control at all.
#[must_use]
pub const fn can_update_status(status: OrderStatus) -> bool {
    !matches!(status, OrderStatus::Cancelled)
}

impl OrderStatus {
    /// The transitions the server is expected to accept from this status.
    #[must_use]
    pub const fn next_statuses(self) -> &'static [Self] {
        match self {
            Self::Pending => &[Self::Processing, Self::Cancelled],
            Self::Processing => &[Self::Shipped, Self::Cancelled],
            Self::Shipped => &[Self::Delivered],
            Self::Delivered | Self::Cancelled => &[],
        }
    }

    /// Terminal statuses have no outgoing transitions.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.next_statuses().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Processing,
        OrderStatus::Shipped,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    #[test]
    fn test_buyer_cancels_only_pending() {
        for status in ALL {
            assert_eq!(
                can_cancel(Role::Buyer, status),
                status == OrderStatus::Pending,
                "buyer cancellation mismatch for {status}"
            );
        }
    }

    #[test]
    fn test_admin_cancels_anything_not_finished() {
        for status in ALL {
            let expected =
                !matches!(status, OrderStatus::Delivered | OrderStatus::Cancelled);
            assert_eq!(
                can_cancel(Role::Admin, status),
                expected,
                "admin cancellation mismatch for {status}"
            );
        }
    }

    #[test]
    fn test_status_controls_hidden_for_cancelled() {
        assert!(can_update_status(OrderStatus::Pending));
        assert!(can_update_status(OrderStatus::Delivered));
        assert!(!can_update_status(OrderStatus::Cancelled));
    }

    #[test]
    fn test_transition_table() {
        assert_eq!(
            OrderStatus::Pending.next_statuses(),
            &[OrderStatus::Processing, OrderStatus::Cancelled]
        );
        assert_eq!(
            OrderStatus::Processing.next_statuses(),
            &[OrderStatus::Shipped, OrderStatus::Cancelled]
        );
        assert_eq!(OrderStatus::Shipped.next_statuses(), &[OrderStatus::Delivered]);
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(OrderStatus::Cancelled.is_terminal());
    }
}
