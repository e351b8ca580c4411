//! # Status Transitions
//!
//! The order workflow state machine.
//!
//! ```text
//!   PENDING ──► CONFIRMED ──► PREPARING ──► OUT_FOR_DELIVERY ──► DELIVERED
//!      │            │
//!      └────────────┴──────► CANCELLED
//! ```
//!
//! Only direct, forward edges are legal. `DELIVERED` and `CANCELLED` are
//! terminal. The store itself accepts any of the six values; this module is
//! the only place the sequence is enforced.

use crate::error::OrderError;
use crate::types::OrderStatus;

impl OrderStatus {
    /// Statuses reachable in one step from `self`.
    pub const fn successors(&self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::Confirmed, OrderStatus::Cancelled],
            OrderStatus::Confirmed => &[OrderStatus::Preparing, OrderStatus::Cancelled],
            OrderStatus::Preparing => &[OrderStatus::OutForDelivery],
            OrderStatus::OutForDelivery => &[OrderStatus::Delivered],
            OrderStatus::Delivered | OrderStatus::Cancelled => &[],
        }
    }

    /// No transitions leave a terminal status.
    pub const fn is_terminal(&self) -> bool {
        self.successors().is_empty()
    }

    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        self.successors().contains(&next)
    }
}

/// Guards a requested status change on an order.
///
/// ## Example
/// ```rust
/// use foodhub_core::{check_transition, OrderError, OrderStatus};
///
/// assert!(check_transition(1, OrderStatus::Pending, OrderStatus::Confirmed).is_ok());
/// assert!(matches!(
///     check_transition(1, OrderStatus::Pending, OrderStatus::Delivered),
///     Err(OrderError::InvalidTransition { .. })
/// ));
/// ```
pub fn check_transition(
    order_id: i64,
    current: OrderStatus,
    requested: OrderStatus,
) -> Result<(), OrderError> {
    if current.can_transition_to(requested) {
        Ok(())
    } else {
        Err(OrderError::InvalidTransition {
            order_id,
            from: current,
            to: requested,
        })
    }
}
