//! # Order Status Policy
//!
//! Which status changes an operator may apply to an order.
//!
//! ## Lifecycle
//! ```text
//!                 ┌────────────┐
//!                 │  Pending   │
//!                 └─────┬──────┘
//!            ┌──────────┴──────────┐
//!            ▼                     ▼
//!     ┌────────────┐         ┌────────────┐
//!     │ InProgress │────────►│ Cancelled  │ (terminal)
//!     └─────┬──────┘         └────────────┘
//!           ▼
//!     ┌────────────┐
//!     │ Completed  │ (terminal)
//!     └────────────┘
//! ```
//!
//! The table is advisory: it decides what the admin console offers. The
//! backend is the authoritative gate and may still reject a change.

use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::{Order, OrderStatus};

/// Every status, in lifecycle order.
pub const ORDER_STATUSES: &[OrderStatus] = &[
    OrderStatus::Pending,
    OrderStatus::InProgress,
    OrderStatus::Completed,
    OrderStatus::Cancelled,
];

impl OrderStatus {
    /// Statuses this one may move to next, in the order the UI lists them.
    pub const fn next_valid_statuses(self) -> &'static [OrderStatus] {
        match self {
            OrderStatus::Pending => &[OrderStatus::InProgress, OrderStatus::Cancelled],
            OrderStatus::InProgress => &[OrderStatus::Completed, OrderStatus::Cancelled],
            OrderStatus::Completed | OrderStatus::Cancelled => &[],
        }
    }

    /// Returns true if `target` is offered from this status.
    pub fn can_transition_to(self, target: OrderStatus) -> bool {
        self.next_valid_statuses().contains(&target)
    }

    /// Returns true for statuses with no way out.
    pub const fn is_terminal(self) -> bool {
        self.next_valid_statuses().is_empty()
    }

    /// Wire name (`"inProgress"`).
    pub const fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::InProgress => "inProgress",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        }
    }

    /// Human-readable label (`"In Progress"`).
    pub const fn label(self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::InProgress => "In Progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

/// Free-function form of [`OrderStatus::next_valid_statuses`].
pub fn next_valid_statuses(current: OrderStatus) -> Vec<OrderStatus> {
    current.next_valid_statuses().to_vec()
}

/// Orders with the given status, or all orders when `status` is `None`.
///
/// Backs the admin order tabs (All / Pending / In Progress / Completed).
pub fn filter_by_status(orders: &[Order], status: Option<OrderStatus>) -> Vec<&Order> {
    orders
        .iter()
        .filter(|o| status.map_or(true, |s| o.status == s))
        .collect()
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ValidationError;

    /// Accepts wire names and a few spellings operators type by hand.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace(['-', '_', ' '], "").as_str() {
            "pending" => Ok(OrderStatus::Pending),
            "inprogress" => Ok(OrderStatus::InProgress),
            "completed" | "complete" => Ok(OrderStatus::Completed),
            "cancelled" | "canceled" => Ok(OrderStatus::Cancelled),
            _ => Err(ValidationError::NotAllowed {
                field: "status".to_string(),
                allowed: ORDER_STATUSES.iter().map(|s| s.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn test_transition_table() {
        assert_eq!(
            next_valid_statuses(OrderStatus::Pending),
            vec![OrderStatus::InProgress, OrderStatus::Cancelled]
        );
        assert_eq!(
            next_valid_statuses(OrderStatus::InProgress),
            vec![OrderStatus::Completed, OrderStatus::Cancelled]
        );
        assert!(next_valid_statuses(OrderStatus::Completed).is_empty());
        assert!(next_valid_statuses(OrderStatus::Cancelled).is_empty());
    }

    #[test]
    fn test_terminal_statuses() {
        for status in ORDER_STATUSES {
            let terminal = matches!(status, OrderStatus::Completed | OrderStatus::Cancelled);
            assert_eq!(status.is_terminal(), terminal, "{status}");
        }
    }

    #[test]
    fn test_no_transition_leads_back() {
        // The graph is acyclic: nothing reaches Pending, and terminal states are sinks
        for from in ORDER_STATUSES {
            assert!(!from.can_transition_to(OrderStatus::Pending));
            assert!(!from.can_transition_to(*from));
        }
        assert!(!OrderStatus::Pending.can_transition_to(OrderStatus::Completed));
        assert!(OrderStatus::InProgress.can_transition_to(OrderStatus::Cancelled));
    }

    #[test]
    fn test_labels_and_parsing() {
        assert_eq!(OrderStatus::InProgress.label(), "In Progress");
        assert_eq!(OrderStatus::InProgress.to_string(), "inProgress");

        assert_eq!("inProgress".parse::<OrderStatus>().unwrap(), OrderStatus::InProgress);
        assert_eq!("in-progress".parse::<OrderStatus>().unwrap(), OrderStatus::InProgress);
        assert_eq!("Canceled".parse::<OrderStatus>().unwrap(), OrderStatus::Cancelled);
        assert!("shipped".parse::<OrderStatus>().is_err());

        for status in ORDER_STATUSES {
            assert_eq!(status.as_str().parse::<OrderStatus>().unwrap(), *status);
        }
    }

    #[test]
    fn test_filter_by_status() {
        let order = |id, status| Order {
            id,
            status,
            total_cents: 0,
            customer: String::new(),
            timestamp: Utc::now(),
            items: vec![],
        };
        let orders = vec![
            order(1, OrderStatus::Pending),
            order(2, OrderStatus::Completed),
            order(3, OrderStatus::Pending),
        ];

        assert_eq!(filter_by_status(&orders, None).len(), 3);
        let pending: Vec<_> = filter_by_status(&orders, Some(OrderStatus::Pending))
            .iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(pending, vec![1, 3]);
        assert!(filter_by_status(&orders, Some(OrderStatus::Cancelled)).is_empty());
    }
}
