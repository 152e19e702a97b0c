use std::fmt;

use serde::{Deserialize, Serialize};

/// Order fulfillment lifecycle. `Cancelled` sits outside the linear
/// progression and is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Placed,
    Confirmed,
    Shipped,
    Delivered,
    Cancelled,
}

/// Payment axis, independent of fulfillment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Failed,
}

/// The linear progression an operator advances an order through.
pub const FULFILLMENT_SEQUENCE: [OrderStatus; 4] = [
    OrderStatus::Placed,
    OrderStatus::Confirmed,
    OrderStatus::Shipped,
    OrderStatus::Delivered,
];

impl OrderStatus {
    /// Position in the fulfillment sequence; `Cancelled` has none.
    pub fn ordinal(self) -> Option<usize> {
        FULFILLMENT_SEQUENCE.iter().position(|s| *s == self)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            OrderStatus::Placed => "placed",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether the admin selector offers `candidate` while an order sits at
/// `current`: the current status itself (a no-op) or the immediate next one,
/// and nothing at all once the order is cancelled. Cancellation itself goes
/// through [`can_cancel`], not the selector.
///
/// This mirrors the rule the backend enforces; it is a UX affordance, not a
/// security boundary.
pub fn is_selectable(current: OrderStatus, candidate: OrderStatus) -> bool {
    if current == OrderStatus::Cancelled {
        return false;
    }
    match (current.ordinal(), candidate.ordinal()) {
        (Some(cur), Some(cand)) => cand == cur || cand == cur + 1,
        _ => false,
    }
}

/// The out-of-band branch: an order can be cancelled until it is delivered
/// or already cancelled.
pub fn can_cancel(current: OrderStatus) -> bool {
    !matches!(current, OrderStatus::Delivered | OrderStatus::Cancelled)
}

/// Selector options for `current`, in display order.
pub fn selectable_from(current: OrderStatus) -> Vec<OrderStatus> {
    FULFILLMENT_SEQUENCE
        .into_iter()
        .filter(|candidate| is_selectable(current, *candidate))
        .collect()
}
