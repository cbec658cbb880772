//! Orders
//!
//! Order and payment statuses, and the slot side effects of moving between
//! them. Administrators may move an order to any status; what matters here
//! is whether the move frees the order's slots or claims them back.

use std::{fmt, str::FromStr};

use jiff::civil::Date;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when parsing an unknown status name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {kind} status: {value}")]
pub struct UnknownStatus {
    kind: &'static str,
    value: String,
}

/// Fulfilment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, awaiting payment or review.
    Pending,

    /// Accepted for production.
    Confirmed,

    /// In the workshop.
    Processing,

    /// Delivered.
    Completed,

    /// Cancelled; holds no slots.
    Cancelled,
}

impl OrderStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 5] = [
        Self::Pending,
        Self::Confirmed,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Name stored in the database and used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Whether an order in this status holds its delivery slots.
    pub const fn holds_slots(self) -> bool {
        !matches!(self, Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus {
                kind: "order",
                value: value.to_string(),
            })
    }
}

/// Payment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// No outcome reported yet.
    Pending,

    /// Paid.
    Completed,

    /// Payment attempt failed.
    Failed,

    /// Money returned.
    Refunded,
}

impl PaymentStatus {
    /// Every status.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Completed, Self::Failed, Self::Refunded];

    /// Name stored in the database and used on the wire.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
            Self::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| UnknownStatus {
                kind: "payment",
                value: value.to_string(),
            })
    }
}

/// What a status change does to the order's reserved slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotEffect {
    /// Slots stay as they are.
    Keep,

    /// Slots go back to the ledger.
    Release,

    /// Slots are taken from the ledger again.
    Reserve,
}

/// Slot effect of moving an order from one status to another.
pub const fn slot_effect(from: OrderStatus, to: OrderStatus) -> SlotEffect {
    match (from.holds_slots(), to.holds_slots()) {
        (true, false) => SlotEffect::Release,
        (false, true) => SlotEffect::Reserve,
        _ => SlotEffect::Keep,
    }
}

/// Outcome reported by the payment provider for one payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentOutcome {
    /// The charge went through.
    Succeeded,

    /// The charge was declined or abandoned.
    Failed,
}

/// New state of an order after a payment outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentTransition {
    /// Resulting fulfilment status.
    pub status: OrderStatus,

    /// Resulting payment status.
    pub payment_status: PaymentStatus,

    /// Slot side effect.
    pub slots: SlotEffect,
}

impl PaymentTransition {
    /// Whether anything changes.
    pub fn is_noop(&self, status: OrderStatus, payment_status: PaymentStatus) -> bool {
        self.status == status && self.payment_status == payment_status
    }
}

impl PaymentOutcome {
    /// Apply the outcome to an order in the given state.
    ///
    /// A success confirms pending orders and leaves other statuses alone. A
    /// failure cancels the order and releases its slots once; repeating
    /// either outcome changes nothing.
    pub const fn apply(self, status: OrderStatus) -> PaymentTransition {
        match self {
            Self::Succeeded => PaymentTransition {
                status: match status {
                    OrderStatus::Pending => OrderStatus::Confirmed,
                    other => other,
                },
                payment_status: PaymentStatus::Completed,
                slots: SlotEffect::Keep,
            },
            Self::Failed => PaymentTransition {
                status: OrderStatus::Cancelled,
                payment_status: PaymentStatus::Failed,
                slots: slot_effect(status, OrderStatus::Cancelled),
            },
        }
    }
}

/// Human-readable order reference: `VST-YYYYMMDD-XXXXXXXX`.
pub fn order_number(placed_on: Date, suffix: u32) -> String {
    format!("VST-{}-{suffix:08X}", placed_on.strftime("%Y%m%d"))
}
