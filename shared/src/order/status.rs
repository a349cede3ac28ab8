//! Order status enumerations and filter categorization

use crate::error::OrderError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    /// Single-payment service, no design/manufacturing phases
    ManualService,
    /// Deposit + final payment with design approval and manufacturing
    CustomService,
}

/// Order status (covers both kinds' enumerations)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    // === ManualService ===
    PendingPayment,
    Paid,
    // === CustomService ===
    PendingDeposit,
    DepositPaid,
    Designing,
    DesignPendingConfirm,
    DesignRejected,
    DesignConfirmed,
    PendingFinalPayment,
    Manufacturing,
    ReadyToShip,
    Shipped,
    Received,
    // === Shared terminals ===
    Completed,
    Cancelled,
}

/// Coarse filter category derived from fine-grained status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FilterCategory {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Every enumerated status, in declaration order
    pub const ALL: [OrderStatus; 15] = [
        Self::PendingPayment,
        Self::Paid,
        Self::PendingDeposit,
        Self::DepositPaid,
        Self::Designing,
        Self::DesignPendingConfirm,
        Self::DesignRejected,
        Self::DesignConfirmed,
        Self::PendingFinalPayment,
        Self::Manufacturing,
        Self::ReadyToShip,
        Self::Shipped,
        Self::Received,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Initial status for a freshly created order of the given kind
    pub fn initial(kind: OrderKind) -> Self {
        match kind {
            OrderKind::ManualService => Self::PendingPayment,
            OrderKind::CustomService => Self::PendingDeposit,
        }
    }

    /// Terminal statuses have no outgoing transitions
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Whether this status belongs to the given kind's enumeration
    pub fn valid_for(&self, kind: OrderKind) -> bool {
        match self {
            Self::Completed | Self::Cancelled => true,
            Self::PendingPayment | Self::Paid => kind == OrderKind::ManualService,
            _ => kind == OrderKind::CustomService,
        }
    }

    /// Classify this status into its coarse filter category
    ///
    /// Total over the enumeration: every status maps to exactly one
    /// category. Unrecognized raw values never reach this point; they are
    /// rejected at parse time with [`OrderError::UnknownStatus`].
    pub fn category(&self) -> FilterCategory {
        match self {
            Self::PendingPayment | Self::PendingDeposit => FilterCategory::Pending,
            Self::Paid
            | Self::DepositPaid
            | Self::Designing
            | Self::DesignPendingConfirm
            | Self::DesignRejected
            | Self::DesignConfirmed
            | Self::PendingFinalPayment
            | Self::Manufacturing
            | Self::ReadyToShip
            | Self::Shipped
            | Self::Received => FilterCategory::InProgress,
            Self::Completed => FilterCategory::Completed,
            Self::Cancelled => FilterCategory::Cancelled,
        }
    }

    /// Wire name (matches the serde representation)
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PendingPayment => "PENDING_PAYMENT",
            Self::Paid => "PAID",
            Self::PendingDeposit => "PENDING_DEPOSIT",
            Self::DepositPaid => "DEPOSIT_PAID",
            Self::Designing => "DESIGNING",
            Self::DesignPendingConfirm => "DESIGN_PENDING_CONFIRM",
            Self::DesignRejected => "DESIGN_REJECTED",
            Self::DesignConfirmed => "DESIGN_CONFIRMED",
            Self::PendingFinalPayment => "PENDING_FINAL_PAYMENT",
            Self::Manufacturing => "MANUFACTURING",
            Self::ReadyToShip => "READY_TO_SHIP",
            Self::Shipped => "SHIPPED",
            Self::Received => "RECEIVED",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = OrderError;

    /// Parse a raw status string, failing loudly on unknown values
    ///
    /// This is the data-integrity boundary: unknown statuses are a
    /// programming/data error, never a silent fallback to a filter value.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|status| status.as_str() == s)
            .copied()
            .ok_or_else(|| {
                tracing::error!(status = %s, "unknown order status");
                OrderError::UnknownStatus(s.to_string())
            })
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        };
        f.write_str(name)
    }
}
