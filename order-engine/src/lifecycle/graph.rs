//! Per-kind transition graph
//!
//! This adjacency table is the ONLY encoding of transition legality.
//! `Cancelled` is reachable from every non-terminal status of either kind;
//! terminal statuses have no successors.

use shared::order::{OrderKind, OrderStatus};

/// Direct successors of a status in the given kind's graph
///
/// Statuses outside the kind's enumeration have no edges, so a cross-kind
/// target is rejected as an illegal transition without a separate check.
pub fn successors(kind: OrderKind, status: OrderStatus) -> &'static [OrderStatus] {
    use OrderStatus::*;
    match kind {
        OrderKind::ManualService => match status {
            PendingPayment => &[Paid, Cancelled],
            Paid => &[Completed, Cancelled],
            _ => &[],
        },
        OrderKind::CustomService => match status {
            PendingDeposit => &[DepositPaid, Cancelled],
            DepositPaid => &[Designing, Cancelled],
            Designing => &[DesignPendingConfirm, Cancelled],
            DesignPendingConfirm => &[DesignConfirmed, DesignRejected, Cancelled],
            // Rework cycle: a rejected design goes back to the drawing board
            DesignRejected => &[Designing, Cancelled],
            DesignConfirmed => &[PendingFinalPayment, Cancelled],
            PendingFinalPayment => &[Manufacturing, Cancelled],
            Manufacturing => &[ReadyToShip, Cancelled],
            ReadyToShip => &[Shipped, Cancelled],
            Shipped => &[Received, Cancelled],
            Received => &[Completed, Cancelled],
            _ => &[],
        },
    }
}

/// Whether `from -> to` is an edge of the kind's graph
pub fn is_legal(kind: OrderKind, from: OrderStatus, to: OrderStatus) -> bool {
    successors(kind, from).contains(&to)
}

/// Happy-path status sequence for a manual service order
pub const MANUAL_HAPPY_PATH: [OrderStatus; 3] = [
    OrderStatus::PendingPayment,
    OrderStatus::Paid,
    OrderStatus::Completed,
];

/// Happy-path status sequence for a custom service order
pub const CUSTOM_HAPPY_PATH: [OrderStatus; 11] = [
    OrderStatus::PendingDeposit,
    OrderStatus::DepositPaid,
    OrderStatus::Designing,
    OrderStatus::DesignPendingConfirm,
    OrderStatus::DesignConfirmed,
    OrderStatus::PendingFinalPayment,
    OrderStatus::Manufacturing,
    OrderStatus::ReadyToShip,
    OrderStatus::Shipped,
    OrderStatus::Received,
    OrderStatus::Completed,
];
