//! Unified error taxonomy for the order lifecycle
//!
//! Every failure mode of the lifecycle model is enumerated here:
//! - [`OrderError::IllegalTransition`] / [`OrderError::TerminalOrder`]:
//!   recoverable, surfaced to the caller as a no-op with a message
//! - [`OrderError::UnknownStatus`]: data-integrity error, fails loudly
//!   instead of silently defaulting to a filter value
//! - [`OrderError::InvariantViolation`]: rejected before any state change
//!
//! All errors are local to the single order being mutated; a transition
//! either fully applies or leaves the order untouched.

use crate::order::{Action, OrderStatus};
use thiserror::Error;

/// Errors produced by the order lifecycle model
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderError {
    /// Requested edge is not present in the kind's transition graph
    #[error("illegal transition: {from} -> {to}")]
    IllegalTransition { from: OrderStatus, to: OrderStatus },

    /// Source status has no outgoing edges
    #[error("order is terminal: {0}")]
    TerminalOrder(OrderStatus),

    /// Status value outside the enumerated set (programming/data error)
    #[error("unknown order status: {0}")]
    UnknownStatus(String),

    /// A domain invariant would be broken by the requested change
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The action is not legal for the order's current status and role
    #[error("action {action} not available in status {status}")]
    ActionNotAvailable { action: Action, status: OrderStatus },

    /// Order not found in the store
    #[error("order not found: {0}")]
    OrderNotFound(String),
}

impl OrderError {
    /// Create an InvariantViolation error
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }
}

/// Result type for lifecycle operations
pub type OrderResult<T> = Result<T, OrderError>;
