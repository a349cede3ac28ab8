//! Order Lifecycle Module
//!
//! This module owns the closed set of order statuses, the order entity, the
//! status-derived filter categorization, and the role-conditioned action
//! surface:
//! - Statuses: per-kind enumerations with a coarse filter category
//! - Entity: tagged union over [`OrderKind`] with an append-only history
//! - Filters: list-view filtering (kind, category, free-text search)
//! - Actions: which affordances are legal for a given order and role

pub mod actions;
pub mod entity;
pub mod filter;
pub mod status;

// Re-exports
pub use actions::{Action, Role, available_actions};
pub use entity::{CustomDetails, DesignImage, LogisticsInfo, Order, OrderDetails, StatusHistoryItem};
pub use filter::{KindFilter, OrderFilters, StatusFilter};
pub use status::{FilterCategory, OrderKind, OrderStatus};
