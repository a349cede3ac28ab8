//! Shared types for the order lifecycle system
//!
//! Common types used across crates and consumers: order entities, status
//! enumerations, filter categorization, the role-conditioned action surface,
//! and the error taxonomy.

pub mod error;
pub mod order;

// Re-exports
pub use error::{OrderError, OrderResult};
pub use order::{
    Action, FilterCategory, Order, OrderDetails, OrderFilters, OrderKind, OrderStatus, Role,
};
pub use serde::{Deserialize, Serialize};
