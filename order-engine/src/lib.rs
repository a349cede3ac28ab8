//! Order Lifecycle Engine
//!
//! This crate owns the rules that drive order state:
//!
//! - **lifecycle**: explicit transition graph, guards, and invariant checks
//! - **money**: deposit/final split with precise decimal arithmetic
//! - **number**: sequential display-number allocation (`ORD-<year>-<seq>`)
//! - **store**: repository abstraction with an in-memory implementation
//! - **manager**: per-order serialized command processing and event broadcast
//!
//! # Command Flow
//!
//! ```text
//! ActionRequest → OrderManager → transition validation → Order updated
//!                      ↓                                     ↓
//!                 role check                           Store save
//!                      ↓
//!              Broadcast StatusChanged
//! ```
//!
//! Reads (`classify`, `available_actions`, store lookups) are pure and safe
//! for unlimited concurrent callers; writes are serialized per order id.

pub mod lifecycle;
pub mod manager;
pub mod money;
pub mod number;
pub mod store;

// Re-exports
pub use lifecycle::{TransitionRequest, apply_transition, successors, validate_order};
pub use manager::{ActionRequest, CreateCustomOrder, CreateManualOrder, OrderManager, StatusChanged};
pub use number::OrderNumberAllocator;
pub use store::{MemoryOrderStore, OrderStore};

// Re-export shared types for convenience
pub use shared::order::{
    Action, FilterCategory, Order, OrderDetails, OrderFilters, OrderKind, OrderStatus, Role,
    available_actions,
};
pub use shared::{OrderError, OrderResult};
