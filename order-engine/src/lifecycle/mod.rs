//! Order lifecycle rules
//!
//! - **graph**: the explicit per-kind transition table (the single source of
//!   truth for transition legality)
//! - **invariants**: whole-order consistency checks run before any change
//!   is committed
//! - **transition**: validated, atomic application of a single transition

pub mod graph;
pub mod invariants;
pub mod transition;

// Re-exports
pub use graph::{is_legal, successors};
pub use invariants::validate_order;
pub use transition::{TransitionRequest, apply_transition};
