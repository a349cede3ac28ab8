//! OrderManager - serialized command processing per order
//!
//! This module handles:
//! - Order creation (number allocation, deposit split, initial history)
//! - Action execution with role checks against the action surface
//! - Single-writer-per-order locking
//! - Status-change broadcasting (via tokio broadcast)
//!
//! # Action Flow
//!
//! ```text
//! execute(order_id, role, request)
//!     ├─ 1. Take the per-order lock
//!     ├─ 2. Load the order from the store
//!     ├─ 3. Check the action against available_actions(order, role)
//!     ├─ 4. Map the action onto graph transitions and apply them
//!     ├─ 5. Save the updated order
//!     └─ 6. Broadcast StatusChanged event(s)
//! ```
//!
//! `ContactService` never reaches the manager (it opens a chat, it does not
//! transition), and `CreateOrder` maps to the `create_*_order` methods.

use crate::lifecycle::{TransitionRequest, apply_transition, validate_order};
use crate::money;
use crate::number::OrderNumberAllocator;
use crate::store::OrderStore;
use dashmap::DashMap;
use parking_lot::Mutex;
use serde::Serialize;
use shared::order::{
    Action, CustomDetails, DesignImage, LogisticsInfo, Order, OrderDetails, OrderStatus, Role,
    available_actions,
};
use shared::{OrderError, OrderResult};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Event broadcast channel capacity
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Payload for creating a manual service order
#[derive(Debug, Clone)]
pub struct CreateManualOrder {
    pub user_id: String,
    /// Total amount in smallest currency unit
    pub amount: i64,
    pub session_id: Option<String>,
}

/// Payload for creating a custom service order
#[derive(Debug, Clone)]
pub struct CreateCustomOrder {
    pub user_id: String,
    /// Total amount in smallest currency unit
    pub amount: i64,
    pub design_name: String,
    pub description: Option<String>,
    pub session_id: Option<String>,
}

/// A user-triggered action with its payload
#[derive(Debug, Clone)]
pub enum ActionRequest {
    Pay,
    PayDeposit,
    PayFinal,
    ConfirmDesign {
        /// Image to confirm; defaults to the most recent upload
        image_id: Option<String>,
    },
    RejectDesign {
        note: Option<String>,
    },
    ConfirmReceipt,
    UploadDesign {
        image: DesignImage,
    },
    CompleteProduction,
    ShipOrder {
        logistics: LogisticsInfo,
    },
}

impl ActionRequest {
    /// The action this request invokes, checked against the action surface
    pub fn action(&self) -> Action {
        match self {
            Self::Pay => Action::Pay,
            Self::PayDeposit => Action::PayDeposit,
            Self::PayFinal => Action::PayFinal,
            Self::ConfirmDesign { .. } => Action::ConfirmDesign,
            Self::RejectDesign { .. } => Action::RejectDesign,
            Self::ConfirmReceipt => Action::ConfirmReceipt,
            Self::UploadDesign { .. } => Action::UploadDesign,
            Self::CompleteProduction => Action::CompleteProduction,
            Self::ShipOrder { .. } => Action::ShipOrder,
        }
    }
}

/// Broadcast on every successful transition
#[derive(Debug, Clone, Serialize)]
pub struct StatusChanged {
    pub order_id: String,
    pub from: OrderStatus,
    pub to: OrderStatus,
    /// Unix millis
    pub timestamp: i64,
}

/// Serialized command processing over an injected store
pub struct OrderManager {
    store: Arc<dyn OrderStore>,
    /// Per-order write locks (single writer per order id)
    locks: DashMap<String, Arc<Mutex<()>>>,
    numbers: OrderNumberAllocator,
    event_tx: broadcast::Sender<StatusChanged>,
}

impl std::fmt::Debug for OrderManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OrderManager")
            .field("store", &"<OrderStore>")
            .field("locks", &self.locks.len())
            .finish()
    }
}

impl OrderManager {
    pub fn new(store: Arc<dyn OrderStore>) -> Self {
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            store,
            locks: DashMap::new(),
            numbers: OrderNumberAllocator::new(),
            event_tx,
        }
    }

    /// Subscribe to status-change events
    pub fn subscribe(&self) -> broadcast::Receiver<StatusChanged> {
        self.event_tx.subscribe()
    }

    /// Fetch one order (pure read, no lock)
    pub fn get(&self, order_id: &str) -> OrderResult<Order> {
        self.store.get(order_id)
    }

    /// List orders for the given filters (pure read, no lock)
    pub fn list(&self, filters: &shared::order::OrderFilters) -> Vec<Order> {
        self.store.list(filters)
    }

    /// Create a manual service order in `PendingPayment`
    pub fn create_manual_order(&self, request: CreateManualOrder) -> OrderResult<Order> {
        money::validate_amount(request.amount)?;
        let order = Order::new(
            uuid::Uuid::new_v4().to_string(),
            self.numbers.next(),
            request.user_id,
            request.amount,
            OrderDetails::ManualService {
                session_id: request.session_id,
            },
            Self::now(),
        );
        self.store.save(order.clone())?;
        tracing::info!(order_id = %order.id, order_number = %order.order_number, "manual order created");
        Ok(order)
    }

    /// Create a custom service order in `PendingDeposit` with the 30/70 split
    pub fn create_custom_order(&self, request: CreateCustomOrder) -> OrderResult<Order> {
        if request.design_name.trim().is_empty() {
            return Err(OrderError::invariant("design name must not be empty"));
        }
        let (deposit_amount, final_amount) = money::split_deposit(request.amount)?;
        let order = Order::new(
            uuid::Uuid::new_v4().to_string(),
            self.numbers.next(),
            request.user_id,
            request.amount,
            OrderDetails::CustomService(CustomDetails {
                design_name: request.design_name,
                description: request.description,
                deposit_amount,
                deposit_paid_at: None,
                final_amount,
                final_paid_at: None,
                design_images: Vec::new(),
                production_images: None,
                logistics: None,
                session_id: request.session_id,
            }),
            Self::now(),
        );
        self.store.save(order.clone())?;
        tracing::info!(
            order_id = %order.id,
            order_number = %order.order_number,
            deposit = deposit_amount,
            "custom order created"
        );
        Ok(order)
    }

    /// Apply a raw transition (collaborator-driven steps such as
    /// requesting the final payment, delivery scans, or cancellation)
    pub fn transition(&self, order_id: &str, request: &TransitionRequest) -> OrderResult<Order> {
        let lock = self.lock_for(order_id);
        let _guard = lock.lock();
        let order = self.store.get(order_id)?;
        self.commit(&order, request)
    }

    /// Execute a user action after checking it against the action surface
    pub fn execute(
        &self,
        order_id: &str,
        role: Role,
        request: &ActionRequest,
    ) -> OrderResult<Order> {
        let lock = self.lock_for(order_id);
        let _guard = lock.lock();
        let order = self.store.get(order_id)?;

        let action = request.action();
        if !available_actions(&order, role).contains(&action) {
            return Err(OrderError::ActionNotAvailable {
                action,
                status: order.status,
            });
        }

        match request {
            ActionRequest::Pay => self.commit(&order, &TransitionRequest::to(OrderStatus::Paid)),
            ActionRequest::PayDeposit => {
                self.commit(&order, &TransitionRequest::to(OrderStatus::DepositPaid))
            }
            ActionRequest::PayFinal => {
                self.commit(&order, &TransitionRequest::to(OrderStatus::Manufacturing))
            }
            ActionRequest::ConfirmDesign { image_id } => {
                let mut transition = TransitionRequest::to(OrderStatus::DesignConfirmed);
                transition.confirm_image_id = image_id.clone();
                self.commit(&order, &transition)
            }
            ActionRequest::RejectDesign { note } => {
                let mut transition = TransitionRequest::to(OrderStatus::DesignRejected);
                transition.note = note.clone();
                self.commit(&order, &transition)
            }
            ActionRequest::ConfirmReceipt => {
                self.commit(&order, &TransitionRequest::to(OrderStatus::Received))
            }
            ActionRequest::CompleteProduction => {
                self.commit(&order, &TransitionRequest::to(OrderStatus::ReadyToShip))
            }
            ActionRequest::ShipOrder { logistics } => self.commit(
                &order,
                &TransitionRequest::to(OrderStatus::Shipped).with_logistics(logistics.clone()),
            ),
            ActionRequest::UploadDesign { image } => self.upload_design(order, image),
        }
    }

    /// Handle a design upload for the order's current stage
    ///
    /// From DepositPaid or DesignRejected the upload walks
    /// `Designing -> DesignPendingConfirm` (two history entries, covering
    /// the rework cycle). From DesignPendingConfirm it adds a revised image
    /// without a status change.
    fn upload_design(&self, order: Order, image: &DesignImage) -> OrderResult<Order> {
        // Uploads never arrive confirmed; only the DesignConfirmed guard
        // may set the flag
        let image = DesignImage {
            is_confirmed: false,
            ..image.clone()
        };
        match order.status {
            OrderStatus::DepositPaid | OrderStatus::DesignRejected => {
                // Both steps must validate before anything is persisted,
                // so a failure never leaves the order stuck in Designing
                let now = Self::now();
                let designing =
                    apply_transition(&order, &TransitionRequest::to(OrderStatus::Designing), now)?;
                let pending = apply_transition(
                    &designing,
                    &TransitionRequest::to(OrderStatus::DesignPendingConfirm)
                        .with_design_image(image),
                    now,
                )?;
                self.store.save(pending.clone())?;
                tracing::info!(
                    order_id = %pending.id,
                    from = %order.status,
                    to = %pending.status,
                    "design uploaded"
                );
                for (from, to) in [
                    (order.status, designing.status),
                    (designing.status, pending.status),
                ] {
                    let _ = self.event_tx.send(StatusChanged {
                        order_id: pending.id.clone(),
                        from,
                        to,
                        timestamp: pending.updated_at,
                    });
                }
                Ok(pending)
            }
            OrderStatus::DesignPendingConfirm => {
                let mut updated = order;
                let details = updated
                    .custom_mut()
                    .ok_or_else(|| OrderError::invariant("design upload requires a custom order"))?;
                details.design_images.push(image.clone());
                updated.updated_at = Self::now().max(updated.updated_at);
                validate_order(&updated)?;
                self.store.save(updated.clone())?;
                tracing::info!(order_id = %updated.id, image_id = %image.id, "design revision uploaded");
                Ok(updated)
            }
            status => Err(OrderError::ActionNotAvailable {
                action: Action::UploadDesign,
                status,
            }),
        }
    }

    /// Apply one validated transition, persist it, and broadcast the change
    ///
    /// Caller must hold the order's lock.
    fn commit(&self, order: &Order, request: &TransitionRequest) -> OrderResult<Order> {
        let from = order.status;
        let updated = apply_transition(order, request, Self::now())?;
        self.store.save(updated.clone())?;
        tracing::info!(
            order_id = %updated.id,
            from = %from,
            to = %updated.status,
            "order transitioned"
        );
        let _ = self.event_tx.send(StatusChanged {
            order_id: updated.id.clone(),
            from,
            to: updated.status,
            timestamp: updated.updated_at,
        });
        Ok(updated)
    }

    fn lock_for(&self, order_id: &str) -> Arc<Mutex<()>> {
        self.locks
            .entry(order_id.to_string())
            .or_default()
            .clone()
    }

    fn now() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }
}
