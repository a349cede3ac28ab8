//! Role-conditioned action surface
//!
//! Derives which user-triggerable intents are legal for an order's current
//! status. Derivation is pure; invoking an action is a separate call into
//! the engine's transition API.

use super::entity::Order;
use super::status::{OrderKind, OrderStatus};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Viewer role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    Customer,
    Merchant,
}

/// User-triggerable intent whose legality depends on status and role
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    // === Customer ===
    Pay,
    PayDeposit,
    PayFinal,
    ConfirmDesign,
    RejectDesign,
    ConfirmReceipt,
    ContactService,
    // === Merchant ===
    CreateOrder,
    UploadDesign,
    CompleteProduction,
    ShipOrder,
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Pay => "PAY",
            Self::PayDeposit => "PAY_DEPOSIT",
            Self::PayFinal => "PAY_FINAL",
            Self::ConfirmDesign => "CONFIRM_DESIGN",
            Self::RejectDesign => "REJECT_DESIGN",
            Self::ConfirmReceipt => "CONFIRM_RECEIPT",
            Self::ContactService => "CONTACT_SERVICE",
            Self::CreateOrder => "CREATE_ORDER",
            Self::UploadDesign => "UPLOAD_DESIGN",
            Self::CompleteProduction => "COMPLETE_PRODUCTION",
            Self::ShipOrder => "SHIP_ORDER",
        };
        f.write_str(name)
    }
}

/// Derive the set of legal actions for an order and viewer role
///
/// This is the ONLY place that maps (kind, status, role) to affordances;
/// views render the result instead of re-deriving it from status checks.
pub fn available_actions(order: &Order, role: Role) -> Vec<Action> {
    let status = order.status;
    match role {
        Role::Customer => {
            let mut actions = Vec::new();
            match (order.kind(), status) {
                (OrderKind::ManualService, OrderStatus::PendingPayment) => {
                    actions.push(Action::Pay);
                }
                (OrderKind::CustomService, OrderStatus::PendingDeposit) => {
                    actions.push(Action::PayDeposit);
                }
                (OrderKind::CustomService, OrderStatus::DesignPendingConfirm) => {
                    actions.push(Action::ConfirmDesign);
                    actions.push(Action::RejectDesign);
                }
                (OrderKind::CustomService, OrderStatus::PendingFinalPayment) => {
                    actions.push(Action::PayFinal);
                }
                (OrderKind::CustomService, OrderStatus::Shipped) => {
                    actions.push(Action::ConfirmReceipt);
                }
                _ => {}
            }
            // Always-available escape hatch, except on cancelled orders
            if status != OrderStatus::Cancelled {
                actions.push(Action::ContactService);
            }
            actions
        }
        Role::Merchant => match (order.kind(), status) {
            (_, OrderStatus::PendingPayment) | (_, OrderStatus::PendingDeposit) => {
                vec![Action::CreateOrder]
            }
            (
                OrderKind::CustomService,
                OrderStatus::DepositPaid
                | OrderStatus::DesignRejected
                | OrderStatus::DesignPendingConfirm,
            ) => vec![Action::UploadDesign],
            (OrderKind::CustomService, OrderStatus::Manufacturing) => {
                vec![Action::CompleteProduction]
            }
            (OrderKind::CustomService, OrderStatus::ReadyToShip) => vec![Action::ShipOrder],
            _ => vec![],
        },
    }
}
