//! Validated, atomic transition application
//!
//! `apply_transition` never mutates its input: it validates against the
//! graph and guards, builds the successor order, validates invariants on
//! the result, and only then returns it. Any error leaves the caller's
//! order exactly as it was.

use super::graph;
use super::invariants;
use shared::order::{DesignImage, LogisticsInfo, Order, OrderStatus};
use shared::{OrderError, OrderResult};

/// One requested transition with its side payloads
#[derive(Debug, Clone)]
pub struct TransitionRequest {
    pub target: OrderStatus,
    pub note: Option<String>,
    /// Required when entering `Shipped`
    pub logistics: Option<LogisticsInfo>,
    /// New design upload, attached when entering `DesignPendingConfirm`
    pub design_image: Option<DesignImage>,
    /// Design image to mark confirmed when entering `DesignConfirmed`;
    /// defaults to the most recent upload
    pub confirm_image_id: Option<String>,
}

impl TransitionRequest {
    pub fn to(target: OrderStatus) -> Self {
        Self {
            target,
            note: None,
            logistics: None,
            design_image: None,
            confirm_image_id: None,
        }
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn with_logistics(mut self, logistics: LogisticsInfo) -> Self {
        self.logistics = Some(logistics);
        self
    }

    pub fn with_design_image(mut self, image: DesignImage) -> Self {
        self.design_image = Some(image);
        self
    }

    pub fn confirming_image(mut self, image_id: impl Into<String>) -> Self {
        self.confirm_image_id = Some(image_id.into());
        self
    }
}

/// Apply a single transition, returning the updated order
///
/// Appends exactly one history entry on success. Guards tied to domain
/// invariants run here: deposit/final payment timestamps, design
/// confirmation, and the logistics requirement for shipping.
pub fn apply_transition(
    order: &Order,
    request: &TransitionRequest,
    now: i64,
) -> OrderResult<Order> {
    let target = request.target;
    let from = order.status;

    if from.is_terminal() {
        return Err(OrderError::TerminalOrder(from));
    }
    if !graph::is_legal(order.kind(), from, target) {
        return Err(OrderError::IllegalTransition { from, to: target });
    }

    // History timestamps must never go backwards, even with caller clock skew
    let now = order
        .last_history()
        .map_or(now, |last| now.max(last.timestamp));

    let mut next = order.clone();
    apply_guards(&mut next, request, target, now)?;
    next.record_status(target, now, request.note.clone());
    invariants::validate_order(&next)?;
    Ok(next)
}

fn apply_guards(
    next: &mut Order,
    request: &TransitionRequest,
    target: OrderStatus,
    now: i64,
) -> OrderResult<()> {
    match target {
        OrderStatus::DepositPaid => {
            if let Some(details) = next.custom_mut() {
                details.deposit_paid_at = Some(now);
            }
        }
        // Entering manufacturing is the final payment clearing
        OrderStatus::Manufacturing => {
            if let Some(details) = next.custom_mut() {
                details.final_paid_at = Some(now);
            }
        }
        OrderStatus::DesignPendingConfirm => {
            let details = next
                .custom_mut()
                .ok_or_else(|| OrderError::invariant("design upload requires a custom order"))?;
            if let Some(image) = &request.design_image {
                details.design_images.push(image.clone());
            }
            if details.design_images.is_empty() {
                return Err(OrderError::invariant(
                    "cannot await design confirmation without a design image",
                ));
            }
        }
        OrderStatus::DesignConfirmed => {
            let details = next
                .custom_mut()
                .ok_or_else(|| OrderError::invariant("design confirmation requires a custom order"))?;
            let confirm_id = match &request.confirm_image_id {
                Some(id) => id.clone(),
                None => details
                    .design_images
                    .last()
                    .map(|image| image.id.clone())
                    .ok_or_else(|| OrderError::invariant("no design image to confirm"))?,
            };
            let mut found = false;
            for image in &mut details.design_images {
                image.is_confirmed = image.id == confirm_id;
                found |= image.is_confirmed;
            }
            if !found {
                return Err(OrderError::invariant(format!(
                    "design image {confirm_id} not found"
                )));
            }
        }
        OrderStatus::Shipped => {
            let logistics = request.logistics.clone().ok_or_else(|| {
                OrderError::invariant("shipping requires a logistics record in the same operation")
            })?;
            let details = next
                .custom_mut()
                .ok_or_else(|| OrderError::invariant("shipping requires a custom order"))?;
            details.logistics = Some(LogisticsInfo {
                shipped_at: Some(now),
                ..logistics
            });
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{CustomDetails, OrderDetails};

    fn custom_order() -> Order {
        Order::new(
            "order-1".to_string(),
            "ORD-2025-0001".to_string(),
            "user-1".to_string(),
            5000,
            OrderDetails::CustomService(CustomDetails {
                design_name: "Aero Spoke".to_string(),
                description: None,
                deposit_amount: 1500,
                deposit_paid_at: None,
                final_amount: 3500,
                final_paid_at: None,
                design_images: vec![],
                production_images: None,
                logistics: None,
                session_id: None,
            }),
            1_000,
        )
    }

    fn image(id: &str) -> DesignImage {
        DesignImage {
            id: id.to_string(),
            url: format!("https://cdn.example.com/{id}.png"),
            uploaded_at: 2_000,
            is_confirmed: false,
        }
    }

    #[test]
    fn test_legal_transition_appends_history() {
        let order = custom_order();
        let next = apply_transition(
            &order,
            &TransitionRequest::to(OrderStatus::DepositPaid).with_note("deposit received"),
            2_000,
        )
        .unwrap();
        assert_eq!(next.status, OrderStatus::DepositPaid);
        assert_eq!(next.status_history.len(), order.status_history.len() + 1);
        assert_eq!(next.updated_at, 2_000);
        assert_eq!(next.custom().unwrap().deposit_paid_at, Some(2_000));
        // Source order untouched
        assert_eq!(order.status, OrderStatus::PendingDeposit);
    }

    #[test]
    fn test_illegal_transition_is_repeatable() {
        let order = custom_order();
        let request = TransitionRequest::to(OrderStatus::Manufacturing);
        for _ in 0..2 {
            let err = apply_transition(&order, &request, 2_000).unwrap_err();
            assert_eq!(
                err,
                OrderError::IllegalTransition {
                    from: OrderStatus::PendingDeposit,
                    to: OrderStatus::Manufacturing,
                }
            );
        }
        assert_eq!(order.status_history.len(), 1);
    }

    #[test]
    fn test_terminal_order_rejects_everything() {
        let mut order = custom_order();
        order.record_status(OrderStatus::Cancelled, 2_000, None);
        for target in OrderStatus::ALL {
            let err = apply_transition(&order, &TransitionRequest::to(target), 3_000).unwrap_err();
            assert_eq!(err, OrderError::TerminalOrder(OrderStatus::Cancelled));
        }
    }

    #[test]
    fn test_design_pending_confirm_requires_image() {
        let order = custom_order();
        let designing = apply_transition(
            &order,
            &TransitionRequest::to(OrderStatus::DepositPaid),
            2_000,
        )
        .and_then(|o| {
            apply_transition(&o, &TransitionRequest::to(OrderStatus::Designing), 3_000)
        })
        .unwrap();

        let bare = apply_transition(
            &designing,
            &TransitionRequest::to(OrderStatus::DesignPendingConfirm),
            4_000,
        );
        assert!(matches!(bare, Err(OrderError::InvariantViolation(_))));

        let uploaded = apply_transition(
            &designing,
            &TransitionRequest::to(OrderStatus::DesignPendingConfirm)
                .with_design_image(image("draft-1")),
            4_000,
        )
        .unwrap();
        assert_eq!(uploaded.custom().unwrap().design_images.len(), 1);
    }

    #[test]
    fn test_confirm_design_marks_single_image() {
        let mut order = custom_order();
        order.record_status(OrderStatus::DepositPaid, 2_000, None);
        order.custom_mut().unwrap().deposit_paid_at = Some(2_000);
        order.record_status(OrderStatus::Designing, 3_000, None);
        order.custom_mut().unwrap().design_images = vec![image("draft-1"), image("draft-2")];
        order.record_status(OrderStatus::DesignPendingConfirm, 4_000, None);

        let confirmed = apply_transition(
            &order,
            &TransitionRequest::to(OrderStatus::DesignConfirmed).confirming_image("draft-1"),
            5_000,
        )
        .unwrap();
        let images = &confirmed.custom().unwrap().design_images;
        assert!(images[0].is_confirmed);
        assert!(!images[1].is_confirmed);

        // Default: most recent upload
        let confirmed_latest = apply_transition(
            &order,
            &TransitionRequest::to(OrderStatus::DesignConfirmed),
            5_000,
        )
        .unwrap();
        assert!(confirmed_latest.custom().unwrap().design_images[1].is_confirmed);

        let missing = apply_transition(
            &order,
            &TransitionRequest::to(OrderStatus::DesignConfirmed).confirming_image("nope"),
            5_000,
        );
        assert!(matches!(missing, Err(OrderError::InvariantViolation(_))));
    }

    #[test]
    fn test_shipping_without_logistics_fails() {
        let mut order = custom_order();
        order.status_history.clear();
        order.record_status(OrderStatus::ReadyToShip, 8_000, None);

        let err = apply_transition(&order, &TransitionRequest::to(OrderStatus::Shipped), 9_000)
            .unwrap_err();
        assert!(matches!(err, OrderError::InvariantViolation(_)));

        let shipped = apply_transition(
            &order,
            &TransitionRequest::to(OrderStatus::Shipped).with_logistics(LogisticsInfo {
                courier: "SF Express".to_string(),
                tracking_number: "SF1234567890".to_string(),
                shipped_at: None,
            }),
            9_000,
        )
        .unwrap();
        let logistics = shipped.custom().unwrap().logistics.clone().unwrap();
        assert_eq!(logistics.shipped_at, Some(9_000));
    }

    #[test]
    fn test_clock_skew_is_clamped() {
        let order = custom_order();
        let next = apply_transition(
            &order,
            &TransitionRequest::to(OrderStatus::DepositPaid),
            500, // before created_at
        )
        .unwrap();
        assert_eq!(next.last_history().unwrap().timestamp, 1_000);
    }
}
