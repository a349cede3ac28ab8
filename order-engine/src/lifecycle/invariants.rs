//! Whole-order invariant validation
//!
//! Run against a candidate order before any change is committed, so a
//! transition either fully applies or leaves the order untouched.

use crate::money;
use shared::order::{CustomDetails, Order, OrderStatus};
use shared::{OrderError, OrderResult};

/// Validate every domain invariant of an order
pub fn validate_order(order: &Order) -> OrderResult<()> {
    money::validate_amount(order.amount)?;

    if !order.status.valid_for(order.kind()) {
        return Err(OrderError::invariant(format!(
            "status {} does not belong to kind {:?}",
            order.status,
            order.kind()
        )));
    }

    validate_history(order)?;

    if let Some(details) = order.custom() {
        validate_custom(order, details)?;
    }
    Ok(())
}

fn validate_history(order: &Order) -> OrderResult<()> {
    let last = order
        .last_history()
        .ok_or_else(|| OrderError::invariant("status history must not be empty"))?;
    if last.status != order.status {
        return Err(OrderError::invariant(format!(
            "last history entry {} does not match current status {}",
            last.status, order.status
        )));
    }
    let non_decreasing = order
        .status_history
        .windows(2)
        .all(|pair| pair[0].timestamp <= pair[1].timestamp);
    if !non_decreasing {
        return Err(OrderError::invariant(
            "history timestamps must be non-decreasing",
        ));
    }
    Ok(())
}

fn validate_custom(order: &Order, details: &CustomDetails) -> OrderResult<()> {
    let (deposit, final_amount) = money::split_deposit(order.amount)?;
    if details.deposit_amount != deposit || details.final_amount != final_amount {
        return Err(OrderError::invariant(format!(
            "deposit/final split {}+{} does not match amount {}",
            details.deposit_amount, details.final_amount, order.amount
        )));
    }

    let confirmed = details
        .design_images
        .iter()
        .filter(|image| image.is_confirmed)
        .count();
    if confirmed > 1 {
        return Err(OrderError::invariant(
            "at most one design image may be confirmed",
        ));
    }
    if confirmed == 1 && !design_may_be_confirmed(order.status) {
        return Err(OrderError::invariant(format!(
            "confirmed design image not allowed in status {}",
            order.status
        )));
    }

    match order.status {
        OrderStatus::Shipped | OrderStatus::Received | OrderStatus::Completed => {
            if details.logistics.is_none() {
                return Err(OrderError::invariant(format!(
                    "logistics record required in status {}",
                    order.status
                )));
            }
        }
        // A cancelled order keeps whatever logistics it already had
        OrderStatus::Cancelled => {}
        _ => {
            if details.logistics.is_some() {
                return Err(OrderError::invariant(format!(
                    "logistics record not allowed before shipping (status {})",
                    order.status
                )));
            }
        }
    }
    Ok(())
}

/// Statuses in which a confirmed design image is legal
///
/// The design-approval stages must not carry a confirmed flag; anything
/// from DesignConfirmed onward may (including Cancelled, which keeps the
/// state it had when cancelled).
fn design_may_be_confirmed(status: OrderStatus) -> bool {
    !matches!(
        status,
        OrderStatus::PendingDeposit
            | OrderStatus::DepositPaid
            | OrderStatus::Designing
            | OrderStatus::DesignPendingConfirm
            | OrderStatus::DesignRejected
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::order::{DesignImage, LogisticsInfo, OrderDetails};

    fn base_custom_order() -> Order {
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

    fn image(id: &str, confirmed: bool) -> DesignImage {
        DesignImage {
            id: id.to_string(),
            url: format!("https://cdn.example.com/{id}.png"),
            uploaded_at: 2_000,
            is_confirmed: confirmed,
        }
    }

    #[test]
    fn test_fresh_order_is_valid() {
        validate_order(&base_custom_order()).unwrap();
    }

    #[test]
    fn test_bad_deposit_split_rejected() {
        let mut order = base_custom_order();
        order.custom_mut().unwrap().deposit_amount = 1000;
        order.custom_mut().unwrap().final_amount = 4000;
        assert!(matches!(
            validate_order(&order),
            Err(OrderError::InvariantViolation(_))
        ));
    }

    #[test]
    fn test_history_must_match_status() {
        let mut order = base_custom_order();
        order.status = OrderStatus::DepositPaid;
        assert!(validate_order(&order).is_err());
    }

    #[test]
    fn test_history_timestamps_must_not_go_backwards() {
        let mut order = base_custom_order();
        order.record_status(OrderStatus::DepositPaid, 500, None);
        order.custom_mut().unwrap().deposit_paid_at = Some(500);
        assert!(validate_order(&order).is_err());
    }

    #[test]
    fn test_two_confirmed_images_rejected() {
        let mut order = base_custom_order();
        order.record_status(OrderStatus::DepositPaid, 2_000, None);
        order.record_status(OrderStatus::Designing, 3_000, None);
        order.record_status(OrderStatus::DesignPendingConfirm, 4_000, None);
        order.record_status(OrderStatus::DesignConfirmed, 5_000, None);
        let details = order.custom_mut().unwrap();
        details.design_images = vec![image("a", true), image("b", true)];
        assert!(validate_order(&order).is_err());
    }

    #[test]
    fn test_confirmed_image_before_confirmation_rejected() {
        let mut order = base_custom_order();
        order.record_status(OrderStatus::DepositPaid, 2_000, None);
        order.record_status(OrderStatus::Designing, 3_000, None);
        order.record_status(OrderStatus::DesignPendingConfirm, 4_000, None);
        order.custom_mut().unwrap().design_images = vec![image("a", true)];
        assert!(validate_order(&order).is_err());
    }

    #[test]
    fn test_logistics_required_when_shipped() {
        let mut order = base_custom_order();
        order.status_history.clear();
        order.record_status(OrderStatus::Shipped, 9_000, None);
        assert!(validate_order(&order).is_err());

        order.custom_mut().unwrap().logistics = Some(LogisticsInfo {
            courier: "SF Express".to_string(),
            tracking_number: "SF1234567890".to_string(),
            shipped_at: Some(9_000),
        });
        validate_order(&order).unwrap();
    }

    #[test]
    fn test_logistics_forbidden_before_shipping() {
        let mut order = base_custom_order();
        order.custom_mut().unwrap().logistics = Some(LogisticsInfo {
            courier: "SF Express".to_string(),
            tracking_number: "SF1234567890".to_string(),
            shipped_at: None,
        });
        assert!(validate_order(&order).is_err());
    }
}
