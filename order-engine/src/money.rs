//! Money calculation utilities using rust_decimal for precision
//!
//! Amounts are stored as i64 in the smallest currency unit. The only real
//! arithmetic in the model is the deposit/final split for custom orders,
//! done in `Decimal` to keep the rounding convention explicit.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use shared::{OrderError, OrderResult};

/// Deposit share of a custom order's total (30%)
const DEPOSIT_RATE: Decimal = Decimal::from_parts(30, 0, 0, false, 2);

/// Maximum allowed order amount (smallest currency unit)
pub const MAX_AMOUNT: i64 = 1_000_000_000;

/// Validate an order amount: positive, within bounds
pub fn validate_amount(amount: i64) -> OrderResult<()> {
    if amount <= 0 {
        return Err(OrderError::invariant(format!(
            "amount must be positive, got {amount}"
        )));
    }
    if amount > MAX_AMOUNT {
        return Err(OrderError::invariant(format!(
            "amount exceeds maximum allowed ({MAX_AMOUNT}), got {amount}"
        )));
    }
    Ok(())
}

/// Split a custom order total into (deposit, final)
///
/// Deposit is 30% of the total, rounded half-up to a whole currency unit;
/// the final amount is the remainder, so deposit + final == total always
/// holds exactly.
pub fn split_deposit(total: i64) -> OrderResult<(i64, i64)> {
    validate_amount(total)?;
    let deposit = (Decimal::from(total) * DEPOSIT_RATE)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(|| OrderError::invariant("deposit amount out of range"))?;
    Ok((deposit, total - deposit))
}
