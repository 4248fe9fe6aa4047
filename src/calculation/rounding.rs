//! Monetary rounding helpers.
//!
//! Every stage of a payroll computation rounds its monetary outputs to the
//! currency's minor unit before the next stage consumes them.

use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{EngineError, EngineResult};

const HUNDRED: Decimal = Decimal::ONE_HUNDRED;

/// Largest monetary magnitude accepted by the engine (one trillion).
///
/// Runs reject inputs above it; the pure calculators clamp to it.
pub const MAX_MONETARY_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 round away from zero.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::round_money;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// assert_eq!(round_money(Decimal::from_str("1445.2375").unwrap()).to_string(), "1445.24");
/// assert_eq!(round_money(Decimal::from_str("495").unwrap()).to_string(), "495.00");
/// ```
pub fn round_money(value: Decimal) -> Decimal {
    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Applies a percentage rate to an amount and rounds the result.
///
/// The result is clamped to `±MAX_MONETARY_AMOUNT`, so an out-of-range
/// amount or rate saturates instead of overflowing.
pub fn percent_of(amount: Decimal, rate: Decimal) -> Decimal {
    let scaled = match amount.checked_mul(rate) {
        Some(product) => product / HUNDRED,
        None if amount.is_sign_negative() != rate.is_sign_negative() => -MAX_MONETARY_AMOUNT,
        None => MAX_MONETARY_AMOUNT,
    };
    round_money(scaled.clamp(-MAX_MONETARY_AMOUNT, MAX_MONETARY_AMOUNT))
}

/// Floors a value at zero and caps it at [`MAX_MONETARY_AMOUNT`].
pub(crate) fn non_negative(value: Decimal) -> Decimal {
    value.clamp(Decimal::ZERO, MAX_MONETARY_AMOUNT)
}

/// Rejects an amount whose magnitude exceeds [`MAX_MONETARY_AMOUNT`].
pub(crate) fn check_monetary_bound(field: &str, value: Decimal) -> EngineResult<()> {
    if value.abs() > MAX_MONETARY_AMOUNT {
        return Err(EngineError::invalid_input(
            field,
            format!("amount {} exceeds the supported maximum {}", value, MAX_MONETARY_AMOUNT),
        ));
    }
    Ok(())
}
