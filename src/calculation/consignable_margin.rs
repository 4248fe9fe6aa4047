//! Consignable margin calculation.
//!
//! The consignable margin is the share of net pay that may be pledged
//! against payroll-deductible loans.

use rust_decimal::Decimal;

use crate::models::ConsignableMargin;

use super::rounding::{percent_of, round_money};

/// Computes the consignable margin on net pay.
///
/// The percentage is expected to be within `0..=100`; this is a caller
/// contract and is not enforced here. Use
/// [`DEFAULT_CONSIGNABLE_MARGIN_RATE`](crate::models::DEFAULT_CONSIGNABLE_MARGIN_RATE)
/// when no rate is configured.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_consignable_margin;
/// use payroll_engine::models::DEFAULT_CONSIGNABLE_MARGIN_RATE;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let net = Decimal::from_str("4129.25").unwrap();
/// let result = compute_consignable_margin(net, DEFAULT_CONSIGNABLE_MARGIN_RATE);
/// assert_eq!(result.margin.to_string(), "1445.24");
/// ```
pub fn compute_consignable_margin(net_pay: Decimal, percentage: Decimal) -> ConsignableMargin {
    ConsignableMargin {
        base: round_money(net_pay),
        rate: percentage,
        margin: percent_of(net_pay, percentage),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_margin_rounds_half_up() {
        let result = compute_consignable_margin(dec("4129.25"), dec("35"));

        assert_eq!(result.base, dec("4129.25"));
        assert_eq!(result.rate, dec("35"));
        assert_eq!(result.margin, dec("1445.24"));
    }

    #[test]
    fn test_margin_on_zero_net_pay() {
        let result = compute_consignable_margin(Decimal::ZERO, dec("35"));

        assert_eq!(result.margin, Decimal::ZERO);
    }

    #[test]
    fn test_other_percentages() {
        assert_eq!(compute_consignable_margin(dec("1000.00"), dec("30")).margin, dec("300.00"));
        assert_eq!(compute_consignable_margin(dec("1000.00"), dec("0")).margin, Decimal::ZERO);
        assert_eq!(compute_consignable_margin(dec("1000.00"), dec("100")).margin, dec("1000.00"));
    }

    #[test]
    fn test_percentage_is_not_clamped() {
        let result = compute_consignable_margin(dec("100.00"), dec("150"));

        assert_eq!(result.margin, dec("150.00"));
    }
}
