//! Full payroll composition.
//!
//! Chains the bracket evaluator and the margin calculator in statutory
//! order: social security, income tax (with social security as a
//! deduction), deductions and net pay, employer charges, consignable margin.

use rust_decimal::Decimal;

use crate::error::EngineResult;
use crate::models::{BracketTier, PayrollComputation, ResolvedParameters, check_tier_shape};

use super::consignable_margin::compute_consignable_margin;
use super::employer_charges::compute_employer_charges;
use super::income_tax::compute_progressive_income_tax;
use super::rounding::{check_monetary_bound, non_negative, round_money};
use super::social_security::compute_progressive_social_security;

/// Inputs for a payroll whose statutory bases differ from gross earnings.
///
/// Rubric incidence can leave some earnings outside the social-security or
/// income-tax base; this struct carries each base separately.
#[derive(Debug, Clone, Copy)]
pub struct PayrollInputs<'a> {
    /// Gross earnings.
    pub total_earnings: Decimal,
    /// Earnings subject to social security.
    pub social_security_base: Decimal,
    /// Earnings subject to income tax.
    pub income_tax_base: Decimal,
    /// Non-statutory deductions.
    pub other_deductions: Decimal,
    /// Number of income-tax dependents.
    pub dependent_count: u32,
    /// Social-security tier table.
    pub social_security_tiers: &'a [BracketTier],
    /// Income-tax tier table.
    pub income_tax_tiers: &'a [BracketTier],
    /// Resolved financial parameters.
    pub parameters: &'a ResolvedParameters,
}

/// Computes a full payroll where every earning is subject to both
/// social security and income tax.
///
/// Arithmetic edge cases (negative inputs, deductions above earnings) are
/// floored at zero rather than reported. A tier that is malformed in itself
/// is reported as `InvalidBracketTable`, and an amount whose magnitude
/// exceeds [`MAX_MONETARY_AMOUNT`](super::MAX_MONETARY_AMOUNT) as
/// `InvalidInput`.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_full_payroll;
/// use payroll_engine::models::{BracketTier, ResolvedParameters};
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// let ss = vec![
///     BracketTier::new(1, d("0"), Some(d("1000")), d("7.5")),
///     BracketTier::new(2, d("1000"), Some(d("3000")), d("9")),
///     BracketTier::new(3, d("3000"), Some(d("7000")), d("12")),
/// ];
/// let ir = vec![
///     BracketTier::new(1, d("0"), Some(d("3000")), d("0")),
///     BracketTier::new(2, d("3000"), Some(d("4700")), d("15")).with_deduction(d("300")),
/// ];
/// let parameters = ResolvedParameters {
///     social_security_ceiling: Some(d("7000")),
///     ..ResolvedParameters::default()
/// };
///
/// let payroll = compute_full_payroll(d("5000.00"), Decimal::ZERO, 0, &ss, &ir, &parameters)?;
/// assert_eq!(payroll.net_pay, d("4129.25"));
/// assert_eq!(payroll.consignable.margin, d("1445.24"));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
pub fn compute_full_payroll(
    total_earnings: Decimal,
    other_deductions: Decimal,
    dependent_count: u32,
    social_security_tiers: &[BracketTier],
    income_tax_tiers: &[BracketTier],
    parameters: &ResolvedParameters,
) -> EngineResult<PayrollComputation> {
    compute_full_payroll_with_bases(PayrollInputs {
        total_earnings,
        social_security_base: total_earnings,
        income_tax_base: total_earnings,
        other_deductions,
        dependent_count,
        social_security_tiers,
        income_tax_tiers,
        parameters,
    })
}

/// Computes a full payroll with separate social-security and income-tax
/// bases.
///
/// Employer charges are computed on the social-security base, independent
/// of the employee-side withholding chain. The consignable margin is
/// computed on net pay.
pub fn compute_full_payroll_with_bases(inputs: PayrollInputs<'_>) -> EngineResult<PayrollComputation> {
    check_tier_shape("social_security_tiers", inputs.social_security_tiers)?;
    check_tier_shape("income_tax_tiers", inputs.income_tax_tiers)?;
    check_monetary_bound("total_earnings", inputs.total_earnings)?;
    check_monetary_bound("other_deductions", inputs.other_deductions)?;
    check_monetary_bound("social_security_base", inputs.social_security_base)?;
    check_monetary_bound("income_tax_base", inputs.income_tax_base)?;

    let parameters = inputs.parameters;
    let total_earnings = round_money(non_negative(inputs.total_earnings));
    let other_deductions = round_money(non_negative(inputs.other_deductions));

    let social_security = compute_progressive_social_security(
        inputs.social_security_base,
        inputs.social_security_tiers,
        parameters.social_security_ceiling,
    );

    let income_tax = compute_progressive_income_tax(
        inputs.income_tax_base,
        social_security.total,
        inputs.dependent_count,
        inputs.income_tax_tiers,
        parameters.dependent_deduction,
    );

    let total_deductions = round_money(social_security.total + income_tax.tax + other_deductions);
    let net_pay = round_money(non_negative(total_earnings - total_deductions));

    let employer_charges = compute_employer_charges(inputs.social_security_base, parameters);
    let consignable = compute_consignable_margin(net_pay, parameters.consignable_margin_rate);

    Ok(PayrollComputation {
        total_earnings,
        other_deductions,
        total_deductions,
        net_pay,
        social_security,
        income_tax,
        employer_charges,
        consignable,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculation::MAX_MONETARY_AMOUNT;
    use crate::error::EngineError;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn social_security_tiers() -> Vec<BracketTier> {
        vec![
            BracketTier::new(1, dec("0"), Some(dec("1000")), dec("7.5")),
            BracketTier::new(2, dec("1000"), Some(dec("3000")), dec("9")),
            BracketTier::new(3, dec("3000"), Some(dec("7000")), dec("12")),
        ]
    }

    fn income_tax_tiers() -> Vec<BracketTier> {
        vec![
            BracketTier::new(1, dec("0"), Some(dec("2000")), dec("0")),
            BracketTier::new(2, dec("2000"), Some(dec("3000")), dec("7.5")).with_deduction(dec("150")),
            BracketTier::new(3, dec("3000"), Some(dec("4700")), dec("15")).with_deduction(dec("300")),
            BracketTier::new(4, dec("4700"), None, dec("27.5")).with_deduction(dec("887.50")),
        ]
    }

    fn parameters() -> ResolvedParameters {
        ResolvedParameters {
            social_security_ceiling: Some(dec("7000")),
            ..ResolvedParameters::default()
        }
    }

    /// FP-001: worked scenario end to end
    #[test]
    fn test_worked_scenario() {
        let payroll = compute_full_payroll(
            dec("5000.00"),
            Decimal::ZERO,
            0,
            &social_security_tiers(),
            &income_tax_tiers(),
            &parameters(),
        )
        .unwrap();

        assert_eq!(payroll.social_security.total, dec("495.00"));
        assert_eq!(payroll.income_tax.taxable_base, dec("4505.00"));
        assert_eq!(payroll.income_tax.tax, dec("375.75"));
        assert_eq!(payroll.total_deductions, dec("870.75"));
        assert_eq!(payroll.net_pay, dec("4129.25"));
        assert_eq!(payroll.consignable.base, dec("4129.25"));
        assert_eq!(payroll.consignable.margin, dec("1445.24"));
        assert_eq!(payroll.employer_charges.total, dec("1390.00"));
    }

    /// FP-002: zero inputs produce zero outputs
    #[test]
    fn test_zero_base_identity() {
        let payroll = compute_full_payroll(
            Decimal::ZERO,
            Decimal::ZERO,
            0,
            &social_security_tiers(),
            &income_tax_tiers(),
            &parameters(),
        )
        .unwrap();

        assert_eq!(payroll.net_pay, Decimal::ZERO);
        assert_eq!(payroll.social_security.total, Decimal::ZERO);
        assert_eq!(payroll.income_tax.tax, Decimal::ZERO);
        assert_eq!(payroll.employer_charges.total, Decimal::ZERO);
        assert_eq!(payroll.consignable.margin, Decimal::ZERO);
        assert_eq!(payroll.total_deductions, Decimal::ZERO);
    }

    #[test]
    fn test_other_deductions_reduce_net_pay_but_not_tax() {
        let payroll = compute_full_payroll(
            dec("5000.00"),
            dec("200.00"),
            0,
            &social_security_tiers(),
            &income_tax_tiers(),
            &parameters(),
        )
        .unwrap();

        assert_eq!(payroll.income_tax.tax, dec("375.75"));
        assert_eq!(payroll.total_deductions, dec("1070.75"));
        assert_eq!(payroll.net_pay, dec("3929.25"));
        // 3929.25 x 35% = 1375.2375
        assert_eq!(payroll.consignable.margin, dec("1375.24"));
    }

    #[test]
    fn test_deductions_above_earnings_floor_net_pay() {
        let payroll = compute_full_payroll(
            dec("1000.00"),
            dec("5000.00"),
            0,
            &social_security_tiers(),
            &income_tax_tiers(),
            &parameters(),
        )
        .unwrap();

        assert_eq!(payroll.net_pay, Decimal::ZERO);
        assert_eq!(payroll.consignable.margin, Decimal::ZERO);
    }

    #[test]
    fn test_negative_earnings_are_floored() {
        let payroll = compute_full_payroll(
            dec("-500.00"),
            Decimal::ZERO,
            0,
            &social_security_tiers(),
            &income_tax_tiers(),
            &parameters(),
        )
        .unwrap();

        assert_eq!(payroll.total_earnings, Decimal::ZERO);
        assert_eq!(payroll.net_pay, Decimal::ZERO);
    }

    #[test]
    fn test_separate_bases_follow_incidence() {
        let params = parameters();
        let ss = social_security_tiers();
        let ir = income_tax_tiers();
        // 450.00 meal allowance outside both bases
        let payroll = compute_full_payroll_with_bases(PayrollInputs {
            total_earnings: dec("5450.00"),
            social_security_base: dec("5000.00"),
            income_tax_base: dec("5000.00"),
            other_deductions: Decimal::ZERO,
            dependent_count: 0,
            social_security_tiers: &ss,
            income_tax_tiers: &ir,
            parameters: &params,
        })
        .unwrap();

        assert_eq!(payroll.social_security.total, dec("495.00"));
        assert_eq!(payroll.income_tax.tax, dec("375.75"));
        assert_eq!(payroll.net_pay, dec("4579.25"));
        assert_eq!(payroll.employer_charges.base, dec("5000.00"));
    }

    #[test]
    fn test_malformed_tier_is_rejected() {
        let broken = vec![BracketTier::new(1, dec("100"), Some(dec("50")), dec("7.5"))];
        let result = compute_full_payroll(
            dec("5000.00"),
            Decimal::ZERO,
            0,
            &broken,
            &income_tax_tiers(),
            &parameters(),
        );

        match result {
            Err(EngineError::InvalidBracketTable { table, .. }) => {
                assert_eq!(table, "social_security_tiers");
            }
            _ => panic!("Expected InvalidBracketTable error"),
        }
    }

    #[test]
    fn test_gappy_table_is_not_rejected_by_pure_composition() {
        let gappy = vec![
            BracketTier::new(1, dec("0"), Some(dec("1000")), dec("7.5")),
            BracketTier::new(2, dec("2000"), Some(dec("3000")), dec("9")),
        ];
        let payroll = compute_full_payroll(
            dec("2500.00"),
            Decimal::ZERO,
            0,
            &gappy,
            &income_tax_tiers(),
            &parameters(),
        )
        .unwrap();

        // 75.00 + 500 x 9% = 45.00; 1000..2000 is not covered
        assert_eq!(payroll.social_security.total, dec("120.00"));
    }

    #[test]
    fn test_amounts_beyond_max_are_rejected() {
        let huge = Decimal::MAX;
        let result = compute_full_payroll(
            huge,
            Decimal::ZERO,
            0,
            &social_security_tiers(),
            &income_tax_tiers(),
            &parameters(),
        );
        match result {
            Err(EngineError::InvalidInput { field, .. }) => assert_eq!(field, "total_earnings"),
            other => panic!("Expected InvalidInput, got {:?}", other),
        }

        let result = compute_full_payroll(
            dec("5000.00"),
            huge,
            0,
            &social_security_tiers(),
            &income_tax_tiers(),
            &parameters(),
        );
        assert_eq!(result.unwrap_err().field(), "other_deductions");
    }

    #[test]
    fn test_each_base_is_bounded_separately() {
        let ss = social_security_tiers();
        let ir = income_tax_tiers();
        let parameters = parameters();
        let inputs = PayrollInputs {
            total_earnings: dec("5000.00"),
            social_security_base: dec("5000.00"),
            income_tax_base: dec("5000.00"),
            other_deductions: Decimal::ZERO,
            dependent_count: 0,
            social_security_tiers: &ss,
            income_tax_tiers: &ir,
            parameters: &parameters,
        };

        let err = compute_full_payroll_with_bases(PayrollInputs {
            social_security_base: Decimal::MAX,
            ..inputs
        })
        .unwrap_err();
        assert_eq!(err.field(), "social_security_base");

        let err = compute_full_payroll_with_bases(PayrollInputs {
            income_tax_base: Decimal::MIN,
            ..inputs
        })
        .unwrap_err();
        assert_eq!(err.field(), "income_tax_base");
    }

    #[test]
    fn test_max_amount_itself_is_accepted() {
        let payroll = compute_full_payroll(
            MAX_MONETARY_AMOUNT,
            Decimal::ZERO,
            0,
            &social_security_tiers(),
            &income_tax_tiers(),
            &parameters(),
        )
        .unwrap();

        assert_eq!(payroll.total_earnings, dec("1000000000000.00"));
        assert_eq!(payroll.social_security.base, dec("7000.00"));
        assert!(payroll.net_pay > Decimal::ZERO);
    }
}
