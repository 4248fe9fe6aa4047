//! Progressive income-tax withholding.
//!
//! Unlike social security, income tax is not summed across tiers: the single
//! tier containing the taxable base is selected, and its precomputed amount
//! to subtract corrects for the lower tiers.

use rust_decimal::Decimal;

use crate::models::{BracketTier, IncomeTaxComputation};

use super::rounding::{non_negative, percent_of, round_money};

/// Selects the tier whose `[lower, upper]` range contains `base`.
///
/// When two contiguous tiers share a boundary value, the higher tier wins,
/// so a base exactly at a tier's lower bound belongs to that tier.
pub fn select_income_tax_tier(base: Decimal, tiers: &[BracketTier]) -> Option<&BracketTier> {
    tiers
        .iter()
        .filter(|tier| tier.contains(base))
        .max_by_key(|tier| tier.index)
}

/// Computes the income-tax withholding.
///
/// The taxable base is `gross_base − social_security − dependents ×
/// dependent_deduction`, rounded and floored at zero. If no tier contains
/// it, or the matched rate is zero, the worker is exempt (tier `0`).
/// Otherwise the tax is `max(0, base × rate − amount_to_subtract)` and the
/// effective rate is the tax as a percentage of the taxable base.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_progressive_income_tax;
/// use payroll_engine::models::BracketTier;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// let tiers = vec![
///     BracketTier::new(1, d("0"), Some(d("2000")), d("0")),
///     BracketTier::new(2, d("2000"), Some(d("3000")), d("7.5")).with_deduction(d("150")),
///     BracketTier::new(3, d("3000"), Some(d("4700")), d("15")).with_deduction(d("300")),
/// ];
///
/// let result = compute_progressive_income_tax(d("5000.00"), d("495.00"), 0, &tiers, d("189.59"));
/// assert_eq!(result.taxable_base, d("4505.00"));
/// assert_eq!(result.gross_tax, d("675.75"));
/// assert_eq!(result.tax, d("375.75"));
/// assert_eq!(result.tier, 3);
/// ```
pub fn compute_progressive_income_tax(
    gross_base: Decimal,
    social_security_withheld: Decimal,
    dependent_count: u32,
    tiers: &[BracketTier],
    per_dependent_deduction: Decimal,
) -> IncomeTaxComputation {
    let gross_base = round_money(non_negative(gross_base));
    let social_security_deduction = round_money(non_negative(social_security_withheld));
    let dependent_deduction =
        round_money(Decimal::from(dependent_count) * non_negative(per_dependent_deduction));
    let taxable_base =
        round_money(non_negative(gross_base - social_security_deduction - dependent_deduction));

    let exempt = IncomeTaxComputation {
        gross_base,
        social_security_deduction,
        dependent_deduction,
        taxable_base,
        gross_tax: round_money(Decimal::ZERO),
        amount_subtracted: round_money(Decimal::ZERO),
        tax: round_money(Decimal::ZERO),
        effective_rate: round_money(Decimal::ZERO),
        tier: 0,
    };

    let Some(tier) = select_income_tax_tier(taxable_base, tiers) else {
        return exempt;
    };
    if tier.rate.is_zero() {
        return exempt;
    }

    let gross_tax = percent_of(taxable_base, tier.rate);
    let amount_subtracted = round_money(tier.deduction);
    let tax = round_money(non_negative(gross_tax.saturating_sub(amount_subtracted)));
    let effective_rate = if taxable_base.is_zero() {
        round_money(Decimal::ZERO)
    } else {
        round_money(tax / taxable_base * Decimal::ONE_HUNDRED)
    };

    IncomeTaxComputation {
        gross_base,
        social_security_deduction,
        dependent_deduction,
        taxable_base,
        gross_tax,
        amount_subtracted,
        tax,
        effective_rate,
        tier: tier.index,
    }
}
