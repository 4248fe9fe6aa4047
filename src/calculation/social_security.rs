//! Progressive social-security withholding.
//!
//! Each tier of the table taxes the slice of the (capped) base that lies
//! strictly above its lower bound and at or below its upper bound, and the
//! tier values are summed.

use rust_decimal::Decimal;

use crate::models::{BracketTier, SocialSecurityComputation, TierContribution};

use super::rounding::{non_negative, percent_of, round_money};

/// Computes the progressive social-security withholding.
///
/// The base is `min(gross_base, ceiling)` when a ceiling is given, floored
/// at zero. Tiers are evaluated in ascending index order; each tier value is
/// rounded to two decimals before summing. Only tiers that taxed a non-zero
/// slice appear in the breakdown.
///
/// The table is trusted as given: a table that does not cover the whole
/// base simply withholds nothing for the uncovered part.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_progressive_social_security;
/// use payroll_engine::models::BracketTier;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let d = |s: &str| Decimal::from_str(s).unwrap();
/// let tiers = vec![
///     BracketTier::new(1, d("0"), Some(d("1000")), d("7.5")),
///     BracketTier::new(2, d("1000"), Some(d("3000")), d("9")),
///     BracketTier::new(3, d("3000"), Some(d("7000")), d("12")),
/// ];
///
/// let result = compute_progressive_social_security(d("5000.00"), &tiers, Some(d("7000")));
/// assert_eq!(result.total, d("495.00"));
/// assert_eq!(result.tiers.len(), 3);
/// ```
pub fn compute_progressive_social_security(
    gross_base: Decimal,
    tiers: &[BracketTier],
    ceiling: Option<Decimal>,
) -> SocialSecurityComputation {
    let capped = match ceiling {
        Some(ceiling) if ceiling < gross_base => ceiling,
        _ => gross_base,
    };
    let base = round_money(non_negative(capped));

    if base.is_zero() {
        return SocialSecurityComputation::zero();
    }

    let mut ordered: Vec<&BracketTier> = tiers.iter().collect();
    ordered.sort_by_key(|tier| tier.index);

    let contributions: Vec<TierContribution> = ordered
        .into_iter()
        .filter_map(|tier| {
            let taxed_amount = tier.slice_of(base);
            if taxed_amount <= Decimal::ZERO {
                return None;
            }
            Some(TierContribution {
                index: tier.index,
                taxed_amount: round_money(taxed_amount),
                rate: tier.rate,
                value: percent_of(taxed_amount, tier.rate),
            })
        })
        .collect();

    let total = round_money(contributions.iter().map(|c| c.value).sum());

    SocialSecurityComputation {
        base,
        total,
        tiers: contributions,
    }
}
