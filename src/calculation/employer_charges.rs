//! Employer-side payroll charges.

use rust_decimal::Decimal;

use crate::models::{EmployerCharges, ResolvedParameters};

use super::rounding::{non_negative, percent_of, round_money};

/// Computes the employer social-security, risk-insurance and other-entities
/// charges.
///
/// The charge base is `min(gross_base, ceiling)`, or the gross base when no
/// ceiling is configured, clamped to `[0, MAX_MONETARY_AMOUNT]`. Each component is rounded before the total is
/// summed. Rates come from `parameters`, whose defaults (20%, 2% and 5.8%)
/// were applied when they were resolved.
///
/// # Examples
///
/// ```
/// use payroll_engine::calculation::compute_employer_charges;
/// use payroll_engine::models::ResolvedParameters;
/// use rust_decimal::Decimal;
///
/// let charges = compute_employer_charges(Decimal::from(5000), &ResolvedParameters::default());
/// assert_eq!(charges.social_security, Decimal::from(1000));
/// assert_eq!(charges.total, Decimal::from(1390));
/// ```
pub fn compute_employer_charges(
    gross_base: Decimal,
    parameters: &ResolvedParameters,
) -> EmployerCharges {
    let capped = match parameters.social_security_ceiling {
        Some(ceiling) if ceiling < gross_base => ceiling,
        _ => gross_base,
    };
    let base = round_money(non_negative(capped));

    let social_security = percent_of(base, parameters.employer_social_security_rate);
    let risk_insurance = percent_of(base, parameters.employer_risk_insurance_rate);
    let other_entities = percent_of(base, parameters.employer_other_entities_rate);
    let total = round_money(social_security + risk_insurance + other_entities);

    EmployerCharges {
        base,
        social_security,
        risk_insurance,
        other_entities,
        total,
    }
}
