//! Statutory bases derived from resolved rubrics.

use rust_decimal::Decimal;

use crate::calculation::round_money;
use crate::error::{EngineError, EngineResult};
use crate::models::{ResolvedRubric, RubricKind};

/// Earnings and deduction totals split by statutory incidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncidenceBases {
    /// Base salary plus every earning rubric.
    pub total_earnings: Decimal,
    /// Sum of deduction rubrics.
    pub rubric_deductions: Decimal,
    /// Amount subject to social security.
    pub social_security_base: Decimal,
    /// Amount subject to income tax.
    pub income_tax_base: Decimal,
}

impl IncidenceBases {
    /// Computes the bases for a base salary and its resolved rubrics.
    ///
    /// The base salary is always subject to both. An earning with incidence
    /// adds to a base and a deduction with incidence subtracts from it.
    /// Bases never go below zero. A sum that overflows is reported as
    /// `InvalidInput` on the total it belongs to.
    pub fn from_rubrics(base_salary: Decimal, rubrics: &[ResolvedRubric]) -> EngineResult<Self> {
        let mut total_earnings = base_salary;
        let mut rubric_deductions = Decimal::ZERO;
        let mut social_security_base = base_salary;
        let mut income_tax_base = base_salary;

        for resolved in rubrics {
            match resolved.rubric.kind {
                RubricKind::Earning => {
                    total_earnings = accumulate("total_earnings", total_earnings, resolved.amount)?
                }
                RubricKind::Deduction => {
                    rubric_deductions =
                        accumulate("other_deductions", rubric_deductions, resolved.amount)?
                }
            }
            let incidence = resolved.rubric.incidence;
            if incidence.social_security {
                social_security_base = accumulate(
                    "social_security_base",
                    social_security_base,
                    resolved.signed_amount(),
                )?;
            }
            if incidence.income_tax {
                income_tax_base =
                    accumulate("income_tax_base", income_tax_base, resolved.signed_amount())?;
            }
        }

        Ok(Self {
            total_earnings: round_money(total_earnings),
            rubric_deductions: round_money(rubric_deductions),
            social_security_base: round_money(social_security_base.max(Decimal::ZERO)),
            income_tax_base: round_money(income_tax_base.max(Decimal::ZERO)),
        })
    }
}

fn accumulate(field: &str, total: Decimal, amount: Decimal) -> EngineResult<Decimal> {
    total.checked_add(amount).ok_or_else(|| {
        EngineError::invalid_input(field, format!("adding {} to {} overflows", amount, total))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::models::{Incidence, Rubric, RubricSource, RubricValue};
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn resolved(code: &str, kind: RubricKind, incidence: Incidence, amount: &str) -> ResolvedRubric {
        ResolvedRubric {
            rubric: Rubric {
                code: code.to_string(),
                label: code.to_string(),
                kind,
                incidence,
                value: RubricValue::Supplied,
                source: RubricSource::Configured,
            },
            amount: dec(amount),
        }
    }

    #[test]
    fn test_base_salary_alone_is_subject_to_both() {
        let bases = IncidenceBases::from_rubrics(dec("3000.00"), &[]).unwrap();
        assert_eq!(bases.total_earnings, dec("3000.00"));
        assert_eq!(bases.social_security_base, dec("3000.00"));
        assert_eq!(bases.income_tax_base, dec("3000.00"));
        assert_eq!(bases.rubric_deductions, Decimal::ZERO);
    }

    #[test]
    fn test_incidence_controls_each_base() {
        let rubrics = vec![
            resolved("night_shift_premium", RubricKind::Earning, Incidence::BOTH, "600.00"),
            resolved("meal_allowance", RubricKind::Earning, Incidence::NONE, "450.00"),
            resolved(
                "training_grant",
                RubricKind::Earning,
                Incidence {
                    social_security: false,
                    income_tax: true,
                },
                "100.00",
            ),
        ];
        let bases = IncidenceBases::from_rubrics(dec("3000.00"), &rubrics).unwrap();

        assert_eq!(bases.total_earnings, dec("4150.00"));
        assert_eq!(bases.social_security_base, dec("3600.00"));
        assert_eq!(bases.income_tax_base, dec("3700.00"));
    }

    #[test]
    fn test_deduction_with_incidence_reduces_base() {
        let rubrics = vec![
            resolved("absence", RubricKind::Deduction, Incidence::BOTH, "200.00"),
            resolved("union_dues", RubricKind::Deduction, Incidence::NONE, "30.00"),
        ];
        let bases = IncidenceBases::from_rubrics(dec("3000.00"), &rubrics).unwrap();

        assert_eq!(bases.total_earnings, dec("3000.00"));
        assert_eq!(bases.rubric_deductions, dec("230.00"));
        assert_eq!(bases.social_security_base, dec("2800.00"));
        assert_eq!(bases.income_tax_base, dec("2800.00"));
    }

    #[test]
    fn test_bases_are_floored_at_zero() {
        let rubrics = vec![resolved("absence", RubricKind::Deduction, Incidence::BOTH, "5000.00")];
        let bases = IncidenceBases::from_rubrics(dec("1000.00"), &rubrics).unwrap();

        assert_eq!(bases.social_security_base, Decimal::ZERO);
        assert_eq!(bases.income_tax_base, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_sum_is_an_error() {
        let rubrics = vec![
            resolved("hazard_pay", RubricKind::Earning, Incidence::NONE, "1.00"),
            resolved("union_dues", RubricKind::Deduction, Incidence::NONE, "1.00"),
        ];
        let err = IncidenceBases::from_rubrics(Decimal::MAX, &rubrics).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(err.field(), "total_earnings");
    }

    #[test]
    fn test_overflowing_deductions_name_the_deduction_total() {
        let huge = "79228162514264337593543950335";
        let rubrics = vec![
            resolved("absence", RubricKind::Deduction, Incidence::NONE, huge),
            resolved("union_dues", RubricKind::Deduction, Incidence::NONE, huge),
        ];
        let err = IncidenceBases::from_rubrics(dec("3000.00"), &rubrics).unwrap_err();

        assert_eq!(err.field(), "other_deductions");
    }
}
