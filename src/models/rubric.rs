//! Rubric (earning/deduction line item) models.
//!
//! A rubric is one named line on a payslip. Its definition comes either
//! from a live configuration record or from the legacy rubric table, and
//! the [`RubricSource`] tag records which.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Whether a rubric adds to or subtracts from pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricKind {
    /// Adds to gross earnings.
    Earning,
    /// Deducted from pay.
    Deduction,
}

/// Which statutory calculation bases a rubric counts toward.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Incidence {
    /// Counts toward the social-security base.
    #[serde(default)]
    pub social_security: bool,
    /// Counts toward the income-tax base.
    #[serde(default)]
    pub income_tax: bool,
}

impl Incidence {
    /// Subject to both social security and income tax.
    pub const BOTH: Incidence = Incidence {
        social_security: true,
        income_tax: true,
    };

    /// Subject to neither base.
    pub const NONE: Incidence = Incidence {
        social_security: false,
        income_tax: false,
    };
}

/// The amount a percentage rubric is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PercentageBase {
    /// The worker's base salary.
    BaseSalary,
    /// The resolved minimum wage parameter.
    MinimumWage,
}

/// How a rubric's monetary amount is determined.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RubricValue {
    /// A fixed amount.
    Fixed {
        /// The amount.
        amount: Decimal,
    },
    /// A percentage of a base amount.
    Percentage {
        /// The rate as a percentage.
        rate: Decimal,
        /// The amount the rate applies to.
        base: PercentageBase,
    },
    /// An amount supplied per worker by the caller.
    Supplied,
}

/// Where a rubric definition came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RubricSource {
    /// An active configuration record.
    Configured,
    /// The embedded legacy rubric table.
    LegacyFallback,
}

/// A rubric definition tagged with its source.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{Incidence, Rubric, RubricKind, RubricSource, RubricValue};
/// use rust_decimal::Decimal;
///
/// let rubric = Rubric {
///     code: "meal_allowance".to_string(),
///     label: "Meal allowance".to_string(),
///     kind: RubricKind::Earning,
///     incidence: Incidence::NONE,
///     value: RubricValue::Fixed { amount: Decimal::new(45000, 2) },
///     source: RubricSource::Configured,
/// };
/// assert!(rubric.is_earning());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rubric {
    /// Stable identifier.
    pub code: String,
    /// Payslip label.
    pub label: String,
    /// Earning or deduction.
    pub kind: RubricKind,
    /// Statutory bases the rubric counts toward.
    pub incidence: Incidence,
    /// Amount resolution rule.
    pub value: RubricValue,
    /// Configuration or legacy provenance.
    pub source: RubricSource,
}

impl Rubric {
    /// Returns true if the rubric adds to gross earnings.
    pub fn is_earning(&self) -> bool {
        self.kind == RubricKind::Earning
    }
}

/// A rubric together with its resolved amount for one worker and period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedRubric {
    /// The rubric definition used.
    pub rubric: Rubric,
    /// The resolved amount, rounded to two decimals.
    pub amount: Decimal,
}

impl ResolvedRubric {
    /// The amount as it affects a statutory base: positive for earnings,
    /// negative for deductions.
    pub fn signed_amount(&self) -> Decimal {
        match self.rubric.kind {
            RubricKind::Earning => self.amount,
            RubricKind::Deduction => -self.amount,
        }
    }
}
