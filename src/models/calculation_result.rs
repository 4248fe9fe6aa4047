//! Calculation result models for the Payroll Calculation Engine.
//!
//! This module contains the [`CalculationResult`] type and the structures
//! produced by each stage of a payroll computation: the social-security
//! breakdown, the income-tax computation, employer charges and the
//! consignable margin.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{CalculationLogEntry, CompetencyPeriod, RubricKind, RubricSource};

/// One tier's share of a progressive social-security withholding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierContribution {
    /// The tier index.
    pub index: u32,
    /// The portion of the base that fell within the tier.
    pub taxed_amount: Decimal,
    /// The tier rate as a percentage.
    pub rate: Decimal,
    /// The withheld value for the tier, rounded to two decimals.
    pub value: Decimal,
}

/// The itemized social-security withholding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SocialSecurityComputation {
    /// The calculation base after applying the ceiling.
    pub base: Decimal,
    /// The total withheld.
    pub total: Decimal,
    /// Contributions of each tier that taxed a non-zero amount.
    pub tiers: Vec<TierContribution>,
}

impl SocialSecurityComputation {
    /// A computation on a zero base that withholds nothing.
    ///
    /// Amounts carry two decimal places like every other computed amount.
    pub fn zero() -> Self {
        Self {
            base: Decimal::new(0, 2),
            total: Decimal::new(0, 2),
            tiers: Vec::new(),
        }
    }
}

/// The income-tax withholding and how it was derived.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncomeTaxComputation {
    /// The gross amount subject to income tax.
    pub gross_base: Decimal,
    /// Social-security withholding deducted from the base.
    pub social_security_deduction: Decimal,
    /// Total dependent deduction applied.
    pub dependent_deduction: Decimal,
    /// The base after deductions, floored at zero.
    pub taxable_base: Decimal,
    /// The base multiplied by the matched tier rate.
    pub gross_tax: Decimal,
    /// The matched tier's amount to subtract.
    pub amount_subtracted: Decimal,
    /// The tax withheld.
    pub tax: Decimal,
    /// Tax as a percentage of the taxable base, rounded to two decimals.
    ///
    /// Expressed in percent, not as a fraction: `8.34` means 8.34% of the
    /// taxable base.
    pub effective_rate: Decimal,
    /// The matched tier index; `0` means exempt.
    pub tier: u32,
}

impl IncomeTaxComputation {
    /// Returns true if no tax is due.
    pub fn is_exempt(&self) -> bool {
        self.tier == 0
    }
}

/// Employer-side payroll charges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployerCharges {
    /// The base the charges were applied to.
    pub base: Decimal,
    /// Employer social-security charge.
    pub social_security: Decimal,
    /// Risk-insurance charge.
    pub risk_insurance: Decimal,
    /// Contributions to payroll-linked third-party entities.
    pub other_entities: Decimal,
    /// Sum of the three charges.
    pub total: Decimal,
}

/// The share of net pay that may be pledged against payroll loans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsignableMargin {
    /// The net pay the margin is computed from.
    pub base: Decimal,
    /// The percentage applied.
    pub rate: Decimal,
    /// The pledgeable amount, rounded to two decimals.
    pub margin: Decimal,
}

/// The aggregate output of a full payroll computation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayrollComputation {
    /// Gross earnings.
    pub total_earnings: Decimal,
    /// Non-statutory deductions.
    pub other_deductions: Decimal,
    /// Social security, income tax and other deductions.
    pub total_deductions: Decimal,
    /// Earnings minus deductions, floored at zero.
    pub net_pay: Decimal,
    /// Social-security withholding.
    pub social_security: SocialSecurityComputation,
    /// Income-tax withholding.
    pub income_tax: IncomeTaxComputation,
    /// Employer-side charges.
    pub employer_charges: EmployerCharges,
    /// Consignable margin on net pay.
    pub consignable: ConsignableMargin,
}

/// One itemized line of the payslip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayslipLine {
    /// Rubric code, or `base_salary`.
    pub code: String,
    /// Payslip label.
    pub label: String,
    /// Earning or deduction.
    pub kind: RubricKind,
    /// The line amount.
    pub amount: Decimal,
    /// Counted toward the social-security base.
    pub social_security: bool,
    /// Counted toward the income-tax base.
    pub income_tax: bool,
    /// Where the definition came from.
    pub source: RubricSource,
}

/// The complete, immutable result of a payroll calculation.
///
/// Produced once per worker and competency period. Fields are only
/// readable; a recalculation creates a new result with a new id.
///
/// # Example
///
/// ```
/// use payroll_engine::calculation::compute_full_payroll;
/// use payroll_engine::models::{CalculationResult, CompetencyPeriod, ResolvedParameters};
/// use rust_decimal::Decimal;
///
/// let payroll = compute_full_payroll(
///     Decimal::ZERO, Decimal::ZERO, 0, &[], &[], &ResolvedParameters::default(),
/// ).unwrap();
/// let result = CalculationResult::new(
///     "w-001", CompetencyPeriod::new(2025, 1).unwrap(), vec![], payroll, vec![],
/// );
/// assert_eq!(result.worker_id(), "w-001");
/// assert_eq!(result.payroll().net_pay, Decimal::ZERO);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    calculation_id: Uuid,
    timestamp: DateTime<Utc>,
    engine_version: String,
    worker_id: String,
    competency_period: CompetencyPeriod,
    lines: Vec<PayslipLine>,
    payroll: PayrollComputation,
    calculation_log: Vec<CalculationLogEntry>,
}

impl CalculationResult {
    /// Creates a new result with a fresh id and the current timestamp.
    pub fn new(
        worker_id: impl Into<String>,
        competency_period: CompetencyPeriod,
        lines: Vec<PayslipLine>,
        payroll: PayrollComputation,
        calculation_log: Vec<CalculationLogEntry>,
    ) -> Self {
        Self {
            calculation_id: Uuid::new_v4(),
            timestamp: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            worker_id: worker_id.into(),
            competency_period,
            lines,
            payroll,
            calculation_log,
        }
    }

    /// Unique identifier for this calculation.
    pub fn calculation_id(&self) -> Uuid {
        self.calculation_id
    }

    /// When the calculation was performed.
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// The version of the engine that performed the calculation.
    pub fn engine_version(&self) -> &str {
        &self.engine_version
    }

    /// The worker the calculation is for.
    pub fn worker_id(&self) -> &str {
        &self.worker_id
    }

    /// The competency period the calculation pertains to.
    pub fn competency_period(&self) -> CompetencyPeriod {
        self.competency_period
    }

    /// Itemized payslip lines.
    pub fn lines(&self) -> &[PayslipLine] {
        &self.lines
    }

    /// The payroll figures.
    pub fn payroll(&self) -> &PayrollComputation {
        &self.payroll
    }

    /// Resolution decisions recorded during the calculation.
    pub fn calculation_log(&self) -> &[CalculationLogEntry] {
        &self.calculation_log
    }

    /// Net pay after all deductions.
    pub fn net_pay(&self) -> Decimal {
        self.payroll.net_pay
    }
}
