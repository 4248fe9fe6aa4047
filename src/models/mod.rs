//! Core data models for the Payroll Calculation Engine.
//!
//! This module contains all the domain models used throughout the engine.

mod bracket;
mod calculation_log;
mod calculation_result;
mod parameters;
mod rubric;
mod worker;

pub use bracket::{BracketTier, MAX_TIER_GAP, check_tier_shape, validate_bracket_table};
pub use calculation_log::{CalculationLog, CalculationLogEntry, LogEntryKind};
pub use calculation_result::{
    CalculationResult, ConsignableMargin, EmployerCharges, IncomeTaxComputation,
    PayrollComputation, PayslipLine, SocialSecurityComputation, TierContribution,
};
pub use parameters::{
    DEFAULT_CONSIGNABLE_MARGIN_RATE, DEFAULT_DEPENDENT_DEDUCTION,
    DEFAULT_EMPLOYER_OTHER_ENTITIES_RATE, DEFAULT_EMPLOYER_RISK_INSURANCE_RATE,
    DEFAULT_EMPLOYER_SOCIAL_SECURITY_RATE, DEFAULT_MINIMUM_WAGE, FinancialParameters,
    ResolvedParameters,
};
pub use rubric::{
    Incidence, PercentageBase, ResolvedRubric, Rubric, RubricKind, RubricSource, RubricValue,
};
pub use worker::{CompetencyPeriod, WorkerContext};
