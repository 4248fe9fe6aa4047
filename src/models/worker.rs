//! Worker context and competency period models.
//!
//! This module defines the [`CompetencyPeriod`] a calculation pertains to and
//! the [`WorkerContext`] supplied by the caller for one worker.

use std::collections::BTreeMap;
use std::fmt;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// The calendar month a payroll calculation pertains to.
///
/// # Example
///
/// ```
/// use payroll_engine::models::CompetencyPeriod;
/// use chrono::NaiveDate;
///
/// let period = CompetencyPeriod::new(2025, 3).unwrap();
/// assert_eq!(period.to_string(), "2025-03");
/// assert_eq!(period.first_day(), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
/// assert!(CompetencyPeriod::new(2025, 13).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawCompetencyPeriod")]
pub struct CompetencyPeriod {
    year: i32,
    month: u32,
}

#[derive(Deserialize)]
struct RawCompetencyPeriod {
    year: i32,
    month: u32,
}

impl TryFrom<RawCompetencyPeriod> for CompetencyPeriod {
    type Error = EngineError;

    fn try_from(raw: RawCompetencyPeriod) -> EngineResult<Self> {
        CompetencyPeriod::new(raw.year, raw.month)
    }
}

impl CompetencyPeriod {
    /// Creates a competency period, rejecting months outside `1..=12`.
    pub fn new(year: i32, month: u32) -> EngineResult<Self> {
        if NaiveDate::from_ymd_opt(year, month, 1).is_none() {
            return Err(EngineError::invalid_input(
                "competency_period",
                format!("{}-{} is not a valid calendar month", year, month),
            ));
        }
        Ok(Self { year, month })
    }

    /// The calendar year.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The calendar month (1-12).
    pub fn month(&self) -> u32 {
        self.month
    }

    /// The first day of the month, used for effective-date selection.
    pub fn first_day(&self) -> NaiveDate {
        // month validated in `new`
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }
}

impl fmt::Display for CompetencyPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Inputs for one worker in one competency period.
///
/// Identity numbers are optional; when present they are validated before a
/// run proceeds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerContext {
    /// Unique identifier for the worker.
    pub worker_id: String,
    /// National identity number (11 digits, punctuation allowed).
    #[serde(default)]
    pub national_id: Option<String>,
    /// Social insurance number (11 digits, punctuation allowed).
    #[serde(default)]
    pub social_insurance_number: Option<String>,
    /// Category used to match scoped rubric configuration.
    #[serde(default)]
    pub category: Option<String>,
    /// Monthly base salary.
    pub base_salary: Decimal,
    /// Number of income-tax dependents.
    #[serde(default)]
    pub dependent_count: u32,
    /// Deductions not modelled as rubrics (e.g. court-ordered payments).
    #[serde(default)]
    pub other_deductions: Decimal,
    /// Codes of the rubrics assigned to the worker, in payslip order.
    #[serde(default)]
    pub rubrics: Vec<String>,
    /// Amounts for rubrics whose value is supplied per worker.
    #[serde(default)]
    pub supplied_values: BTreeMap<String, Decimal>,
}

impl WorkerContext {
    /// Creates a context with only a base salary.
    pub fn new(worker_id: impl Into<String>, base_salary: Decimal) -> Self {
        Self {
            worker_id: worker_id.into(),
            national_id: None,
            social_insurance_number: None,
            category: None,
            base_salary,
            dependent_count: 0,
            other_deductions: Decimal::ZERO,
            rubrics: Vec::new(),
            supplied_values: BTreeMap::new(),
        }
    }

    /// Assigns a rubric to the worker.
    pub fn with_rubric(mut self, code: impl Into<String>) -> Self {
        self.rubrics.push(code.into());
        self
    }

    /// Assigns a rubric whose amount is supplied per worker.
    pub fn with_supplied_rubric(mut self, code: impl Into<String>, amount: Decimal) -> Self {
        let code = code.into();
        self.supplied_values.insert(code.clone(), amount);
        self.rubrics.push(code);
        self
    }

    /// Sets the number of income-tax dependents.
    pub fn with_dependents(mut self, dependent_count: u32) -> Self {
        self.dependent_count = dependent_count;
        self
    }

    /// Sets the worker category.
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }
}
