//! Rubric resolution for one worker and competency period.
//!
//! Resolution prefers an active, enabled configuration record and falls
//! back to the legacy table otherwise. Every fallback is recorded in the
//! calculation log so the provenance of each figure can be audited.

use std::cmp::Reverse;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::calculation::{check_monetary_bound, percent_of, round_money};
use crate::config::{ConfigurationSnapshot, RubricConfig};
use crate::error::{EngineError, EngineResult};
use crate::models::{
    CalculationLog, CalculationLogEntry, CompetencyPeriod, LogEntryKind, PercentageBase,
    ResolvedRubric, Rubric, RubricValue, WorkerContext,
};

use super::legacy::LegacyRubricTable;

/// Outcome of looking a rubric up in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RecordLookup<'a> {
    /// An active, enabled record applies.
    Active(&'a RubricConfig),
    /// The applicable record is disabled.
    Disabled,
    /// No record is active for the worker and period.
    Absent,
}

/// Resolves the rubrics assigned to a worker.
///
/// A resolver is built per run from that run's configuration snapshot and
/// the injected legacy table. It holds no mutable state.
///
/// # Example
///
/// ```
/// use payroll_engine::config::ConfigurationSnapshot;
/// use payroll_engine::models::{CompetencyPeriod, RubricSource, WorkerContext};
/// use payroll_engine::rules::{LegacyRubricTable, RuleResolver};
/// use rust_decimal::Decimal;
///
/// let legacy = LegacyRubricTable::builtin()?;
/// let snapshot = ConfigurationSnapshot::default();
/// let resolver = RuleResolver::new(&snapshot, &legacy);
///
/// let worker = WorkerContext::new("w-001", Decimal::from(3000)).with_rubric("night_shift_premium");
/// let (rubrics, log) =
///     resolver.resolve_rubrics_for_worker(CompetencyPeriod::new(2025, 3)?, &worker)?;
///
/// assert_eq!(rubrics[0].rubric.source, RubricSource::LegacyFallback);
/// assert_eq!(rubrics[0].amount, Decimal::from(600));
/// assert_eq!(log.len(), 1);
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RuleResolver<'a> {
    snapshot: &'a ConfigurationSnapshot,
    legacy: &'a LegacyRubricTable,
    minimum_wage: Decimal,
}

impl<'a> RuleResolver<'a> {
    /// Creates a resolver over one configuration snapshot.
    pub fn new(snapshot: &'a ConfigurationSnapshot, legacy: &'a LegacyRubricTable) -> Self {
        let (parameters, _) = snapshot.parameters.resolve();
        Self {
            snapshot,
            legacy,
            minimum_wage: parameters.minimum_wage,
        }
    }

    /// Resolves every rubric assigned to `worker` for `period`, in
    /// assignment order.
    ///
    /// Returns the resolved rubrics and one `fallback_used` log entry per
    /// rubric taken from the legacy table. Fails with
    /// `ConfigurationMissing` for a code known to neither source and with
    /// `InvalidInput` for a missing or negative amount.
    pub fn resolve_rubrics_for_worker(
        &self,
        period: CompetencyPeriod,
        worker: &WorkerContext,
    ) -> EngineResult<(Vec<ResolvedRubric>, Vec<CalculationLogEntry>)> {
        let date = period.first_day();
        let mut log = CalculationLog::new();
        let mut resolved = Vec::with_capacity(worker.rubrics.len());

        for code in &worker.rubrics {
            let rubric = match self.lookup(code, date, worker.category.as_deref()) {
                RecordLookup::Active(record) => {
                    debug!(rubric = %code, period = %period, "Rubric resolved from configuration");
                    record.to_rubric()
                }
                RecordLookup::Disabled => {
                    self.fallback(code, period, "configuration record disabled", &mut log)?
                }
                RecordLookup::Absent => {
                    self.fallback(code, period, "no active configuration record", &mut log)?
                }
            };

            let amount = self.resolve_amount(&rubric, worker)?;
            resolved.push(ResolvedRubric { rubric, amount });
        }

        Ok((resolved, log.into_entries()))
    }

    /// Picks the configuration record that governs `code`.
    ///
    /// Among records active on `date` that apply to the worker's category, a
    /// scoped record beats an unscoped one, then the latest
    /// `effective_from` wins.
    fn lookup(&self, code: &str, date: NaiveDate, category: Option<&str>) -> RecordLookup<'a> {
        let best = self
            .snapshot
            .rubrics
            .iter()
            .filter(|r| r.code == code && r.is_active_on(date) && r.applies_to(category))
            .min_by_key(|r| (Reverse(r.scope.is_some()), Reverse(r.effective_from)));

        match best {
            Some(record) if record.enabled => RecordLookup::Active(record),
            Some(_) => RecordLookup::Disabled,
            None => RecordLookup::Absent,
        }
    }

    fn fallback(
        &self,
        code: &str,
        period: CompetencyPeriod,
        reason: &str,
        log: &mut CalculationLog,
    ) -> EngineResult<Rubric> {
        let legacy = self
            .legacy
            .get(code)
            .ok_or_else(|| EngineError::ConfigurationMissing {
                field: format!("rubric.{}", code),
            })?;

        warn!(
            rubric = %code,
            period = %period,
            reason,
            legacy_version = %self.legacy.version(),
            "Rubric resolved from legacy table"
        );
        log.record(
            LogEntryKind::FallbackUsed,
            code,
            format!(
                "Rubric '{}' had {} for {}; legacy definition (version {}) used",
                code,
                reason,
                period,
                self.legacy.version()
            ),
        );

        Ok(legacy.to_rubric())
    }

    fn resolve_amount(&self, rubric: &Rubric, worker: &WorkerContext) -> EngineResult<Decimal> {
        let amount = match &rubric.value {
            RubricValue::Fixed { amount } => round_money(*amount),
            RubricValue::Percentage { rate, base } => {
                let base_amount = match base {
                    PercentageBase::BaseSalary => worker.base_salary,
                    PercentageBase::MinimumWage => self.minimum_wage,
                };
                percent_of(base_amount, *rate)
            }
            RubricValue::Supplied => {
                let supplied = worker.supplied_values.get(&rubric.code).ok_or_else(|| {
                    EngineError::invalid_input(
                        format!("supplied_values.{}", rubric.code),
                        "rubric requires a supplied amount",
                    )
                })?;
                round_money(*supplied)
            }
        };

        if amount < Decimal::ZERO {
            return Err(EngineError::invalid_input(
                format!("rubric.{}", rubric.code),
                format!("resolved amount {} is negative", amount),
            ));
        }
        check_monetary_bound(&format!("rubric.{}", rubric.code), amount)?;

        Ok(amount)
    }
}
