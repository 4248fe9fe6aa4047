//! A single payroll run for one worker and competency period.

use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use crate::calculation::{
    PayrollInputs, check_monetary_bound, compute_full_payroll_with_bases, round_money,
};
use crate::config::ConfigurationSnapshot;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    BracketTier, CalculationLog, CalculationResult, CompetencyPeriod, Incidence, LogEntryKind,
    PayslipLine, ResolvedRubric, RubricKind, RubricSource, WorkerContext, validate_bracket_table,
};
use crate::rules::{IncidenceBases, LegacyRubricTable, RuleResolver};
use crate::validation::{is_valid_national_id, is_valid_social_insurance_number};

use super::state::RunState;

/// Payslip code of the base salary line.
pub const BASE_SALARY_CODE: &str = "base_salary";

/// One execution of the payroll pipeline.
///
/// A run reads an immutable configuration snapshot and the legacy table,
/// walks the [`RunState`] lifecycle once and produces a
/// [`CalculationResult`]. Failed runs are not retried; create a new run
/// instead.
///
/// # Example
///
/// ```
/// use payroll_engine::config::ConfigurationSnapshot;
/// use payroll_engine::models::{BracketTier, CompetencyPeriod, WorkerContext};
/// use payroll_engine::orchestrator::{PayrollRun, RunState};
/// use payroll_engine::rules::LegacyRubricTable;
/// use rust_decimal::Decimal;
///
/// let snapshot = ConfigurationSnapshot {
///     social_security_tiers: Some(vec![BracketTier::new(1, Decimal::ZERO, None, Decimal::from(8))]),
///     income_tax_tiers: Some(vec![BracketTier::new(1, Decimal::ZERO, None, Decimal::ZERO)]),
///     ..ConfigurationSnapshot::default()
/// };
/// let legacy = LegacyRubricTable::builtin()?;
/// let worker = WorkerContext::new("w-001", Decimal::from(2000));
///
/// let mut run = PayrollRun::new(CompetencyPeriod::new(2025, 3)?, &worker, &snapshot, &legacy);
/// let result = run.execute()?;
///
/// assert_eq!(run.state(), RunState::Assembled);
/// assert_eq!(result.net_pay(), Decimal::from(1840));
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug)]
pub struct PayrollRun<'a> {
    period: CompetencyPeriod,
    worker: &'a WorkerContext,
    snapshot: &'a ConfigurationSnapshot,
    legacy: &'a LegacyRubricTable,
    state: RunState,
    history: Vec<RunState>,
}

impl<'a> PayrollRun<'a> {
    /// Creates a pending run.
    pub fn new(
        period: CompetencyPeriod,
        worker: &'a WorkerContext,
        snapshot: &'a ConfigurationSnapshot,
        legacy: &'a LegacyRubricTable,
    ) -> Self {
        Self {
            period,
            worker,
            snapshot,
            legacy,
            state: RunState::Pending,
            history: vec![RunState::Pending],
        }
    }

    /// The current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Every state the run has been in, oldest first.
    pub fn history(&self) -> &[RunState] {
        &self.history
    }

    /// Executes the run.
    ///
    /// Fails with `InvalidInput` on field `run` if the run already reached
    /// a terminal state. Any other error leaves the run `Failed`.
    pub fn execute(&mut self) -> EngineResult<CalculationResult> {
        if self.state.is_terminal() {
            return Err(EngineError::invalid_input(
                "run",
                format!("run is already {}", self.state),
            ));
        }

        match self.run_pipeline() {
            Ok(result) => {
                info!(
                    worker_id = %self.worker.worker_id,
                    period = %self.period,
                    calculation_id = %result.calculation_id(),
                    net_pay = %result.net_pay(),
                    log_entries = result.calculation_log().len(),
                    "Payroll run assembled"
                );
                Ok(result)
            }
            Err(err) => {
                let failed_in = self.state;
                self.transition(RunState::Failed);
                warn!(
                    worker_id = %self.worker.worker_id,
                    period = %self.period,
                    failed_in = %failed_in,
                    error_kind = %err.kind(),
                    error = %err,
                    "Payroll run failed"
                );
                Err(err)
            }
        }
    }

    fn run_pipeline(&mut self) -> EngineResult<CalculationResult> {
        let snapshot = self.snapshot;
        validate_worker(self.worker)?;

        let social_security_tiers =
            required_table("social_security_tiers", snapshot.social_security_tiers.as_deref())?;
        let income_tax_tiers =
            required_table("income_tax_tiers", snapshot.income_tax_tiers.as_deref())?;

        let mut log = CalculationLog::new();
        let (parameters, defaulted) = snapshot.parameters.resolve();
        for name in defaulted {
            log.record(
                LogEntryKind::DefaultApplied,
                name,
                format!("Parameter '{}' not configured for {}; default applied", name, self.period),
            );
        }

        self.transition(RunState::ResolvingRubrics);
        let resolver = RuleResolver::new(snapshot, self.legacy);
        let (rubrics, fallbacks) = resolver.resolve_rubrics_for_worker(self.period, self.worker)?;
        log.extend(fallbacks);

        self.transition(RunState::ComputingWithholdings);
        let base_salary = round_money(self.worker.base_salary);
        if base_salary < parameters.minimum_wage {
            log.record(
                LogEntryKind::Notice,
                BASE_SALARY_CODE,
                format!(
                    "Base salary {} is below the minimum wage {}",
                    base_salary, parameters.minimum_wage
                ),
            );
        }

        let bases = IncidenceBases::from_rubrics(base_salary, &rubrics)?;
        let other_deductions = bases
            .rubric_deductions
            .checked_add(self.worker.other_deductions)
            .ok_or_else(|| {
                EngineError::invalid_input("other_deductions", "deduction total overflows")
            })?;
        let payroll = compute_full_payroll_with_bases(PayrollInputs {
            total_earnings: bases.total_earnings,
            social_security_base: bases.social_security_base,
            income_tax_base: bases.income_tax_base,
            other_deductions,
            dependent_count: self.worker.dependent_count,
            social_security_tiers,
            income_tax_tiers,
            parameters: &parameters,
        })?;

        let lines = payslip_lines(base_salary, &rubrics);
        self.transition(RunState::Assembled);

        Ok(CalculationResult::new(
            self.worker.worker_id.clone(),
            self.period,
            lines,
            payroll,
            log.into_entries(),
        ))
    }

    fn transition(&mut self, next: RunState) {
        debug!(
            worker_id = %self.worker.worker_id,
            from = %self.state,
            to = %next,
            "Payroll run transition"
        );
        self.state = next;
        self.history.push(next);
    }
}

/// Rejects worker inputs the calculation cannot be trusted with.
fn validate_worker(worker: &WorkerContext) -> EngineResult<()> {
    if worker.base_salary < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "base_salary",
            "base salary cannot be negative",
        ));
    }
    if worker.other_deductions < Decimal::ZERO {
        return Err(EngineError::invalid_input(
            "other_deductions",
            "other deductions cannot be negative",
        ));
    }
    if let Some((code, _)) = worker.supplied_values.iter().find(|(_, v)| **v < Decimal::ZERO) {
        return Err(EngineError::invalid_input(
            format!("supplied_values.{}", code),
            "supplied amount cannot be negative",
        ));
    }
    check_monetary_bound("base_salary", worker.base_salary)?;
    check_monetary_bound("other_deductions", worker.other_deductions)?;
    for (code, value) in &worker.supplied_values {
        check_monetary_bound(&format!("supplied_values.{}", code), *value)?;
    }
    if let Some(id) = &worker.national_id
        && !is_valid_national_id(id)
    {
        return Err(EngineError::invalid_input(
            "national_id",
            "check digits do not match",
        ));
    }
    if let Some(number) = &worker.social_insurance_number
        && !is_valid_social_insurance_number(number)
    {
        return Err(EngineError::invalid_input(
            "social_insurance_number",
            "check digit does not match",
        ));
    }
    Ok(())
}

fn required_table<'t>(table: &str, tiers: Option<&'t [BracketTier]>) -> EngineResult<&'t [BracketTier]> {
    let tiers = tiers.ok_or_else(|| EngineError::ConfigurationMissing {
        field: table.to_string(),
    })?;
    validate_bracket_table(table, tiers)?;
    Ok(tiers)
}

fn payslip_lines(base_salary: Decimal, rubrics: &[ResolvedRubric]) -> Vec<PayslipLine> {
    let mut lines = Vec::with_capacity(rubrics.len() + 1);
    lines.push(PayslipLine {
        code: BASE_SALARY_CODE.to_string(),
        label: "Base salary".to_string(),
        kind: RubricKind::Earning,
        amount: base_salary,
        social_security: Incidence::BOTH.social_security,
        income_tax: Incidence::BOTH.income_tax,
        source: RubricSource::Configured,
    });
    lines.extend(rubrics.iter().map(|resolved| PayslipLine {
        code: resolved.rubric.code.clone(),
        label: resolved.rubric.label.clone(),
        kind: resolved.rubric.kind,
        amount: resolved.amount,
        social_security: resolved.rubric.incidence.social_security,
        income_tax: resolved.rubric.incidence.income_tax,
        source: resolved.rubric.source,
    }));
    lines
}
