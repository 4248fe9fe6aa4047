//! Configuration types for payroll calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the per-period
//! [`ConfigurationSnapshot`] handed to a payroll run.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::{
    BracketTier, FinancialParameters, Incidence, Rubric, RubricKind, RubricSource, RubricValue,
};

/// A bracket table effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BracketTableVersion {
    /// The first date the table applies to.
    pub effective_date: NaiveDate,
    /// Tiers sorted by index.
    pub tiers: Vec<BracketTier>,
}

/// Bracket table file structure (`brackets/*.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct BracketTablesFile {
    /// All versions of the table.
    pub tables: Vec<BracketTableVersion>,
}

/// Financial parameters effective from a given date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterVersion {
    /// The first date the parameters apply to.
    pub effective_date: NaiveDate,
    /// The parameter values.
    pub parameters: FinancialParameters,
}

/// Parameters file structure (`parameters.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct ParametersFile {
    /// All versions of the parameters.
    pub versions: Vec<ParameterVersion>,
}

/// A live configuration record for one rubric.
///
/// A record is active for dates within `[effective_from, effective_to]`
/// (either bound may be open) and applies to workers whose category equals
/// `scope`, or to every worker when `scope` is unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RubricConfig {
    /// The rubric code.
    pub code: String,
    /// Payslip label.
    pub label: String,
    /// Earning or deduction.
    pub kind: RubricKind,
    /// Statutory bases the rubric counts toward.
    #[serde(default)]
    pub incidence: Incidence,
    /// Amount resolution rule.
    pub value: RubricValue,
    /// Disabled records are ignored in favour of the legacy definition.
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    /// First date the record applies to.
    #[serde(default)]
    pub effective_from: Option<NaiveDate>,
    /// Last date the record applies to.
    #[serde(default)]
    pub effective_to: Option<NaiveDate>,
    /// Worker category the record is restricted to.
    #[serde(default)]
    pub scope: Option<String>,
}

fn enabled_by_default() -> bool {
    true
}

impl RubricConfig {
    /// Returns true if the record's validity window includes `date`.
    pub fn is_active_on(&self, date: NaiveDate) -> bool {
        self.effective_from.is_none_or(|from| from <= date)
            && self.effective_to.is_none_or(|to| date <= to)
    }

    /// Returns true if the record applies to a worker of `category`.
    pub fn applies_to(&self, category: Option<&str>) -> bool {
        match self.scope.as_deref() {
            None => true,
            Some(scope) => category == Some(scope),
        }
    }

    /// Converts the record into a rubric tagged `configured`.
    pub fn to_rubric(&self) -> Rubric {
        Rubric {
            code: self.code.clone(),
            label: self.label.clone(),
            kind: self.kind,
            incidence: self.incidence,
            value: self.value.clone(),
            source: RubricSource::Configured,
        }
    }
}

/// Rubric configuration file structure (`rubrics.yaml`).
#[derive(Debug, Clone, Deserialize)]
pub struct RubricsFile {
    /// All rubric configuration records.
    #[serde(default)]
    pub rubrics: Vec<RubricConfig>,
}

/// Everything a payroll run reads from configuration for one period.
///
/// Bracket tables are optional so that their absence is explicit: a run
/// without either table fails rather than computing a zero withholding.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationSnapshot {
    /// Social-security tiers in force for the period.
    #[serde(default)]
    pub social_security_tiers: Option<Vec<BracketTier>>,
    /// Income-tax tiers in force for the period.
    #[serde(default)]
    pub income_tax_tiers: Option<Vec<BracketTier>>,
    /// Financial parameters in force for the period.
    #[serde(default)]
    pub parameters: FinancialParameters,
    /// All rubric configuration records; activity is decided per rubric.
    #[serde(default)]
    pub rubrics: Vec<RubricConfig>,
}

/// The complete payroll configuration loaded from YAML files.
///
/// Versions are kept sorted oldest first.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    social_security: Vec<BracketTableVersion>,
    income_tax: Vec<BracketTableVersion>,
    parameters: Vec<ParameterVersion>,
    rubrics: Vec<RubricConfig>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig from its component parts.
    pub fn new(
        social_security: Vec<BracketTableVersion>,
        income_tax: Vec<BracketTableVersion>,
        parameters: Vec<ParameterVersion>,
        rubrics: Vec<RubricConfig>,
    ) -> Self {
        let mut social_security = social_security;
        social_security.sort_by_key(|v| v.effective_date);
        let mut income_tax = income_tax;
        income_tax.sort_by_key(|v| v.effective_date);
        let mut parameters = parameters;
        parameters.sort_by_key(|v| v.effective_date);
        Self {
            social_security,
            income_tax,
            parameters,
            rubrics,
        }
    }

    /// Returns all social-security table versions.
    pub fn social_security_tables(&self) -> &[BracketTableVersion] {
        &self.social_security
    }

    /// Returns all income-tax table versions.
    pub fn income_tax_tables(&self) -> &[BracketTableVersion] {
        &self.income_tax
    }

    /// Returns all parameter versions.
    pub fn parameter_versions(&self) -> &[ParameterVersion] {
        &self.parameters
    }

    /// Returns all rubric configuration records.
    pub fn rubrics(&self) -> &[RubricConfig] {
        &self.rubrics
    }

    /// Builds the snapshot in force on `date`.
    ///
    /// Each versioned item resolves to the latest version whose effective
    /// date is on or before `date`. Tables with no such version are absent.
    pub fn snapshot_on(&self, date: NaiveDate) -> ConfigurationSnapshot {
        let social_security_tiers = self
            .social_security
            .iter()
            .rfind(|v| v.effective_date <= date)
            .map(|v| v.tiers.clone());
        let income_tax_tiers = self
            .income_tax
            .iter()
            .rfind(|v| v.effective_date <= date)
            .map(|v| v.tiers.clone());
        let parameters = self
            .parameters
            .iter()
            .rfind(|v| v.effective_date <= date)
            .map(|v| v.parameters.clone())
            .unwrap_or_default();

        ConfigurationSnapshot {
            social_security_tiers,
            income_tax_tiers,
            parameters,
            rubrics: self.rubrics.clone(),
        }
    }
}
