//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading payroll
//! configuration from YAML files.

use std::fs;
use std::path::Path;

use tracing::debug;

use crate::error::{EngineError, EngineResult};
use crate::models::{CompetencyPeriod, validate_bracket_table};

use super::types::{
    BracketTableVersion, BracketTablesFile, ConfigurationSnapshot, ParametersFile, PayrollConfig,
    RubricsFile,
};

/// Loads and provides access to payroll configuration.
///
/// The `ConfigLoader` reads YAML configuration files from a directory and
/// builds per-period [`ConfigurationSnapshot`]s from them.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── parameters.yaml           # Versioned financial parameters
/// ├── rubrics.yaml              # Rubric configuration records
/// └── brackets/
///     ├── social_security.yaml  # Versioned social-security tiers
///     └── income_tax.yaml       # Versioned income-tax tiers
/// ```
///
/// # Example
///
/// ```no_run
/// use payroll_engine::config::ConfigLoader;
/// use payroll_engine::models::CompetencyPeriod;
///
/// let loader = ConfigLoader::load("./config/default")?;
/// let snapshot = loader.snapshot_for(CompetencyPeriod::new(2025, 3)?);
/// assert!(snapshot.income_tax_tiers.is_some());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PayrollConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// Returns an error if any required file is missing
    /// (`ConfigNotFound`), contains invalid YAML or fields
    /// (`ConfigParseError`), or holds a malformed bracket table
    /// (`InvalidBracketTable`).
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        debug!(path = %path.display(), "Loading payroll configuration");

        let parameters = Self::load_yaml::<ParametersFile>(&path.join("parameters.yaml"))?;
        let rubrics = Self::load_yaml::<RubricsFile>(&path.join("rubrics.yaml"))?;

        let brackets_dir = path.join("brackets");
        let social_security =
            Self::load_tables(&brackets_dir.join("social_security.yaml"), "social_security_tiers")?;
        let income_tax =
            Self::load_tables(&brackets_dir.join("income_tax.yaml"), "income_tax_tiers")?;

        debug!(
            social_security_versions = social_security.len(),
            income_tax_versions = income_tax.len(),
            parameter_versions = parameters.versions.len(),
            rubric_records = rubrics.rubrics.len(),
            "Payroll configuration loaded"
        );

        let config = PayrollConfig::new(
            social_security,
            income_tax,
            parameters.versions,
            rubrics.rubrics,
        );

        Ok(Self { config })
    }

    /// Loads and parses a YAML file.
    pub(crate) fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> EngineResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| EngineError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Loads a versioned bracket table file and validates every version.
    fn load_tables(path: &Path, table: &str) -> EngineResult<Vec<BracketTableVersion>> {
        let file = Self::load_yaml::<BracketTablesFile>(path)?;

        if file.tables.is_empty() {
            return Err(EngineError::ConfigNotFound {
                path: format!("{} (no table versions found)", path.display()),
            });
        }

        for version in &file.tables {
            validate_bracket_table(&format!("{}@{}", table, version.effective_date), &version.tiers)?;
        }

        Ok(file.tables)
    }

    /// Returns the underlying payroll configuration.
    pub fn config(&self) -> &PayrollConfig {
        &self.config
    }

    /// Builds the configuration snapshot in force for a competency period.
    ///
    /// Versions are selected by the first day of the period.
    pub fn snapshot_for(&self, period: CompetencyPeriod) -> ConfigurationSnapshot {
        self.config.snapshot_on(period.first_day())
    }
}
