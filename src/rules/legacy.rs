//! The legacy rubric table.
//!
//! Historical payrolls were computed from a fixed set of rubric
//! definitions. The table is a versioned, read-only data asset: it is parsed
//! once and handed to the resolver, never consulted through a global.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use crate::config::ConfigLoader;
use crate::error::{EngineError, EngineResult};
use crate::models::{Incidence, Rubric, RubricKind, RubricSource, RubricValue};

const BUILTIN_LEGACY_RUBRICS: &str = include_str!("../../config/legacy/rubrics.yaml");

/// One legacy rubric definition.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LegacyRubric {
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
}

impl LegacyRubric {
    /// Converts the definition into a rubric tagged `legacy_fallback`.
    pub fn to_rubric(&self) -> Rubric {
        Rubric {
            code: self.code.clone(),
            label: self.label.clone(),
            kind: self.kind,
            incidence: self.incidence,
            value: self.value.clone(),
            source: RubricSource::LegacyFallback,
        }
    }
}

#[derive(Debug, Deserialize)]
struct LegacyRubricFile {
    version: String,
    rubrics: Vec<LegacyRubric>,
}

/// A versioned, read-only table of legacy rubric definitions.
///
/// # Example
///
/// ```
/// use payroll_engine::rules::LegacyRubricTable;
///
/// let legacy = LegacyRubricTable::builtin()?;
/// assert!(legacy.get("night_shift_premium").is_some());
/// # Ok::<(), payroll_engine::error::EngineError>(())
/// ```
#[derive(Debug, Clone)]
pub struct LegacyRubricTable {
    version: String,
    rubrics: BTreeMap<String, LegacyRubric>,
}

impl LegacyRubricTable {
    /// Parses the legacy table bundled with the crate.
    pub fn builtin() -> EngineResult<Self> {
        Self::parse(BUILTIN_LEGACY_RUBRICS, "<builtin legacy rubrics>")
    }

    /// Loads a legacy table from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let file = ConfigLoader::load_yaml::<LegacyRubricFile>(path.as_ref())?;
        Self::from_file(file, &path.as_ref().display().to_string())
    }

    /// Parses a legacy table from YAML text.
    pub fn from_yaml_str(yaml: &str) -> EngineResult<Self> {
        Self::parse(yaml, "<inline legacy rubrics>")
    }

    fn parse(yaml: &str, origin: &str) -> EngineResult<Self> {
        let file: LegacyRubricFile =
            serde_yaml::from_str(yaml).map_err(|e| EngineError::ConfigParseError {
                path: origin.to_string(),
                message: e.to_string(),
            })?;
        Self::from_file(file, origin)
    }

    fn from_file(file: LegacyRubricFile, origin: &str) -> EngineResult<Self> {
        let mut rubrics = BTreeMap::new();
        for rubric in file.rubrics {
            let code = rubric.code.clone();
            if rubrics.insert(code.clone(), rubric).is_some() {
                return Err(EngineError::ConfigParseError {
                    path: origin.to_string(),
                    message: format!("duplicate legacy rubric '{}'", code),
                });
            }
        }
        Ok(Self {
            version: file.version,
            rubrics,
        })
    }

    /// The version label of the table.
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Looks up a legacy definition by code.
    pub fn get(&self, code: &str) -> Option<&LegacyRubric> {
        self.rubrics.get(code)
    }

    /// Number of definitions in the table.
    pub fn len(&self) -> usize {
        self.rubrics.len()
    }

    /// Returns true if the table has no definitions.
    pub fn is_empty(&self) -> bool {
        self.rubrics.is_empty()
    }
}
