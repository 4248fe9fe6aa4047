//! Error types for the Payroll Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur while resolving rubrics and
//! computing a payroll.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Machine-readable classification of an [`EngineError`].
///
/// Callers use this to decide how to surface a failure without matching on
/// every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Input values or bracket tables are malformed.
    InvalidInput,
    /// A required table or value is absent and has no documented default.
    ConfigurationMissing,
    /// The configuration store could not be read or parsed.
    ConfigurationStore,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::ConfigurationMissing => "configuration_missing",
            ErrorKind::ConfigurationStore => "configuration_store",
        };
        f.write_str(name)
    }
}

/// The main error type for the Payroll Calculation Engine.
///
/// All fallible operations in the engine return this error type. Every
/// variant names the offending field, table or path.
///
/// # Example
///
/// ```
/// use payroll_engine::error::{EngineError, ErrorKind};
///
/// let error = EngineError::ConfigurationMissing {
///     field: "income_tax_tiers".to_string(),
/// };
/// assert_eq!(error.kind(), ErrorKind::ConfigurationMissing);
/// assert_eq!(error.to_string(), "Required configuration missing: income_tax_tiers");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// An input value was rejected.
    #[error("Invalid input '{field}': {message}")]
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A description of what made the field invalid.
        message: String,
    },

    /// A required bracket table, parameter or rubric definition is absent.
    #[error("Required configuration missing: {field}")]
    ConfigurationMissing {
        /// The missing field.
        field: String,
    },

    /// A bracket table is not contiguous, overlaps or is out of order.
    #[error("Invalid bracket table '{table}': {message}")]
    InvalidBracketTable {
        /// The table that failed validation.
        table: String,
        /// A description of the defect.
        message: String,
    },

    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },
}

impl EngineError {
    /// Returns the machine-readable kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            EngineError::InvalidInput { .. } | EngineError::InvalidBracketTable { .. } => {
                ErrorKind::InvalidInput
            }
            EngineError::ConfigurationMissing { .. } => ErrorKind::ConfigurationMissing,
            EngineError::ConfigNotFound { .. } | EngineError::ConfigParseError { .. } => {
                ErrorKind::ConfigurationStore
            }
        }
    }

    /// Returns the name of the offending field, table or path.
    pub fn field(&self) -> &str {
        match self {
            EngineError::InvalidInput { field, .. } => field,
            EngineError::ConfigurationMissing { field } => field,
            EngineError::InvalidBracketTable { table, .. } => table,
            EngineError::ConfigNotFound { path } => path,
            EngineError::ConfigParseError { path, .. } => path,
        }
    }

    pub(crate) fn invalid_input(field: impl Into<String>, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
