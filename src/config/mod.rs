//! Configuration loading and management for the Payroll Calculation Engine.
//!
//! This module provides the [`ConfigurationStore`] contract and a
//! file-backed implementation that loads versioned bracket tables, financial
//! parameters and rubric configuration records from YAML files.
//!
//! # Example
//!
//! ```no_run
//! use payroll_engine::config::{ConfigLoader, ConfigurationStore};
//! use payroll_engine::models::CompetencyPeriod;
//!
//! let loader = ConfigLoader::load("./config/default").unwrap();
//! let snapshot = loader.fetch(CompetencyPeriod::new(2025, 3).unwrap()).unwrap();
//! println!("Rubric records: {}", snapshot.rubrics.len());
//! ```

mod loader;
mod store;
mod types;

pub use loader::ConfigLoader;
pub use store::ConfigurationStore;
pub use types::{
    BracketTableVersion, BracketTablesFile, ConfigurationSnapshot, ParameterVersion,
    ParametersFile, PayrollConfig, RubricConfig, RubricsFile,
};
