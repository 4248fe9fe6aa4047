//! Payroll Calculation Engine
//!
//! This crate computes monthly payroll for a worker: progressive
//! social-security and income-tax withholding, employer charges, net pay and
//! the consignable margin. Rubric definitions are resolved from live
//! configuration with a logged fallback to a versioned legacy table, and
//! every run produces an auditable [`models::CalculationResult`].

#![warn(missing_docs)]

pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod rules;
pub mod validation;
