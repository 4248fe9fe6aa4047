//! Calculation logic for the Payroll Calculation Engine.
//!
//! This module contains the pure payroll math: per-stage monetary rounding,
//! progressive social-security withholding, progressive income-tax
//! withholding, employer charges, the consignable margin, and the full
//! payroll composition that chains them. Nothing here performs I/O or looks
//! up configuration; every table and parameter is passed in.

mod consignable_margin;
mod employer_charges;
mod full_payroll;
mod income_tax;
mod rounding;
mod social_security;

pub use consignable_margin::compute_consignable_margin;
pub use employer_charges::compute_employer_charges;
pub use full_payroll::{PayrollInputs, compute_full_payroll, compute_full_payroll_with_bases};
pub use income_tax::{compute_progressive_income_tax, select_income_tax_tier};
pub use rounding::{MAX_MONETARY_AMOUNT, percent_of, round_money};
pub(crate) use rounding::check_monetary_bound;
pub use social_security::compute_progressive_social_security;
