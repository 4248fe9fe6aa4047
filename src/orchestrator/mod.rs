//! Payroll run orchestration.
//!
//! A [`PayrollRun`] drives one worker through rubric resolution and
//! withholding computation. [`PayrollEngine`] wraps it with a
//! configuration fetch per call.

mod engine;
mod payroll_run;
mod state;

pub use engine::PayrollEngine;
pub use payroll_run::{BASE_SALARY_CODE, PayrollRun};
pub use state::RunState;
