//! Rubric rule resolution.
//!
//! This module decides, per rubric, whether a live configuration record or
//! the legacy table governs it, resolves its amount, and derives the
//! statutory bases the withholdings are computed from.

mod incidence;
mod legacy;
mod resolver;

pub use incidence::IncidenceBases;
pub use legacy::{LegacyRubric, LegacyRubricTable};
pub use resolver::RuleResolver;
