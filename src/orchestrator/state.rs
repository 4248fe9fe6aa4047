//! Payroll run lifecycle states.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The lifecycle state of a [`PayrollRun`](super::PayrollRun).
///
/// A run moves forward through `Pending`, `ResolvingRubrics`,
/// `ComputingWithholdings` and `Assembled`. A hard error from any
/// non-terminal state moves it to `Failed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RunState {
    /// Created, not yet executed.
    Pending,
    /// Deciding the source and amount of each rubric.
    ResolvingRubrics,
    /// Computing statutory withholdings from the incidence bases.
    ComputingWithholdings,
    /// A result was produced.
    Assembled,
    /// The run stopped on an error.
    Failed,
}

impl RunState {
    /// Returns true once the run can no longer change state.
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Assembled | Self::Failed)
    }

    /// A stable snake_case label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::ResolvingRubrics => "resolving_rubrics",
            Self::ComputingWithholdings => "computing_withholdings",
            Self::Assembled => "assembled",
            Self::Failed => "failed",
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_assembled_and_failed_are_terminal() {
        assert!(!RunState::Pending.is_terminal());
        assert!(!RunState::ResolvingRubrics.is_terminal());
        assert!(!RunState::ComputingWithholdings.is_terminal());
        assert!(RunState::Assembled.is_terminal());
        assert!(RunState::Failed.is_terminal());
    }

    #[test]
    fn test_label_matches_serialized_name() {
        let json = serde_json::to_string(&RunState::ComputingWithholdings).unwrap();
        assert_eq!(json, format!("\"{}\"", RunState::ComputingWithholdings));
    }
}
