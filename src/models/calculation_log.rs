//! Calculation log models.
//!
//! The calculation log records every provenance decision taken while a
//! payroll is resolved, so auditors can see which figures came from live
//! configuration and which from legacy defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of decision a log entry records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogEntryKind {
    /// A rubric was resolved from the legacy table instead of configuration.
    FallbackUsed,
    /// A financial parameter took its documented default.
    DefaultApplied,
    /// Informational observation that did not change any figure.
    Notice,
}

/// A single timestamped resolution decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationLogEntry {
    /// Position of the entry within its log, starting at 1.
    pub sequence: u32,
    /// When the decision was recorded.
    pub timestamp: DateTime<Utc>,
    /// What kind of decision this was.
    pub kind: LogEntryKind,
    /// The rubric code or parameter name the decision concerns.
    pub subject: String,
    /// Human-readable description.
    pub message: String,
}

/// Append-only collector for [`CalculationLogEntry`] values.
///
/// Entries can only be added, never edited or removed, and are handed over
/// once with [`CalculationLog::into_entries`].
///
/// # Example
///
/// ```
/// use payroll_engine::models::{CalculationLog, LogEntryKind};
///
/// let mut log = CalculationLog::new();
/// log.record(LogEntryKind::Notice, "base_salary", "below minimum wage");
/// let entries = log.into_entries();
/// assert_eq!(entries.len(), 1);
/// assert_eq!(entries[0].sequence, 1);
/// ```
#[derive(Debug, Default)]
pub struct CalculationLog {
    entries: Vec<CalculationLogEntry>,
}

impl CalculationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry stamped with the current time.
    pub fn record(
        &mut self,
        kind: LogEntryKind,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) {
        let sequence = self.entries.len() as u32 + 1;
        self.entries.push(CalculationLogEntry {
            sequence,
            timestamp: Utc::now(),
            kind,
            subject: subject.into(),
            message: message.into(),
        });
    }

    /// Appends entries produced elsewhere, renumbering them in order.
    pub fn extend(&mut self, entries: Vec<CalculationLogEntry>) {
        for mut entry in entries {
            entry.sequence = self.entries.len() as u32 + 1;
            self.entries.push(entry);
        }
    }

    /// Number of entries recorded so far.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes the log, returning its entries in recording order.
    pub fn into_entries(self) -> Vec<CalculationLogEntry> {
        self.entries
    }
}
