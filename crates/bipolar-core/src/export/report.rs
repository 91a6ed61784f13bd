//! Batch outcome accounting

use crate::types::{ExportFormat, SessionKey};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// Result of one format export for one session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormatOutcome {
    /// The output already existed and was kept
    SkippedExists,
    /// The output was written
    Written,
    /// The writer reported failure
    Failed,
}

/// Result of processing one session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionOutcome {
    /// The parser rejected the session; no format was attempted
    ParseFailed { session: SessionKey },
    /// The session parsed; each format has its own outcome
    Exported {
        session: SessionKey,
        formats: Vec<(ExportFormat, FormatOutcome)>,
    },
}

/// Succeeded/failed tally for a batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchResult {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchResult {
    /// Whether anything failed
    pub fn has_failures(&self) -> bool {
        self.failed > 0
    }
}

/// Running counter over session outcomes
///
/// A parse failure counts once. Each written format counts as a success,
/// each failed format as a failure. Skips count as neither.
#[derive(Debug, Default)]
pub struct BatchReporter {
    result: BatchResult,
    skipped: usize,
}

impl BatchReporter {
    /// Create an empty reporter
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one session outcome
    pub fn record(&mut self, outcome: &SessionOutcome) {
        match outcome {
            SessionOutcome::ParseFailed { .. } => self.result.failed += 1,
            SessionOutcome::Exported { formats, .. } => {
                for (_, outcome) in formats {
                    match outcome {
                        FormatOutcome::Written => self.result.succeeded += 1,
                        FormatOutcome::Failed => self.result.failed += 1,
                        FormatOutcome::SkippedExists => self.skipped += 1,
                    }
                }
            }
        }
    }

    /// Current tally
    pub fn result(&self) -> BatchResult {
        self.result
    }

    /// Number of outputs left untouched because they existed
    pub fn skipped(&self) -> usize {
        self.skipped
    }

    /// Tally a complete set of outcomes
    pub fn summarize<'a>(outcomes: impl IntoIterator<Item = &'a SessionOutcome>) -> BatchResult {
        let mut reporter = Self::new();
        for outcome in outcomes {
            reporter.record(outcome);
        }
        reporter.result()
    }
}

/// Everything a finished batch produced
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    /// Per-session outcomes, in processing order
    pub sessions: Vec<SessionOutcome>,
    /// Final tally
    pub result: BatchResult,
    /// Outputs skipped because they existed
    pub skipped: usize,
    /// When the batch started
    pub started_at: DateTime<Utc>,
    /// When the batch finished
    pub finished_at: DateTime<Utc>,
}

impl BatchReport {
    /// Number of sessions processed
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// Serialize the report as pretty JSON
    pub fn to_json(&self) -> crate::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn key(id: &str) -> SessionKey {
        SessionKey::new("/export", &format!("v2-users-1-training-sessions-{}", id))
    }

    #[test]
    fn test_parse_failure_counts_once() {
        let outcomes = vec![SessionOutcome::ParseFailed { session: key("1") }];
        assert_eq!(
            BatchReporter::summarize(&outcomes),
            BatchResult { succeeded: 0, failed: 1 }
        );
    }

    #[test]
    fn test_format_outcomes_counted_independently() {
        let outcomes = vec![SessionOutcome::Exported {
            session: key("1"),
            formats: vec![
                (ExportFormat::Gpx, FormatOutcome::Failed),
                (ExportFormat::Hrm, FormatOutcome::Written),
                (ExportFormat::Tcx, FormatOutcome::SkippedExists),
            ],
        }];
        let mut reporter = BatchReporter::new();
        for outcome in &outcomes {
            reporter.record(outcome);
        }
        assert_eq!(reporter.result(), BatchResult { succeeded: 1, failed: 1 });
        assert_eq!(reporter.skipped(), 1);
    }

    #[test]
    fn test_empty_batch() {
        let result = BatchReporter::summarize(&Vec::new());
        assert_eq!(result, BatchResult::default());
        assert!(!result.has_failures());
    }

    #[test]
    fn test_outcome_json_shape() {
        let outcome = SessionOutcome::ParseFailed { session: key("7") };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "parse_failed");
        assert_eq!(json["session"], "/export/v2-users-1-training-sessions-7");
    }
}
