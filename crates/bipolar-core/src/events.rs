//! Conversion events and observation sinks
//!
//! The orchestrator never logs directly. It emits [`ConvertEvent`]s into an
//! injected [`EventSink`]; [`TracingSink`] forwards them to `tracing` and
//! [`RecordingSink`] keeps them for inspection.

use crate::session::Rejection;
use crate::types::{ExportFormat, SessionKey};
use serde::Serialize;
use std::path::PathBuf;
use std::sync::Mutex;

/// Severity of a conversion event
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Debug,
    Info,
    Warn,
}

/// Something observable that happened during discovery or export
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum ConvertEvent {
    /// A directory entry was not a session file
    Ignored { name: String, reason: Rejection },
    /// The export directory is missing or unreadable
    DirectoryMissing { path: PathBuf, error: String },
    /// Discovery found no sessions
    NothingToConvert,
    /// A session is about to be parsed
    Converting { session: SessionKey },
    /// The session parser rejected a session
    ParseFailed { session: SessionKey },
    /// An output file exists and was left alone
    WriteSkippedExists { path: PathBuf },
    /// An output file was written
    WriteSucceeded { format: ExportFormat, path: PathBuf },
    /// Writing one format failed
    WriteFailed { format: ExportFormat, path: PathBuf },
    /// The batch finished
    BatchComplete { succeeded: usize, failed: usize },
}

impl ConvertEvent {
    /// Log level the event is reported at
    pub fn severity(&self) -> Severity {
        match self {
            ConvertEvent::Ignored { .. }
            | ConvertEvent::NothingToConvert
            | ConvertEvent::WriteSkippedExists { .. } => Severity::Debug,
            ConvertEvent::Converting { .. }
            | ConvertEvent::WriteSucceeded { .. }
            | ConvertEvent::BatchComplete { .. } => Severity::Info,
            ConvertEvent::DirectoryMissing { .. }
            | ConvertEvent::ParseFailed { .. }
            | ConvertEvent::WriteFailed { .. } => Severity::Warn,
        }
    }

    /// Human readable message
    pub fn message(&self) -> String {
        match self {
            ConvertEvent::Ignored { name, reason } => format!("ignoring {} ({})", name, reason),
            ConvertEvent::DirectoryMissing { path, error } => {
                format!("data dir not found {}: {}", path.display(), error)
            }
            ConvertEvent::NothingToConvert => "found nothing to convert".to_string(),
            ConvertEvent::Converting { session } => format!("converting {}", session),
            ConvertEvent::ParseFailed { session } => format!("failed to parse {}", session),
            ConvertEvent::WriteSkippedExists { path } => {
                format!("{} already exists", path.display())
            }
            ConvertEvent::WriteSucceeded { format, path } => {
                format!("wrote {} {}", format, path.display())
            }
            ConvertEvent::WriteFailed { format, .. } => format!("failed to write {}", format),
            ConvertEvent::BatchComplete { succeeded, failed } => {
                format!("{} succeeded, {} failed.", succeeded, failed)
            }
        }
    }
}

/// Receiver for conversion events
pub trait EventSink {
    /// Handle one event
    fn emit(&self, event: ConvertEvent);
}

impl<T: EventSink + ?Sized> EventSink for &T {
    fn emit(&self, event: ConvertEvent) {
        (**self).emit(event)
    }
}

/// Forwards events to `tracing` at their severity
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: ConvertEvent) {
        let message = event.message();
        match event.severity() {
            Severity::Debug => tracing::debug!("{}", message),
            Severity::Info => tracing::info!("{}", message),
            Severity::Warn => tracing::warn!("{}", message),
        }
    }
}

/// Keeps every event in emission order
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ConvertEvent>>,
}

impl RecordingSink {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<ConvertEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: ConvertEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

/// Sends each event to two sinks
pub struct Tee<A, B>(pub A, pub B);

impl<A: EventSink, B: EventSink> EventSink for Tee<A, B> {
    fn emit(&self, event: ConvertEvent) {
        self.0.emit(event.clone());
        self.1.emit(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_severity_mapping() {
        assert_eq!(
            ConvertEvent::Ignored {
                name: "x".into(),
                reason: Rejection::NotSessionExport
            }
            .severity(),
            Severity::Debug
        );
        assert_eq!(
            ConvertEvent::DirectoryMissing {
                path: "/x".into(),
                error: "gone".into()
            }
            .severity(),
            Severity::Warn
        );
        assert_eq!(
            ConvertEvent::BatchComplete { succeeded: 1, failed: 0 }.severity(),
            Severity::Info
        );
    }

    #[test]
    fn test_messages() {
        let key = SessionKey::new("/export", "v2-users-1-training-sessions-42");
        assert_eq!(
            ConvertEvent::ParseFailed { session: key }.message(),
            "failed to parse /export/v2-users-1-training-sessions-42"
        );
        assert_eq!(
            ConvertEvent::WriteFailed {
                format: ExportFormat::Hrm,
                path: "/export/a.hrm".into()
            }
            .message(),
            "failed to write HRM"
        );
        assert_eq!(
            ConvertEvent::BatchComplete { succeeded: 3, failed: 1 }.message(),
            "3 succeeded, 1 failed."
        );
    }

    #[test]
    fn test_recording_sink_keeps_order() {
        let sink = RecordingSink::new();
        sink.emit(ConvertEvent::NothingToConvert);
        sink.emit(ConvertEvent::BatchComplete { succeeded: 0, failed: 0 });
        assert_eq!(
            sink.events(),
            vec![
                ConvertEvent::NothingToConvert,
                ConvertEvent::BatchComplete { succeeded: 0, failed: 0 },
            ]
        );
    }

    #[test]
    fn test_messages_carry_reason() {
        let ignored = ConvertEvent::Ignored {
            name: "v2-users-1-training-sessions-42.gpx".into(),
            reason: Rejection::OutputArtifact,
        };
        assert_eq!(
            ignored.message(),
            "ignoring v2-users-1-training-sessions-42.gpx (previous output)"
        );

        let missing = ConvertEvent::DirectoryMissing {
            path: "/export".into(),
            error: "permission denied".into(),
        };
        assert_eq!(missing.message(), "data dir not found /export: permission denied");
    }

    #[test]
    fn test_ignored_json_shape() {
        let json = serde_json::to_string(&ConvertEvent::Ignored {
            name: "readme.txt".into(),
            reason: Rejection::NotSessionExport,
        })
        .unwrap();
        assert_eq!(
            json,
            r#"{"event":"ignored","name":"readme.txt","reason":"not_session_export"}"#
        );
    }

    #[test]
    fn test_tee_sends_to_both() {
        let a = RecordingSink::new();
        let b = RecordingSink::new();
        Tee(&a, &b).emit(ConvertEvent::NothingToConvert);
        assert_eq!(a.events(), b.events());
        assert_eq!(a.events().len(), 1);
    }

    #[test]
    fn test_event_json_shape() {
        let json = serde_json::to_string(&ConvertEvent::BatchComplete {
            succeeded: 2,
            failed: 0,
        })
        .unwrap();
        assert_eq!(json, r#"{"event":"batch_complete","succeeded":2,"failed":0}"#);
    }
}
