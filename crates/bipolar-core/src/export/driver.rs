//! Batch export driver

use super::parser::{ParserFactory, SessionParser};
use super::report::{BatchReport, BatchReporter, FormatOutcome, SessionOutcome};
use crate::events::{ConvertEvent, EventSink};
use crate::fs::ExportDirectory;
use crate::types::{ExportFormat, SessionKey};
use chrono::Utc;

/// Export policy fixed for a driver's lifetime
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExportOptions {
    /// Replace outputs that already exist
    pub overwrite: bool,
}

/// Hook run after each session, before the next one starts
pub type YieldHook<'a> = Box<dyn FnMut(&SessionKey) + 'a>;

/// Drives parsing and per-format export for a list of sessions
///
/// Sessions run strictly in order, one parser at a time. A failed parse
/// skips only that session; a failed write skips only that format.
pub struct ExportDriver<'a> {
    options: ExportOptions,
    fs: &'a dyn ExportDirectory,
    sink: &'a dyn EventSink,
    yield_hook: Option<YieldHook<'a>>,
}

impl<'a> ExportDriver<'a> {
    /// Create a driver with default options
    pub fn new(fs: &'a dyn ExportDirectory, sink: &'a dyn EventSink) -> Self {
        Self {
            options: ExportOptions::default(),
            fs,
            sink,
            yield_hook: None,
        }
    }

    /// Set export options
    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Install a hook invoked between sessions
    pub fn on_yield(mut self, hook: impl FnMut(&SessionKey) + 'a) -> Self {
        self.yield_hook = Some(Box::new(hook));
        self
    }

    /// Current options
    pub fn options(&self) -> ExportOptions {
        self.options
    }

    /// Export every session in `sessions`
    pub fn export_all<F: ParserFactory>(
        &mut self,
        sessions: &[SessionKey],
        factory: &F,
    ) -> BatchReport {
        let started_at = Utc::now();
        let mut reporter = BatchReporter::new();
        let mut outcomes = Vec::with_capacity(sessions.len());

        for session in sessions {
            let outcome = self.export_session(session, factory);
            reporter.record(&outcome);
            outcomes.push(outcome);

            if let Some(hook) = self.yield_hook.as_mut() {
                hook(session);
            }
        }

        let result = reporter.result();
        self.sink.emit(ConvertEvent::BatchComplete {
            succeeded: result.succeeded,
            failed: result.failed,
        });

        BatchReport {
            sessions: outcomes,
            result,
            skipped: reporter.skipped(),
            started_at,
            finished_at: Utc::now(),
        }
    }

    /// Parse one session and write each format
    pub fn export_session<F: ParserFactory>(
        &self,
        session: &SessionKey,
        factory: &F,
    ) -> SessionOutcome {
        self.sink.emit(ConvertEvent::Converting {
            session: session.clone(),
        });

        let mut parser = factory.create(session);
        if !parser.parse() {
            self.sink.emit(ConvertEvent::ParseFailed {
                session: session.clone(),
            });
            return SessionOutcome::ParseFailed {
                session: session.clone(),
            };
        }

        let formats = ExportFormat::ALL
            .iter()
            .map(|&format| (format, self.export_format(&parser, session, format)))
            .collect();

        SessionOutcome::Exported {
            session: session.clone(),
            formats,
        }
    }

    fn export_format<P: SessionParser>(
        &self,
        parser: &P,
        session: &SessionKey,
        format: ExportFormat,
    ) -> FormatOutcome {
        let path = session.output_path(format);

        if !self.options.overwrite && self.fs.exists(&path) {
            self.sink.emit(ConvertEvent::WriteSkippedExists { path });
            return FormatOutcome::SkippedExists;
        }

        if parser.write(format, &path) {
            self.sink.emit(ConvertEvent::WriteSucceeded { format, path });
            FormatOutcome::Written
        } else {
            self.sink.emit(ConvertEvent::WriteFailed { format, path });
            FormatOutcome::Failed
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::RecordingSink;
    use crate::export::report::BatchResult;
    use crate::fs::memory::MemoryDirectory;
    use pretty_assertions::assert_eq;
    use std::cell::RefCell;
    use std::collections::HashSet;
    use std::path::{Path, PathBuf};
    use std::rc::Rc;

    /// One call made on a fake parser
    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Call {
        Parse(String),
        Gpx(PathBuf),
        Hrm(PathBuf),
        Tcx(PathBuf),
    }

    /// Scripted parser behaviour shared by every parser a factory makes
    #[derive(Default)]
    struct Script {
        unparseable: HashSet<String>,
        failing: HashSet<ExportFormat>,
        calls: RefCell<Vec<Call>>,
    }

    struct FakeParser {
        key: SessionKey,
        script: Rc<Script>,
        fs: Rc<MemoryDirectory>,
    }

    impl FakeParser {
        fn write_as(&self, format: ExportFormat, path: &Path, call: Call) -> bool {
            self.script.calls.borrow_mut().push(call);
            if self.script.failing.contains(&format) {
                return false;
            }
            self.fs.add(path);
            true
        }
    }

    impl SessionParser for FakeParser {
        fn parse(&mut self) -> bool {
            let prefix = self.key.prefix();
            self.script.calls.borrow_mut().push(Call::Parse(prefix.clone()));
            !self.script.unparseable.contains(&prefix)
        }

        fn write_gpx(&self, path: &Path) -> bool {
            self.write_as(ExportFormat::Gpx, path, Call::Gpx(path.to_path_buf()))
        }

        fn write_hrm(&self, path: &Path) -> bool {
            self.write_as(ExportFormat::Hrm, path, Call::Hrm(path.to_path_buf()))
        }

        fn write_tcx(&self, path: &Path) -> bool {
            self.write_as(ExportFormat::Tcx, path, Call::Tcx(path.to_path_buf()))
        }
    }

    fn key(id: &str) -> SessionKey {
        SessionKey::new("/export", &format!("v2-users-1-training-sessions-{}", id))
    }

    fn factory(
        script: &Rc<Script>,
        fs: &Rc<MemoryDirectory>,
    ) -> impl Fn(&SessionKey) -> FakeParser {
        let script = Rc::clone(script);
        let fs = Rc::clone(fs);
        move |key: &SessionKey| FakeParser {
            key: key.clone(),
            script: Rc::clone(&script),
            fs: Rc::clone(&fs),
        }
    }

    #[test]
    fn test_writes_all_formats() {
        let fs = Rc::new(MemoryDirectory::with_entries("/export", &[]));
        let script = Rc::new(Script::default());
        let sink = RecordingSink::new();

        let report = ExportDriver::new(&*fs, &sink)
            .export_all(&[key("1")], &factory(&script, &fs));

        assert_eq!(report.result, BatchResult { succeeded: 3, failed: 0 });
        for format in ExportFormat::ALL {
            assert!(fs.exists(&key("1").output_path(format)));
        }
        assert_eq!(
            sink.events().last(),
            Some(&ConvertEvent::BatchComplete { succeeded: 3, failed: 0 })
        );
    }

    #[test]
    fn test_hrm_output_uses_hrm_writer() {
        // The legacy tool sent the .hrm path through the GPX writer.
        let fs = Rc::new(MemoryDirectory::with_entries("/export", &[]));
        let script = Rc::new(Script::default());
        let sink = RecordingSink::new();

        ExportDriver::new(&*fs, &sink).export_all(&[key("1")], &factory(&script, &fs));

        let hrm = key("1").output_path(ExportFormat::Hrm);
        let calls = script.calls.borrow();
        assert!(calls.contains(&Call::Hrm(hrm.clone())));
        assert!(!calls.contains(&Call::Gpx(hrm)));
    }

    #[test]
    fn test_parse_failure_skips_session_only() {
        let fs = Rc::new(MemoryDirectory::with_entries("/export", &[]));
        let mut script = Script::default();
        script.unparseable.insert(key("1").prefix());
        let script = Rc::new(script);
        let sink = RecordingSink::new();

        let report = ExportDriver::new(&*fs, &sink)
            .export_all(&[key("1"), key("2")], &factory(&script, &fs));

        assert_eq!(report.result, BatchResult { succeeded: 3, failed: 1 });
        assert_eq!(
            report.sessions[0],
            SessionOutcome::ParseFailed { session: key("1") }
        );
        for format in ExportFormat::ALL {
            assert!(!fs.exists(&key("1").output_path(format)));
            assert!(fs.exists(&key("2").output_path(format)));
        }
        assert!(sink
            .events()
            .contains(&ConvertEvent::ParseFailed { session: key("1") }));
    }

    #[test]
    fn test_gpx_failure_does_not_block_other_formats() {
        let fs = Rc::new(MemoryDirectory::with_entries("/export", &[]));
        let mut script = Script::default();
        script.failing.insert(ExportFormat::Gpx);
        let script = Rc::new(script);
        let sink = RecordingSink::new();

        let report = ExportDriver::new(&*fs, &sink)
            .export_all(&[key("1")], &factory(&script, &fs));

        assert_eq!(report.result, BatchResult { succeeded: 2, failed: 1 });
        assert_eq!(
            report.sessions[0],
            SessionOutcome::Exported {
                session: key("1"),
                formats: vec![
                    (ExportFormat::Gpx, FormatOutcome::Failed),
                    (ExportFormat::Hrm, FormatOutcome::Written),
                    (ExportFormat::Tcx, FormatOutcome::Written),
                ],
            }
        );
    }

    #[test]
    fn test_second_run_skips_everything() {
        let fs = Rc::new(MemoryDirectory::with_entries("/export", &[]));
        let script = Rc::new(Script::default());
        let sessions = [key("1"), key("2")];

        let first_sink = RecordingSink::new();
        let first = ExportDriver::new(&*fs, &first_sink)
            .export_all(&sessions, &factory(&script, &fs));
        assert_eq!(first.result, BatchResult { succeeded: 6, failed: 0 });

        let writes_before = script.calls.borrow().len();
        let second_sink = RecordingSink::new();
        let second = ExportDriver::new(&*fs, &second_sink)
            .export_all(&sessions, &factory(&script, &fs));

        assert_eq!(second.result, BatchResult::default());
        assert_eq!(second.skipped, 6);
        // Only the two parse calls were added.
        assert_eq!(script.calls.borrow().len(), writes_before + 2);
        let skips = second_sink
            .events()
            .into_iter()
            .filter(|e| matches!(e, ConvertEvent::WriteSkippedExists { .. }))
            .count();
        assert_eq!(skips, 6);
    }

    #[test]
    fn test_existing_output_counts_as_neither() {
        let fs = Rc::new(MemoryDirectory::with_entries("/export", &[]));
        fs.add(key("1").output_path(ExportFormat::Tcx));
        let script = Rc::new(Script::default());
        let sink = RecordingSink::new();

        let report = ExportDriver::new(&*fs, &sink)
            .export_all(&[key("1")], &factory(&script, &fs));

        assert_eq!(report.result, BatchResult { succeeded: 2, failed: 0 });
        assert_eq!(report.skipped, 1);
        assert!(!script
            .calls
            .borrow()
            .iter()
            .any(|c| matches!(c, Call::Tcx(_))));
    }

    #[test]
    fn test_overwrite_replaces_existing_output() {
        let fs = Rc::new(MemoryDirectory::with_entries("/export", &[]));
        fs.add(key("1").output_path(ExportFormat::Gpx));
        let script = Rc::new(Script::default());
        let sink = RecordingSink::new();

        let report = ExportDriver::new(&*fs, &sink)
            .with_options(ExportOptions { overwrite: true })
            .export_all(&[key("1")], &factory(&script, &fs));

        assert_eq!(report.result, BatchResult { succeeded: 3, failed: 0 });
        assert_eq!(report.skipped, 0);
    }

    #[test]
    fn test_default_options_do_not_overwrite() {
        let fs = MemoryDirectory::new();
        let sink = RecordingSink::new();
        assert!(!ExportDriver::new(&fs, &sink).options().overwrite);
    }

    #[test]
    fn test_sessions_processed_in_order_with_yield() {
        let fs = Rc::new(MemoryDirectory::with_entries("/export", &[]));
        let script = Rc::new(Script::default());
        let sink = RecordingSink::new();
        let yielded = RefCell::new(Vec::new());
        let sessions = [key("3"), key("1"), key("2")];

        ExportDriver::new(&*fs, &sink)
            .on_yield(|session| yielded.borrow_mut().push(session.prefix()))
            .export_all(&sessions, &factory(&script, &fs));

        let parsed: Vec<_> = script
            .calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Parse(prefix) => Some(prefix.clone()),
                _ => None,
            })
            .collect();
        let expected: Vec<_> = sessions.iter().map(|k| k.prefix()).collect();
        assert_eq!(parsed, expected);
        assert_eq!(yielded.into_inner(), expected);
    }

    #[test]
    fn test_empty_batch_reports_zero() {
        let fs = MemoryDirectory::new();
        let sink = RecordingSink::new();
        let report = ExportDriver::new(&fs, &sink)
            .export_all(&[], &|_: &SessionKey| -> Box<dyn SessionParser> { unreachable!() });

        assert_eq!(report.result, BatchResult::default());
        assert_eq!(
            sink.events(),
            vec![ConvertEvent::BatchComplete { succeeded: 0, failed: 0 }]
        );
    }
}
