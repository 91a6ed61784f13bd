//! Session parser backed by a converter process

use super::ConverterCommand;
use bipolar_core::config::ConverterConfig;
use bipolar_core::export::{ParserFactory, SessionParser};
use bipolar_core::types::{ExportFormat, SessionKey};
use std::ffi::OsString;
use std::path::Path;

/// Parser for one session that shells out to the converter
///
/// `parse` runs `<program> [args..] parse <session>`; each writer runs
/// `<program> [args..] <format> <session> <output>`.
pub struct CommandParser {
    command: ConverterCommand,
    session: SessionKey,
    parsed: bool,
}

impl CommandParser {
    /// Bind a parser to `session`
    pub fn new(command: ConverterCommand, session: SessionKey) -> Self {
        Self {
            command,
            session,
            parsed: false,
        }
    }

    fn write_format(&self, format: ExportFormat, path: &Path) -> bool {
        if !self.parsed {
            tracing::warn!("{} written before {} was parsed", format, self.session);
            return false;
        }

        let args: [OsString; 3] = [
            format.extension().into(),
            self.session.as_path().into(),
            path.into(),
        ];
        self.command.run_ok(args)
    }
}

impl SessionParser for CommandParser {
    fn parse(&mut self) -> bool {
        let args: [OsString; 2] = ["parse".into(), self.session.as_path().into()];
        self.parsed = self.command.run_ok(args);
        self.parsed
    }

    fn write_gpx(&self, path: &Path) -> bool {
        self.write_format(ExportFormat::Gpx, path)
    }

    fn write_hrm(&self, path: &Path) -> bool {
        self.write_format(ExportFormat::Hrm, path)
    }

    fn write_tcx(&self, path: &Path) -> bool {
        self.write_format(ExportFormat::Tcx, path)
    }
}

/// Creates a [`CommandParser`] per session
#[derive(Debug, Clone)]
pub struct CommandParserFactory {
    command: ConverterCommand,
}

impl CommandParserFactory {
    /// Create a factory for `command`
    pub fn new(command: ConverterCommand) -> Self {
        Self { command }
    }

    /// Build from configuration
    pub fn from_config(config: &ConverterConfig) -> Self {
        Self::new(ConverterCommand::from_config(config))
    }
}

impl ParserFactory for CommandParserFactory {
    type Parser = CommandParser;

    fn create(&self, key: &SessionKey) -> CommandParser {
        CommandParser::new(self.command.clone(), key.clone())
    }
}
