//! Session parser contract

use crate::types::{ExportFormat, SessionKey};
use std::path::Path;

/// Decoder and writer for one training session
///
/// Every call reports success as a plain `bool`; failures are expected to be
/// logged by the implementation.
pub trait SessionParser {
    /// Read and decode all files belonging to the session
    fn parse(&mut self) -> bool;

    /// Write the session as GPX
    fn write_gpx(&self, path: &Path) -> bool;

    /// Write the session as HRM
    fn write_hrm(&self, path: &Path) -> bool;

    /// Write the session as TCX
    fn write_tcx(&self, path: &Path) -> bool;

    /// Write the session in `format`
    fn write(&self, format: ExportFormat, path: &Path) -> bool {
        match format {
            ExportFormat::Gpx => self.write_gpx(path),
            ExportFormat::Hrm => self.write_hrm(path),
            ExportFormat::Tcx => self.write_tcx(path),
        }
    }
}

impl<P: SessionParser + ?Sized> SessionParser for Box<P> {
    fn parse(&mut self) -> bool {
        (**self).parse()
    }

    fn write_gpx(&self, path: &Path) -> bool {
        (**self).write_gpx(path)
    }

    fn write_hrm(&self, path: &Path) -> bool {
        (**self).write_hrm(path)
    }

    fn write_tcx(&self, path: &Path) -> bool {
        (**self).write_tcx(path)
    }
}

/// Creates one fresh parser per session
pub trait ParserFactory {
    /// Parser type produced
    type Parser: SessionParser;

    /// Bind a new parser to `key`
    fn create(&self, key: &SessionKey) -> Self::Parser;
}

impl<F, P> ParserFactory for F
where
    F: Fn(&SessionKey) -> P,
    P: SessionParser,
{
    type Parser = P;

    fn create(&self, key: &SessionKey) -> P {
        self(key)
    }
}
