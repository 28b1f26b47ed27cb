//! Destinations for rendered reports.
//!
//! # Responsibility
//! - Define the [`ReportSink`] seam between rendering and publication.
//! - Provide filesystem, SQLite archive and in-memory sinks.
//!
//! # Invariants
//! - Report names are bare file names: no separators, no `..`, never empty.
//! - A fan-out sink writes members in order and stops at the first failure.

use crate::db::DbError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod archive;
pub mod file;
pub mod memory;

pub use archive::{ArchivedReport, ArchivedRun, SqliteReportArchive};
pub use file::FileReportSink;
pub use memory::MemoryReportSink;

/// Result type used by sink operations.
pub type SinkResult<T> = Result<T, SinkError>;

/// Errors from report sinks.
#[derive(Debug)]
pub enum SinkError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Db(DbError),
    /// Name is empty or would escape the sink's directory.
    InvalidReportName(String),
    /// Stored archive row could not be decoded.
    InvalidData(String),
}

impl Display for SinkError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to write `{path}`: {source}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidReportName(name) => write!(f, "invalid report name `{name}`"),
            Self::InvalidData(message) => write!(f, "invalid archived report: {message}"),
        }
    }
}

impl Error for SinkError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Db(err) => Some(err),
            Self::InvalidReportName(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for SinkError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for SinkError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Receives finished reports by name.
pub trait ReportSink {
    fn write_report(&mut self, name: &str, content: &str) -> SinkResult<()>;
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn write_report(&mut self, name: &str, content: &str) -> SinkResult<()> {
        (**self).write_report(name, content)
    }
}

impl<S: ReportSink + ?Sized> ReportSink for Box<S> {
    fn write_report(&mut self, name: &str, content: &str) -> SinkResult<()> {
        (**self).write_report(name, content)
    }
}

impl<'a> ReportSink for Vec<Box<dyn ReportSink + 'a>> {
    fn write_report(&mut self, name: &str, content: &str) -> SinkResult<()> {
        for sink in self.iter_mut() {
            sink.write_report(name, content)?;
        }
        Ok(())
    }
}

/// Rejects names that are empty or could address another directory.
pub fn validate_report_name(name: &str) -> SinkResult<()> {
    let invalid = name.trim().is_empty()
        || name.contains("..")
        || name.contains(['/', '\\', '\0'])
        || name.contains(':');
    if invalid {
        return Err(SinkError::InvalidReportName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{validate_report_name, MemoryReportSink, ReportSink, SinkError, SinkResult};

    struct FailingSink;

    impl ReportSink for FailingSink {
        fn write_report(&mut self, name: &str, _content: &str) -> SinkResult<()> {
            Err(SinkError::InvalidReportName(name.to_string()))
        }
    }

    #[test]
    fn report_names_are_bare_file_names() {
        assert!(validate_report_name("fullreport.txt").is_ok());
        assert!(validate_report_name("FullReport.html").is_ok());
        for bad in ["", "  ", "../x.txt", "a/b.txt", "a\\b.txt", "c:report.txt"] {
            assert!(validate_report_name(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn fan_out_writes_every_member_in_order() {
        let mut first = MemoryReportSink::default();
        let mut second = MemoryReportSink::default();
        {
            let mut sinks: Vec<Box<dyn ReportSink + '_>> =
                vec![Box::new(&mut first), Box::new(&mut second)];
            sinks.write_report("a.txt", "one").unwrap();
        }
        assert_eq!(first.get("a.txt"), Some("one"));
        assert_eq!(second.get("a.txt"), Some("one"));
    }

    #[test]
    fn fan_out_stops_at_first_failure() {
        let mut before = MemoryReportSink::default();
        let mut after = MemoryReportSink::default();
        {
            let mut sinks: Vec<Box<dyn ReportSink + '_>> = vec![
                Box::new(&mut before),
                Box::new(FailingSink),
                Box::new(&mut after),
            ];
            let err = sinks.write_report("a.txt", "one").unwrap_err();
            assert!(matches!(err, SinkError::InvalidReportName(_)));
        }
        assert_eq!(before.len(), 1);
        assert!(after.is_empty());
    }
}
