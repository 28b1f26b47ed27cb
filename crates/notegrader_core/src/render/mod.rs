//! Text and HTML renderers for every report.
//!
//! # Responsibility
//! - Turn classified notebooks into named report documents.
//! - Keep every layout decision (class names, date formats, padding) here.
//!
//! # Invariants
//! - Renderers are pure: same notebooks and clock give the same output.
//! - Each HTML document is rendered from a balanced writer.

use crate::report::html_writer::{HtmlResult, HtmlWriter};
use chrono::{DateTime, FixedOffset, NaiveDate};

pub mod full;
pub mod missing;
pub mod status;

pub use status::StatusKind;

/// Class prefix of the full report.
pub const FULL_REPORT_PREFIX: &str = "fullReport";
/// Class prefix of the status reports.
pub const STATUS_REPORT_PREFIX: &str = "statusReport";
/// Class prefix of the missing-assignment report.
pub const MISSING_ASSIGNMENT_PREFIX: &str = "missingAssignment";

pub const FULL_TEXT_NAME: &str = "fullreport.txt";
pub const FULL_HTML_NAME: &str = "FullReport.html";
pub const MISSING_TEXT_NAME: &str = "missingassignmentreport.txt";
pub const MISSING_HTML_NAME: &str = "MissingAssignmentReport.html";

/// A named, fully rendered report ready for a sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedReport {
    pub name: String,
    pub content: String,
}

impl RenderedReport {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// `MM/DD/YYYY`, used for page dates and lookahead days.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%m/%d/%Y").to_string()
}

/// Unprefixed "Last updated" banner shown atop every HTML report.
pub fn last_updated_html(now: DateTime<FixedOffset>) -> HtmlResult<HtmlWriter> {
    let mut html = HtmlWriter::new();
    html.open_tag("div", "reportLastUpdated")?
        .append_element(
            "p",
            "reportLastUpdatedText",
            &format!("Last updated {}", now.format("%-m/%-d %-I:%M %p")),
        )?
        .close_tag();
    Ok(html)
}

/// Opens the shared `Container` div and writes the banner into it.
///
/// The caller closes the container.
pub(crate) fn open_container(prefix: &str, now: DateTime<FixedOffset>) -> HtmlResult<HtmlWriter> {
    let banner = last_updated_html(now)?;
    let mut html = HtmlWriter::with_class_prefix(prefix);
    html.open_tag("div", "Container")?.append_html(&banner)?;
    Ok(html)
}
