//! Report cycle service.
//!
//! # Responsibility
//! - Fetch a fresh hierarchy snapshot, classify it and render the requested
//!   reports.
//! - Hand every rendered document to the configured sink.
//!
//! # Invariants
//! - Each run rebuilds the model from the provider; nothing is cached.
//! - Rendering finishes before the first sink write, so a markup failure
//!   never leaves a partial set of reports behind.
//! - Sink writes happen in render order and stop at the first failure.

use crate::config::AppConfig;
use crate::missing::lookahead_dates;
use crate::model::{load_notebooks, BuildContext, ModelError, Notebook};
use crate::provider::HierarchyProvider;
use crate::render::full::{full_html, full_text};
use crate::render::missing::{missing_html, missing_text};
use crate::render::status::status_reports;
use crate::render::{
    RenderedReport, FULL_HTML_NAME, FULL_TEXT_NAME, MISSING_HTML_NAME, MISSING_TEXT_NAME,
};
use crate::report::html_writer::HtmlWriterError;
use crate::sink::{ReportSink, SinkError};
use chrono::{DateTime, FixedOffset};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::time::Instant;

/// Result type used by report runs.
pub type ServiceResult<T> = Result<T, ReportServiceError>;

/// Errors from one report run.
#[derive(Debug)]
pub enum ReportServiceError {
    Model(ModelError),
    Html(HtmlWriterError),
    Sink(SinkError),
}

impl Display for ReportServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model(err) => write!(f, "failed to build notebooks: {err}"),
            Self::Html(err) => write!(f, "failed to render html: {err}"),
            Self::Sink(err) => write!(f, "failed to publish report: {err}"),
        }
    }
}

impl Error for ReportServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            Self::Html(err) => Some(err),
            Self::Sink(err) => Some(err),
        }
    }
}

impl From<ModelError> for ReportServiceError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

impl From<HtmlWriterError> for ReportServiceError {
    fn from(value: HtmlWriterError) -> Self {
        Self::Html(value)
    }
}

impl From<SinkError> for ReportServiceError {
    fn from(value: SinkError) -> Self {
        Self::Sink(value)
    }
}

/// Which reports a run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportKind {
    Full,
    Status,
    Missing,
    All,
}

impl ReportKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Status => "status",
            Self::Missing => "missing",
            Self::All => "all",
        }
    }

    fn includes(self, other: ReportKind) -> bool {
        self == ReportKind::All || self == other
    }
}

impl Display for ReportKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(Self::Full),
            "status" => Ok(Self::Status),
            "missing" => Ok(Self::Missing),
            "all" => Ok(Self::All),
            other => Err(format!(
                "unknown report kind `{other}`; expected full|status|missing|all"
            )),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportSummary {
    pub kind: ReportKind,
    pub notebook_count: usize,
    /// Names of written reports, in write order.
    pub report_names: Vec<String>,
    pub total_bytes: usize,
}

/// Runs report cycles against one provider and one sink.
pub struct ReportService<P: HierarchyProvider, S: ReportSink> {
    provider: P,
    sink: S,
    config: AppConfig,
}

impl<P: HierarchyProvider, S: ReportSink> ReportService<P, S> {
    pub fn new(provider: P, sink: S, config: AppConfig) -> Self {
        Self {
            provider,
            sink,
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }

    /// Builds every non-excluded notebook from a fresh snapshot.
    pub fn load(&self, now: DateTime<FixedOffset>) -> ServiceResult<Vec<Notebook>> {
        let ctx = BuildContext::new(&self.provider, &self.config.classifier, now);
        Ok(load_notebooks(
            &ctx,
            &self.config.report.excluded_notebook_marker,
        )?)
    }

    /// Renders the reports of `kind` without publishing them.
    pub fn render(
        &self,
        kind: ReportKind,
        notebooks: &[Notebook],
        now: DateTime<FixedOffset>,
    ) -> ServiceResult<Vec<RenderedReport>> {
        let report = &self.config.report;
        let mut reports = Vec::new();

        if kind.includes(ReportKind::Full) {
            reports.push(RenderedReport::new(FULL_TEXT_NAME, full_text(notebooks)));
            reports.push(RenderedReport::new(
                FULL_HTML_NAME,
                full_html(notebooks, now)?,
            ));
        }
        if kind.includes(ReportKind::Status) {
            reports.extend(status_reports(
                notebooks,
                &report.unreviewed_tag_marker,
                now,
            )?);
        }
        if kind.includes(ReportKind::Missing) {
            let dates = lookahead_dates(now.date_naive(), report.missing_assignment_lookahead);
            reports.push(RenderedReport::new(
                MISSING_TEXT_NAME,
                missing_text(notebooks, &dates),
            ));
            reports.push(RenderedReport::new(
                MISSING_HTML_NAME,
                missing_html(notebooks, &dates, now)?,
            ));
        }
        Ok(reports)
    }

    /// Runs one full cycle: load, render, publish.
    ///
    /// The local date of `now` is the first lookahead day.
    pub fn run(
        &mut self,
        kind: ReportKind,
        now: DateTime<FixedOffset>,
    ) -> ServiceResult<ReportSummary> {
        let started_at = Instant::now();
        info!("event=report_run module=service status=start kind={kind}");

        let result = self.run_inner(kind, now);
        match &result {
            Ok(summary) => info!(
                "event=report_run module=service status=ok kind={kind} notebooks={} reports={} bytes={} duration_ms={}",
                summary.notebook_count,
                summary.report_names.len(),
                summary.total_bytes,
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=report_run module=service status=error kind={kind} duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        result
    }

    fn run_inner(
        &mut self,
        kind: ReportKind,
        now: DateTime<FixedOffset>,
    ) -> ServiceResult<ReportSummary> {
        let notebooks = self.load(now)?;
        let reports = self.render(kind, &notebooks, now)?;

        let mut summary = ReportSummary {
            kind,
            notebook_count: notebooks.len(),
            report_names: Vec::with_capacity(reports.len()),
            total_bytes: 0,
        };
        for report in reports {
            self.sink.write_report(&report.name, &report.content)?;
            summary.total_bytes += report.content.len();
            summary.report_names.push(report.name);
        }
        Ok(summary)
    }
}
