//! Filesystem sink writing reports under an output directory.
//!
//! Text reports land in `<root>/reports/`, HTML reports in
//! `<root>/reports/html/`. Existing files are overwritten.

use crate::sink::{validate_report_name, ReportSink, SinkError, SinkResult};
use log::{error, info};
use std::path::{Path, PathBuf};

/// Sub-directory of the output root holding all reports.
pub const REPORTS_DIR_NAME: &str = "reports";
/// Sub-directory of [`REPORTS_DIR_NAME`] holding HTML reports.
pub const HTML_DIR_NAME: &str = "html";

#[derive(Debug, Clone)]
pub struct FileReportSink {
    root: PathBuf,
}

impl FileReportSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Destination of a report called `name`.
    pub fn report_path(&self, name: &str) -> SinkResult<PathBuf> {
        validate_report_name(name)?;
        let reports = self.root.join(REPORTS_DIR_NAME);
        let dir = if is_html_name(name) {
            reports.join(HTML_DIR_NAME)
        } else {
            reports
        };
        Ok(dir.join(name))
    }
}

impl ReportSink for FileReportSink {
    fn write_report(&mut self, name: &str, content: &str) -> SinkResult<()> {
        let path = self.report_path(name)?;
        let result = path
            .parent()
            .map_or(Ok(()), std::fs::create_dir_all)
            .and_then(|()| std::fs::write(&path, content));

        match result {
            Ok(()) => {
                info!(
                    "event=report_write module=sink status=ok sink=file report={name} bytes={}",
                    content.len()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=report_write module=sink status=error sink=file report={name} error={err}"
                );
                Err(SinkError::Io {
                    path: path.display().to_string(),
                    source: err,
                })
            }
        }
    }
}

fn is_html_name(name: &str) -> bool {
    Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("html") || ext.eq_ignore_ascii_case("htm"))
}
