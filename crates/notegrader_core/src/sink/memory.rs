//! Sink collecting reports in memory.

use crate::sink::{validate_report_name, ReportSink, SinkResult};

/// Keeps every written report in write order; later writes of a name win on lookup.
#[derive(Debug, Clone, Default)]
pub struct MemoryReportSink {
    reports: Vec<(String, String)>,
}

impl MemoryReportSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent content written under `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.reports
            .iter()
            .rev()
            .find(|(stored, _)| stored == name)
            .map(|(_, content)| content.as_str())
    }

    /// Report names in write order, repeats included.
    pub fn names(&self) -> Vec<&str> {
        self.reports.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl ReportSink for MemoryReportSink {
    fn write_report(&mut self, name: &str, content: &str) -> SinkResult<()> {
        validate_report_name(name)?;
        self.reports.push((name.to_string(), content.to_string()));
        Ok(())
    }
}
