//! Core logic for notegrader.
//!
//! Builds a classified model of student notebooks from a hierarchy provider,
//! detects missing assignments and renders text and HTML reports into sinks.
//! This crate is the single source of truth for classification rules.

pub mod classify;
pub mod config;
pub mod db;
pub mod geometry;
pub mod logging;
pub mod missing;
pub mod model;
pub mod provider;
pub mod render;
pub mod report;
pub mod service;
pub mod sink;

pub use classify::ClassifierConfig;
pub use config::{AppConfig, ConfigError, ReportConfig};
pub use logging::{default_log_level, init_logging, logging_status, LogSettings};
pub use model::subject::Subject;
pub use model::{load_notebooks, BuildContext, ModelError, Notebook};
pub use provider::{
    HierarchyProvider, MemoryHierarchyProvider, ProviderError, XmlExportProvider,
};
pub use report::html_writer::{HtmlWriter, HtmlWriterError};
pub use report::indenter::Indenter;
pub use service::report_service::{
    ReportKind, ReportService, ReportServiceError, ReportSummary,
};
pub use sink::{
    FileReportSink, MemoryReportSink, ReportSink, SinkError, SqliteReportArchive,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
