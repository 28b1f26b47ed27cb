//! `notegrader` command line entry point.
//!
//! # Responsibility
//! - Parse arguments, load config and start logging.
//! - Wire the export provider and sinks into one report run.
//! - Map failures to a non-zero exit code with the full error chain.

use chrono::Local;
use clap::Parser;
use log::info;
use notegrader_core::{
    init_logging, AppConfig, FileReportSink, LogSettings, ReportKind, ReportService, ReportSink,
    SqliteReportArchive, XmlExportProvider,
};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Grade-status and missing-assignment reports from a notebook export.
#[derive(Debug, Parser)]
#[command(name = "notegrader", version, about)]
struct Cli {
    /// Export directory holding `hierarchy.xml` and `pages/`.
    #[arg(long, value_name = "DIR")]
    export: PathBuf,

    /// Output directory; reports are written under `<DIR>/reports`.
    #[arg(long, value_name = "DIR")]
    out: PathBuf,

    /// JSON config overriding classifier and report defaults.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// SQLite file that additionally archives every written report.
    #[arg(long, value_name = "FILE")]
    archive: Option<PathBuf>,

    /// Directory for rolling log files. Logging is off without it.
    #[arg(long, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    /// trace, debug, info, warn or error.
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Which reports to produce: full, status, missing or all.
    #[arg(value_name = "KIND")]
    kind: ReportKind,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", error_chain(err.as_ref()));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    if let Some(log_dir) = &cli.log_dir {
        let level = cli
            .log_level
            .as_deref()
            .unwrap_or_else(|| notegrader_core::default_log_level());
        let settings = LogSettings::new(level, absolute(log_dir)?).with_stderr_echo(true);
        init_logging(&settings)?;
    }

    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    let mut sinks: Vec<Box<dyn ReportSink>> = vec![Box::new(FileReportSink::new(&cli.out))];
    if let Some(path) = &cli.archive {
        sinks.push(Box::new(SqliteReportArchive::open(path)?));
    }

    let provider = XmlExportProvider::new(&cli.export);
    let mut service = ReportService::new(provider, sinks, config);
    // Dates and the "Last updated" banner follow the machine's wall clock.
    let summary = service.run(cli.kind, Local::now().fixed_offset())?;

    info!(
        "event=cli_done module=cli status=ok kind={} reports={}",
        summary.kind,
        summary.report_names.len()
    );
    println!(
        "wrote {} report(s) for {} notebook(s) to {}",
        summary.report_names.len(),
        summary.notebook_count,
        cli.out.join("reports").display()
    );
    Ok(())
}

fn absolute(path: &Path) -> Result<PathBuf, Box<dyn Error>> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    Ok(std::env::current_dir()?.join(path))
}

/// `outer: inner: innermost`, following `source()` links.
fn error_chain(err: &dyn Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(inner) = source {
        let text = inner.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = inner.source();
    }
    message
}
