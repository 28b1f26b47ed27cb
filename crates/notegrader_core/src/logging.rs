//! Process-wide logging for report runs.
//!
//! # Responsibility
//! - Start a rolling file logger under the chosen directory, once per process.
//! - Optionally mirror warnings and errors to stderr for interactive runs.
//! - Capture panics as log events before the default hook prints them.
//!
//! # Invariants
//! - Repeating the same settings is a no-op.
//! - Changing directory or level after start is rejected, never silently applied.
//! - Setup failures are returned as messages; nothing here panics.

use flexi_logger::{
    Cleanup, Criterion, Duplicate, FileSpec, Logger, LoggerHandle, Naming, WriteMode,
};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_BASENAME: &str = "notegrader";
const ROTATE_AT_BYTES: u64 = 5 * 1024 * 1024;
const KEPT_LOG_FILES: usize = 3;
const PANIC_SUMMARY_LIMIT: usize = 200;

static ACTIVE: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    settings: LogSettings,
    _handle: LoggerHandle,
}

/// Settings for [`init_logging`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// One of `trace`, `debug`, `info`, `warn`, `error`.
    pub level: String,
    /// Absolute directory receiving `notegrader*.log` files.
    pub log_dir: PathBuf,
    /// Mirror `warn` and above to stderr.
    pub echo_to_stderr: bool,
}

impl LogSettings {
    pub fn new(level: impl Into<String>, log_dir: impl Into<PathBuf>) -> Self {
        Self {
            level: level.into(),
            log_dir: log_dir.into(),
            echo_to_stderr: false,
        }
    }

    pub fn with_stderr_echo(mut self, enabled: bool) -> Self {
        self.echo_to_stderr = enabled;
        self
    }

    fn normalized(&self) -> Result<Self, String> {
        Ok(Self {
            level: canonical_level(&self.level)?.to_string(),
            log_dir: checked_log_dir(&self.log_dir)?,
            echo_to_stderr: self.echo_to_stderr,
        })
    }
}

/// Starts file logging with `settings`.
///
/// # Errors
/// - Unknown level names, relative or empty directories.
/// - Directory creation or logger start failures.
/// - A second call whose settings differ from the active ones.
pub fn init_logging(settings: &LogSettings) -> Result<(), String> {
    let wanted = settings.normalized()?;

    let active = ACTIVE.get_or_try_init(|| start_logger(&wanted))?;
    if active.settings != wanted {
        return Err(format!(
            "logging already started (level `{}`, dir `{}`); cannot switch to level `{}`, dir `{}`",
            active.settings.level,
            active.settings.log_dir.display(),
            wanted.level,
            wanted.log_dir.display()
        ));
    }
    Ok(())
}

/// Level and directory of the running logger, if started.
pub fn logging_status() -> Option<(String, PathBuf)> {
    ACTIVE
        .get()
        .map(|active| (active.settings.level.clone(), active.settings.log_dir.clone()))
}

/// `debug` for debug builds, `info` otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn start_logger(settings: &LogSettings) -> Result<ActiveLogger, String> {
    std::fs::create_dir_all(&settings.log_dir).map_err(|err| {
        format!(
            "cannot create log directory `{}`: {err}",
            settings.log_dir.display()
        )
    })?;

    let duplicate = if settings.echo_to_stderr {
        Duplicate::Warn
    } else {
        Duplicate::None
    };
    let handle = Logger::try_with_str(&settings.level)
        .map_err(|err| format!("bad log level `{}`: {err}", settings.level))?
        .log_to_file(
            FileSpec::default()
                .directory(settings.log_dir.as_path())
                .basename(LOG_BASENAME),
        )
        .rotate(
            Criterion::Size(ROTATE_AT_BYTES),
            Naming::Numbers,
            Cleanup::KeepLogFiles(KEPT_LOG_FILES),
        )
        .duplicate_to_stderr(duplicate)
        .write_mode(WriteMode::BufferAndFlush)
        .append()
        .format_for_files(flexi_logger::detailed_format)
        .start()
        .map_err(|err| format!("cannot start logger: {err}"))?;

    install_panic_hook();

    info!(
        "event=logging_start module=core status=ok version={} level={} log_dir={} stderr_echo={}",
        env!("CARGO_PKG_VERSION"),
        settings.level,
        settings.log_dir.display(),
        settings.echo_to_stderr
    );

    Ok(ActiveLogger {
        settings: settings.clone(),
        _handle: handle,
    })
}

fn canonical_level(level: &str) -> Result<&'static str, String> {
    let lowered = level.trim().to_ascii_lowercase();
    match lowered.as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        _ => Err(format!(
            "unknown log level `{lowered}` (use trace, debug, info, warn or error)"
        )),
    }
}

fn checked_log_dir(log_dir: &Path) -> Result<PathBuf, String> {
    if log_dir.as_os_str().is_empty() {
        return Err("log directory must not be empty".to_string());
    }
    if !log_dir.is_absolute() {
        return Err(format!(
            "log directory must be absolute, got `{}`",
            log_dir.display()
        ));
    }
    Ok(log_dir.to_path_buf())
}

fn install_panic_hook() {
    if PANIC_HOOK.set(()).is_err() {
        return;
    }

    let previous = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let location = info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(|message| (*message).to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_else(|| "non-string panic payload".to_string());
        error!(
            "event=panic module=core status=error location={location} payload={}",
            single_line(&payload, PANIC_SUMMARY_LIMIT)
        );
        previous(info);
    }));
}

/// Collapses line breaks and caps length so one event stays on one line.
fn single_line(value: &str, limit: usize) -> String {
    let flat = value.replace(['\r', '\n'], " ");
    if flat.chars().count() <= limit {
        return flat;
    }
    let mut capped: String = flat.chars().take(limit).collect();
    capped.push_str("...");
    capped
}

#[cfg(test)]
mod tests {
    use super::{canonical_level, checked_log_dir, init_logging, logging_status, single_line};
    use super::LogSettings;
    use std::path::Path;

    #[test]
    fn levels_are_case_insensitive_and_accept_warning() {
        assert_eq!(canonical_level(" DEBUG ").unwrap(), "debug");
        assert_eq!(canonical_level("warning").unwrap(), "warn");
        assert!(canonical_level("verbose").is_err());
    }

    #[test]
    fn log_dir_must_be_absolute_and_non_empty() {
        assert!(checked_log_dir(Path::new("")).is_err());
        let err = checked_log_dir(Path::new("logs")).unwrap_err();
        assert!(err.contains("absolute"));
    }

    #[test]
    fn single_line_flattens_and_caps() {
        assert_eq!(single_line("a\nb", 10), "a b");
        assert_eq!(single_line("abcdefgh", 4), "abcd...");
    }

    #[test]
    fn repeated_init_is_idempotent_and_conflicts_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let other = tempfile::tempdir().unwrap();
        let settings = LogSettings::new("info", dir.path());

        init_logging(&settings).unwrap();
        init_logging(&LogSettings::new("INFO", dir.path())).unwrap();

        let err = init_logging(&LogSettings::new("debug", dir.path())).unwrap_err();
        assert!(err.contains("cannot switch"));
        let err = init_logging(&LogSettings::new("info", other.path())).unwrap_err();
        assert!(err.contains("cannot switch"));

        let (level, log_dir) = logging_status().unwrap();
        assert_eq!(level, "info");
        assert_eq!(log_dir, dir.path());
    }
}
