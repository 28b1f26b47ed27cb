//! Application configuration.
//!
//! # Responsibility
//! - Hold classifier thresholds and report settings as one explicit value.
//! - Load overrides from a JSON file, defaulting every missing key.
//!
//! # Invariants
//! - A validated config has finite, non-negative thresholds and a non-zero
//!   lookahead window.

use crate::classify::ClassifierConfig;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Result type used by configuration loading.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors from configuration loading and validation.
#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse {
        path: String,
        source: serde_json::Error,
    },
    /// A field holds a value outside its accepted range.
    Invalid {
        field: &'static str,
        message: String,
    },
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read config `{path}`: {source}"),
            Self::Parse { path, source } => write!(f, "failed to parse config `{path}`: {source}"),
            Self::Invalid { field, message } => write!(f, "invalid config `{field}`: {message}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse { source, .. } => Some(source),
            Self::Invalid { .. } => None,
        }
    }
}

/// Settings controlling which reports are produced and how.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Number of non-Sunday days checked by the missing-assignment report.
    pub missing_assignment_lookahead: usize,
    /// Notebooks whose name contains this text are ignored. Empty disables.
    pub excluded_notebook_marker: String,
    /// Tag-name fragment that marks a page as awaiting review.
    pub unreviewed_tag_marker: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            missing_assignment_lookahead: 7,
            excluded_notebook_marker: "QuestLearning".to_string(),
            unreviewed_tag_marker: "review".to_string(),
        }
    }
}

/// Complete configuration for one report run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub classifier: ClassifierConfig,
    pub report: ReportConfig,
}

impl AppConfig {
    /// Reads and validates a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: Self = serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        require_non_negative(
            "classifier.active_threshold_days",
            self.classifier.active_threshold_days,
        )?;
        require_non_negative(
            "classifier.page_fill_constant",
            self.classifier.page_fill_constant,
        )?;
        if self.report.missing_assignment_lookahead == 0 {
            return Err(ConfigError::Invalid {
                field: "report.missing_assignment_lookahead",
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

fn require_non_negative(field: &'static str, value: f64) -> ConfigResult<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::Invalid {
            field,
            message: format!("expected a finite non-negative number, got {value}"),
        });
    }
    Ok(())
}
