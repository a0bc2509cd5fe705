//! Engine configuration.
//!
//! # Responsibility
//! - Group every tunable the engines read into one serde-loadable struct.
//! - Validate values before they reach layout or filtering code.
//!
//! # Invariants
//! - Missing keys fall back to defaults; unknown top-level keys are rejected.
//! - A config returned by the loaders has passed [`EngineConfig::validate`].

use crate::filter::spec::MatchMode;
use crate::layout::gantt::GanttOptions;
use crate::logging::{default_log_level, normalize_level};
use crate::model::fields::RecordFields;
use crate::model::status::StatusVocabulary;
use crate::stats::UpcomingOptions;
use log::info;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

const MAX_PADDING_MONTHS: u32 = 24;
const MAX_UPCOMING_WINDOW_DAYS: i64 = 3650;
const DEFAULT_MAX_LOG_FILE_BYTES: u64 = 10 * 1024 * 1024;
const DEFAULT_MAX_LOG_FILES: usize = 5;

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug)]
pub enum ConfigError {
    Io {
        path: String,
        source: std::io::Error,
    },
    Parse(serde_json::Error),
    InvalidMinBarWidth(f64),
    InvalidPadding(u32),
    InvalidUpcomingWindow(i64),
    EmptyStatusToken(&'static str),
    EmptyFieldName(&'static str),
    InvalidLogLevel(String),
    InvalidLogRotation,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "failed to read config `{path}`: {source}"),
            Self::Parse(err) => write!(f, "invalid config document: {err}"),
            Self::InvalidMinBarWidth(value) => {
                write!(f, "min_bar_width_pct must be within 0..=100, got {value}")
            }
            Self::InvalidPadding(value) => write!(
                f,
                "padding_months must be at most {MAX_PADDING_MONTHS}, got {value}"
            ),
            Self::InvalidUpcomingWindow(value) => write!(
                f,
                "window_days must be within 0..={MAX_UPCOMING_WINDOW_DAYS}, got {value}"
            ),
            Self::EmptyStatusToken(group) => write!(f, "status group `{group}` has a blank token"),
            Self::EmptyFieldName(field) => write!(f, "record field `{field}` maps to a blank name"),
            Self::InvalidLogLevel(message) => write!(f, "{message}"),
            Self::InvalidLogRotation => {
                write!(f, "log rotation needs a positive file size and file count")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Parse(err) => Some(err),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(value: serde_json::Error) -> Self {
        Self::Parse(value)
    }
}

/// Rotating log file settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub max_file_bytes: u64,
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level().to_string(),
            max_file_bytes: DEFAULT_MAX_LOG_FILE_BYTES,
            max_files: DEFAULT_MAX_LOG_FILES,
        }
    }
}

/// Every tunable read by the filter, layout and statistics code.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    pub match_mode: MatchMode,
    pub statuses: StatusVocabulary,
    pub gantt: GanttOptions,
    pub upcoming: UpcomingOptions,
    pub fields: RecordFields,
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Parses and validates a JSON config document.
    pub fn from_json_str(text: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a JSON config file.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&text)?;
        info!(
            "event=config_load module=config status=ok match_mode={:?} padding_months={}",
            config.match_mode, config.gantt.padding_months
        );
        Ok(config)
    }

    /// Checks ranges and non-blank names.
    pub fn validate(&self) -> ConfigResult<()> {
        let width = self.gantt.min_bar_width_pct;
        if !(0.0..=100.0).contains(&width) {
            return Err(ConfigError::InvalidMinBarWidth(width));
        }
        if self.gantt.padding_months > MAX_PADDING_MONTHS {
            return Err(ConfigError::InvalidPadding(self.gantt.padding_months));
        }
        if !(0..=MAX_UPCOMING_WINDOW_DAYS).contains(&self.upcoming.window_days) {
            return Err(ConfigError::InvalidUpcomingWindow(
                self.upcoming.window_days,
            ));
        }

        check_tokens("done", &self.statuses.done)?;
        check_tokens("in_progress", &self.statuses.in_progress)?;
        if self.statuses.default_label.trim().is_empty() {
            return Err(ConfigError::EmptyStatusToken("default_label"));
        }

        for (label, name) in self.fields.entries() {
            if name.trim().is_empty() {
                return Err(ConfigError::EmptyFieldName(label));
            }
        }

        normalize_level(&self.logging.level).map_err(ConfigError::InvalidLogLevel)?;
        if self.logging.max_file_bytes == 0 || self.logging.max_files == 0 {
            return Err(ConfigError::InvalidLogRotation);
        }
        Ok(())
    }
}

fn check_tokens(group: &'static str, tokens: &[String]) -> ConfigResult<()> {
    if tokens.iter().any(|token| token.trim().is_empty()) {
        return Err(ConfigError::EmptyStatusToken(group));
    }
    Ok(())
}
