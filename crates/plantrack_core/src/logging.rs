//! Process-wide logging bootstrap.
//!
//! # Responsibility
//! - Start the rotating file logger at most once per process.
//! - Keep diagnostic events metadata-only (counts, keys, modes), never record
//!   payloads.
//!
//! # Invariants
//! - Repeating initialization with identical settings is a no-op.
//! - Switching level or directory after the first start is rejected.
//! - Initialization never panics.

use crate::config::LoggingConfig;
use flexi_logger::{Cleanup, Criterion, FileSpec, Logger, LoggerHandle, Naming, WriteMode};
use log::{error, info};
use once_cell::sync::OnceCell;
use std::path::{Path, PathBuf};

const LOG_FILE_BASENAME: &str = "plantrack";
const MAX_PANIC_PAYLOAD_CHARS: usize = 160;

static ACTIVE_LOGGER: OnceCell<ActiveLogger> = OnceCell::new();
static PANIC_HOOK_INSTALLED: OnceCell<()> = OnceCell::new();

struct ActiveLogger {
    level: &'static str,
    log_dir: PathBuf,
    _handle: LoggerHandle,
}

/// Starts file logging with default rotation limits.
///
/// Shorthand for [`init_logging_with`] using [`LoggingConfig::default`]
/// rotation settings.
///
/// # Errors
/// - Unsupported `level`.
/// - Empty or relative `log_dir`, or a directory that cannot be created.
/// - Backend startup failure or a conflicting earlier initialization.
pub fn init_logging(level: &str, log_dir: &str) -> Result<(), String> {
    let config = LoggingConfig {
        level: level.to_string(),
        ..LoggingConfig::default()
    };
    init_logging_with(&config, log_dir)
}

/// Starts file logging using explicit rotation settings.
///
/// Returns a human-readable message on failure so facade callers can pass it
/// through unchanged.
pub fn init_logging_with(config: &LoggingConfig, log_dir: &str) -> Result<(), String> {
    let level = normalize_level(&config.level)?;
    let dir = normalize_log_dir(log_dir)?;

    if let Some(active) = ACTIVE_LOGGER.get() {
        return check_matches_active(active, level, &dir);
    }

    let max_file_bytes = config.max_file_bytes;
    let max_files = config.max_files;
    let start_dir = dir.clone();

    let active = ACTIVE_LOGGER.get_or_try_init(|| -> Result<ActiveLogger, String> {
        std::fs::create_dir_all(&start_dir).map_err(|err| {
            format!(
                "failed to create log directory `{}`: {err}",
                start_dir.display()
            )
        })?;

        let handle = Logger::try_with_str(level)
            .map_err(|err| format!("invalid log level `{level}`: {err}"))?
            .log_to_file(
                FileSpec::default()
                    .directory(start_dir.as_path())
                    .basename(LOG_FILE_BASENAME),
            )
            .rotate(
                Criterion::Size(max_file_bytes),
                Naming::Numbers,
                Cleanup::KeepLogFiles(max_files),
            )
            .write_mode(WriteMode::BufferAndFlush)
            .append()
            .format_for_files(flexi_logger::detailed_format)
            .start()
            .map_err(|err| format!("failed to start logger: {err}"))?;

        install_panic_hook_once();

        info!(
            "event=logging_start module=core status=ok version={} build_mode={} level={} log_dir={}",
            env!("CARGO_PKG_VERSION"),
            build_mode(),
            level,
            start_dir.display()
        );

        Ok(ActiveLogger {
            level,
            log_dir: start_dir,
            _handle: handle,
        })
    })?;

    check_matches_active(active, level, &dir)
}

/// Returns `(level, log_dir)` of the running logger, or `None` before init.
pub fn logging_status() -> Option<(&'static str, PathBuf)> {
    ACTIVE_LOGGER
        .get()
        .map(|active| (active.level, active.log_dir.clone()))
}

/// Default level for the current build: `debug` in debug builds, `info`
/// otherwise.
pub fn default_log_level() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "info"
    }
}

fn check_matches_active(active: &ActiveLogger, level: &str, dir: &Path) -> Result<(), String> {
    if active.log_dir != dir {
        return Err(format!(
            "logging already initialized at `{}`; refusing to switch to `{}`",
            active.log_dir.display(),
            dir.display()
        ));
    }
    if active.level != level {
        return Err(format!(
            "logging already initialized with level `{}`; refusing to switch to `{}`",
            active.level, level
        ));
    }
    Ok(())
}

pub(crate) fn normalize_level(level: &str) -> Result<&'static str, String> {
    match level.trim().to_ascii_lowercase().as_str() {
        "trace" => Ok("trace"),
        "debug" => Ok("debug"),
        "info" => Ok("info"),
        "warn" | "warning" => Ok("warn"),
        "error" => Ok("error"),
        other => Err(format!(
            "unsupported log level `{other}`; expected trace|debug|info|warn|error"
        )),
    }
}

fn normalize_log_dir(log_dir: &str) -> Result<PathBuf, String> {
    let trimmed = log_dir.trim();
    if trimmed.is_empty() {
        return Err("log_dir cannot be empty".to_string());
    }
    let path = Path::new(trimmed);
    if !path.is_absolute() {
        return Err(format!("log_dir must be an absolute path, got `{trimmed}`"));
    }
    Ok(path.to_path_buf())
}

fn build_mode() -> &'static str {
    if cfg!(debug_assertions) {
        "debug"
    } else {
        "release"
    }
}

fn install_panic_hook_once() {
    if PANIC_HOOK_INSTALLED.get().is_some() {
        return;
    }

    let previous_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        // Payload may echo record contents; cap and flatten it.
        let location = panic_info
            .location()
            .map(|loc| format!("{}:{}", loc.file(), loc.line()))
            .unwrap_or_else(|| "unknown".to_string());
        let payload = panic_payload_summary(panic_info);
        error!(
            "event=panic_captured module=core status=error location={} payload={}",
            location, payload
        );
        previous_hook(panic_info);
    }));

    let _ = PANIC_HOOK_INSTALLED.set(());
}

fn panic_payload_summary(info: &std::panic::PanicHookInfo<'_>) -> String {
    let payload = if let Some(message) = info.payload().downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = info.payload().downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    };

    sanitize_message(&payload, MAX_PANIC_PAYLOAD_CHARS)
}

fn sanitize_message(value: &str, max_chars: usize) -> String {
    let flattened = value.replace(['\n', '\r'], " ");
    let mut truncated = flattened.chars().take(max_chars).collect::<String>();
    if flattened.chars().count() > max_chars {
        truncated.push_str("...");
    }
    truncated
}
