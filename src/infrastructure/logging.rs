//! Logging system configuration and initialization
//!
//! - Console output on stderr (stdout carries the probe result)
//! - Optional file output through a non-blocking appender
//! - Optional JSON formatting
//! - `RUST_LOG` overrides the configured level

#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Result};
use chrono::Local;
use lazy_static::lazy_static;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;
use tracing_appender::{non_blocking, non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{
    fmt::{self, time::FormatTime},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter, Layer, Registry,
};

pub use crate::infrastructure::config::LoggingConfig;

// Keeps the log file writer alive for the lifetime of the process
lazy_static! {
    static ref LOG_GUARDS: Mutex<Vec<WorkerGuard>> = Mutex::new(Vec::new());
}

/// Local wall-clock timestamps with millisecond precision
struct LocalTimeFormatter;

impl FormatTime for LocalTimeFormatter {
    fn format_time(&self, w: &mut fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", Local::now().format("%Y-%m-%d %H:%M:%S%.3f %:z"))
    }
}

/// Get the log directory relative to the executable location
pub fn get_log_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_default());

    exe_dir.join("logs")
}

/// Build the filter: `RUST_LOG` when set, otherwise the configured level with
/// HTTP and parser internals lowered unless `trace` was requested.
pub fn build_env_filter(config: &LoggingConfig) -> Result<EnvFilter> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }

    let mut filter = EnvFilter::try_new(&config.level)
        .map_err(|e| anyhow!("Invalid log level '{}': {}", config.level, e))?;

    if !config.level.to_lowercase().contains("trace") {
        for directive in ["reqwest=info", "hyper=warn", "hyper_util=warn", "h2=warn", "html5ever=warn", "selectors=warn"] {
            filter = filter.add_directive(directive.parse()?);
        }
    }

    Ok(filter)
}

/// Initialize logging with custom configuration
pub fn init_logging_with_config(config: &LoggingConfig) -> Result<()> {
    if !config.file_output && !config.console_output {
        return Err(anyhow!("No logging output configured"));
    }

    let env_filter = build_env_filter(config)?;

    let console_layer = config.console_output.then(|| {
        fmt::Layer::new()
            .with_writer(std::io::stderr)
            .with_timer(LocalTimeFormatter)
            .with_target(false)
            .boxed()
    });

    let mut log_file = None;
    let mut file_guard = None;
    let file_layer = if config.file_output {
        let log_dir = config.log_directory.clone().unwrap_or_else(get_log_directory);
        std::fs::create_dir_all(&log_dir)
            .map_err(|e| anyhow!("Failed to create log directory {:?}: {}", log_dir, e))?;

        let (file_writer, guard) = non_blocking(rolling::never(&log_dir, &config.file_name));
        file_guard = Some(guard);
        log_file = Some(log_dir.join(&config.file_name));

        let layer = fmt::Layer::new()
            .with_writer(file_writer)
            .with_timer(LocalTimeFormatter)
            .with_ansi(false);
        Some(if config.json_format {
            layer
                .json()
                .with_target(true)
                .with_file(true)
                .with_line_number(true)
                .boxed()
        } else {
            layer.with_target(false).boxed()
        })
    } else {
        None
    };

    install_with_guard(
        || {
            Registry::default()
                .with(env_filter)
                .with(console_layer)
                .with(file_layer)
                .try_init()
        },
        file_guard,
    )?;

    info!("Logging system initialized (level: {})", config.level);
    if let Some(path) = log_file {
        info!("Log file: {:?}", path);
    }

    Ok(())
}

/// Run `install` and keep the file writer's guard only once it succeeded;
/// on failure the guard is dropped, which flushes and stops its worker.
fn install_with_guard<E: std::fmt::Display>(
    install: impl FnOnce() -> std::result::Result<(), E>,
    guard: Option<WorkerGuard>,
) -> Result<()> {
    install().map_err(|e| anyhow!("Failed to install tracing subscriber: {}", e))?;

    if let Some(guard) = guard {
        LOG_GUARDS
            .lock()
            .map_err(|_| anyhow!("Log guard registry poisoned"))?
            .push(guard);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_config_default() {
        let config = LoggingConfig::default();
        assert!(!config.level.is_empty());
        assert!(config.console_output);
        assert!(!config.file_output);
    }

    #[test]
    fn test_log_directory_is_named_logs() {
        let log_dir = get_log_directory();
        assert!(log_dir.to_string_lossy().ends_with("logs"));
    }

    #[test]
    fn test_no_output_is_rejected() {
        let config = LoggingConfig {
            console_output: false,
            file_output: false,
            ..Default::default()
        };
        assert!(init_logging_with_config(&config).is_err());
    }

    // Both guard tests observe the shared registry
    static GUARD_REGISTRY_TESTS: Mutex<()> = Mutex::new(());

    fn registered_guards() -> usize {
        LOG_GUARDS.lock().unwrap().len()
    }

    #[test]
    fn test_failed_install_does_not_keep_the_file_guard() {
        let _serial = GUARD_REGISTRY_TESTS.lock().unwrap();
        let (_writer, guard) = non_blocking(std::io::sink());
        let before = registered_guards();

        let result = install_with_guard(|| Err("subscriber already set"), Some(guard));

        assert!(result.is_err());
        assert_eq!(registered_guards(), before);
    }

    #[test]
    fn test_successful_install_keeps_the_file_guard() {
        let _serial = GUARD_REGISTRY_TESTS.lock().unwrap();
        let (_writer, guard) = non_blocking(std::io::sink());
        let before = registered_guards();

        install_with_guard(|| Ok::<(), String>(()), Some(guard)).unwrap();

        assert_eq!(registered_guards(), before + 1);
    }

    #[test]
    fn test_filter_accepts_configured_level() {
        let config = LoggingConfig {
            level: "debug".to_string(),
            ..Default::default()
        };
        assert!(build_env_filter(&config).is_ok());
    }
}
