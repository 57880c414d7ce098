//! Logging and tracing setup
//!
//! Console output always goes to stderr so it never mixes with the shell's
//! tables on stdout. A daily-rolling JSON file layer can be added for bug
//! reports. `RUST_LOG` overrides the configured filter.

use std::path::PathBuf;

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

use crate::settings::LogSettings;

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Directory where JSON log files are written
    pub log_dir: PathBuf,

    /// Whether to write JSON logs to files
    pub enable_json_logs: bool,

    /// Whether to log to stderr
    pub enable_console_logs: bool,

    /// Whether to include file/line information in console logs
    pub include_location: bool,

    /// Filter used when `RUST_LOG` is not set
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_dir: log_directory(),
            enable_json_logs: false,
            enable_console_logs: true,
            include_location: cfg!(debug_assertions),
            default_filter: "warn".to_string(),
        }
    }
}

impl LoggingConfig {
    /// Build from the `logging` section of the settings file
    pub fn from_settings(settings: &LogSettings) -> Self {
        Self {
            log_dir: settings.log_dir.clone().unwrap_or_else(log_directory),
            enable_json_logs: settings.json_logs,
            default_filter: settings.filter.clone(),
            ..Self::default()
        }
    }
}

/// Initialize the global subscriber.
///
/// The returned guard flushes the JSON writer when dropped, so keep it
/// alive for the rest of `main`.
pub fn init(config: LoggingConfig) -> anyhow::Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.default_filter))
        .with_context(|| format!("Invalid log filter: {}", config.default_filter))?;

    let mut layers = Vec::new();
    let mut guard = None;

    if config.enable_console_logs {
        let console_layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_file(config.include_location)
            .with_line_number(config.include_location)
            .with_span_events(FmtSpan::NONE)
            .with_filter(env_filter.clone())
            .boxed();

        layers.push(console_layer);
    }

    if config.enable_json_logs {
        std::fs::create_dir_all(&config.log_dir).with_context(|| {
            format!("Failed to create log directory: {:?}", config.log_dir)
        })?;

        let file_appender = tracing_appender::rolling::daily(&config.log_dir, "fakesql.log");
        let (non_blocking, worker_guard) = tracing_appender::non_blocking(file_appender);
        guard = Some(worker_guard);

        let json_layer = fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_ansi(false)
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_writer(non_blocking)
            .with_filter(env_filter)
            .boxed();

        layers.push(json_layer);
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("Logging was already initialized")?;

    tracing::debug!(
        log_dir = %config.log_dir.display(),
        json_enabled = config.enable_json_logs,
        console_enabled = config.enable_console_logs,
        "Logging system initialized"
    );

    Ok(guard)
}

/// Default directory for JSON logs
pub fn log_directory() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fakesql")
        .join("logs")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_from_settings_defaults() {
        let config = LoggingConfig::from_settings(&LogSettings::default());

        assert_eq!(config.default_filter, "warn");
        assert!(!config.enable_json_logs);
        assert!(config.enable_console_logs);
        assert_eq!(config.log_dir, log_directory());
    }

    #[test]
    fn test_from_settings_uses_configured_dir() {
        let settings = LogSettings {
            filter: "debug".into(),
            json_logs: true,
            log_dir: Some(PathBuf::from("/tmp/fakesql-logs")),
        };

        let config = LoggingConfig::from_settings(&settings);

        assert_eq!(config.log_dir, PathBuf::from("/tmp/fakesql-logs"));
        assert!(config.enable_json_logs);
        assert_eq!(config.default_filter, "debug");
    }

    #[test]
    fn test_log_directory_ends_with_app_name() {
        assert!(log_directory().ends_with("fakesql/logs"));
    }
}
