//! Logging configuration and initialization
//!
//! Structured logging with tracing: compact console output for development,
//! JSON for log aggregation, and an optional log file written off-thread.

use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{filter::EnvFilter, fmt, prelude::*};

/// Log filter variable; falls back to `RUST_LOG`
pub const LOG_ENV: &str = "HABITAT_LOG";
/// Set to "json" for JSON console output
pub const LOG_FORMAT_ENV: &str = "HABITAT_LOG_FORMAT";
/// Path of a log file; enables file output when set
pub const LOG_FILE_ENV: &str = "HABITAT_LOG_FILE";

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LogConfig {
    /// Enable console output (default: true)
    pub console_enabled: bool,
    /// Enable file logging (default: false)
    pub file_enabled: bool,
    /// Log file path (default: `habitat.log` in the cache directory)
    pub file_path: Option<PathBuf>,
    /// Use JSON format for console logs (default: false)
    pub json_format: bool,
    /// Filter used when no environment filter is set (default: "info")
    pub default_level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            console_enabled: true,
            file_enabled: false,
            file_path: None,
            json_format: false,
            default_level: "info".to_string(),
        }
    }
}

impl LogConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(format) = lookup(LOG_FORMAT_ENV) {
            config.json_format = format.eq_ignore_ascii_case("json");
        }
        if let Some(path) = lookup(LOG_FILE_ENV).filter(|p| !p.trim().is_empty()) {
            config.file_enabled = true;
            config.file_path = Some(PathBuf::from(path));
        }
        config
    }

    fn resolved_file_path(&self) -> PathBuf {
        self.file_path.clone().unwrap_or_else(|| {
            dirs::cache_dir()
                .map(|dir| dir.join("HabitatDesigner"))
                .unwrap_or_default()
                .join("habitat.log")
        })
    }
}

/// Initialize the global subscriber
///
/// Returns a guard that must be kept alive for the duration of the program
/// so file output is flushed. `log` records are forwarded to the subscriber.
pub fn init_logging(config: &LogConfig) -> Result<Option<WorkerGuard>, Box<dyn std::error::Error + Send + Sync>> {
    let env_filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_env("RUST_LOG"))
        .unwrap_or_else(|_| EnvFilter::new(&config.default_level));

    let subscriber = tracing_subscriber::registry().with(env_filter);
    let mut file_guard = None;

    if config.file_enabled {
        let log_path = config.resolved_file_path();
        if let Some(parent) = log_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let file = std::fs::File::create(&log_path)?;
        let (non_blocking, guard) = tracing_appender::non_blocking(file);
        file_guard = Some(guard);

        let file_layer = fmt::layer()
            .with_writer(non_blocking)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .with_ansi(false);

        let console_layer = config.console_enabled.then(|| fmt::layer().with_target(true).compact());
        subscriber.with(file_layer).with(console_layer).try_init()?;

        eprintln!("Logging to file: {}", log_path.display());
    } else if config.console_enabled && config.json_format {
        let json_layer = fmt::layer()
            .json()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true);

        subscriber.with(json_layer).try_init()?;
    } else if config.console_enabled {
        let console_layer = fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .compact();

        subscriber.with(console_layer).try_init()?;
    } else {
        subscriber.try_init()?;
    }

    tracing::info!(
        target: "habitat_designer",
        version = env!("CARGO_PKG_VERSION"),
        json_format = config.json_format,
        file_enabled = config.file_enabled,
        "Logging initialized"
    );

    Ok(file_guard)
}

// Re-export WorkerGuard so callers can store it
pub use tracing_appender::non_blocking::WorkerGuard as LogGuard;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_config_default() {
        let config = LogConfig::default();
        assert!(config.console_enabled);
        assert!(!config.file_enabled);
        assert!(!config.json_format);
        assert_eq!(config.default_level, "info");
    }

    #[test]
    fn test_env_overrides() {
        let config = LogConfig::from_lookup(|key| match key {
            LOG_FORMAT_ENV => Some("JSON".to_string()),
            LOG_FILE_ENV => Some("/tmp/habitat-test.log".to_string()),
            _ => None,
        });
        assert!(config.json_format);
        assert!(config.file_enabled);
        assert_eq!(config.resolved_file_path(), PathBuf::from("/tmp/habitat-test.log"));
    }

    #[test]
    fn test_blank_file_env_ignored() {
        let config = LogConfig::from_lookup(|key| (key == LOG_FILE_ENV).then(|| "  ".to_string()));
        assert!(!config.file_enabled);
        assert!(config.resolved_file_path().ends_with("habitat.log"));
    }
}
