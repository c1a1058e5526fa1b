use anyhow::Result;
use std::io;
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{self, RollingFileAppender};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::domain::models::LoggingConfig;

const LOG_FILE_NAME: &str = "need-cla.log";

type BoxedLayer = Box<dyn Layer<Registry> + Send + Sync>;

/// Logger implementation using tracing
///
/// Diagnostics go to stderr so stdout stays reserved for command output.
pub struct LoggerImpl {
    _guard: Option<WorkerGuard>,
}

impl LoggerImpl {
    /// Initialize the global subscriber from configuration.
    ///
    /// `RUST_LOG` directives take precedence over `config.level`. The returned
    /// value must be kept alive for file output to be flushed.
    ///
    /// # Errors
    /// Returns an error on an unknown level, format or rotation, or when a
    /// global subscriber is already installed.
    pub fn init(config: &LoggingConfig) -> Result<Self> {
        let default_level = parse_log_level(&config.level)?;
        // One filter per layer; EnvFilter is not Clone.
        let env_filter = || {
            EnvFilter::builder()
                .with_default_directive(default_level.into())
                .from_env_lossy()
        };

        let stderr_layer: BoxedLayer = match config.format.as_str() {
            "json" => tracing_subscriber::fmt::layer()
                .json()
                .with_writer(io::stderr)
                .with_current_span(true)
                .with_target(true)
                .with_filter(env_filter())
                .boxed(),
            "pretty" => tracing_subscriber::fmt::layer()
                .with_writer(io::stderr)
                .with_target(false)
                .compact()
                .with_filter(env_filter())
                .boxed(),
            other => anyhow::bail!("Invalid log format: {other}"),
        };

        let mut layers = vec![stderr_layer];
        let guard = match config.log_dir {
            Some(ref log_dir) => {
                let appender = file_appender(log_dir, &config.rotation)?;
                let (non_blocking_file, guard) = tracing_appender::non_blocking(appender);

                // File output is always JSON
                layers.push(
                    tracing_subscriber::fmt::layer()
                        .json()
                        .with_writer(non_blocking_file)
                        .with_ansi(false)
                        .with_current_span(true)
                        .with_span_list(true)
                        .with_target(true)
                        .with_thread_ids(true)
                        .with_file(true)
                        .with_line_number(true)
                        .with_filter(env_filter())
                        .boxed(),
                );
                Some(guard)
            }
            None => None,
        };

        tracing_subscriber::registry().with(layers).try_init()?;

        tracing::debug!(
            level = %config.level,
            format = %config.format,
            file_output = config.log_dir.is_some(),
            "logger initialized"
        );

        Ok(Self { _guard: guard })
    }
}

fn file_appender(log_dir: &str, rotation: &str) -> Result<RollingFileAppender> {
    Ok(match rotation {
        "daily" => rolling::daily(log_dir, LOG_FILE_NAME),
        "hourly" => rolling::hourly(log_dir, LOG_FILE_NAME),
        "never" => rolling::never(log_dir, LOG_FILE_NAME),
        other => anyhow::bail!("Invalid log rotation: {other}"),
    })
}

/// Parse log level string to Level
fn parse_log_level(level: &str) -> Result<Level> {
    match level.to_lowercase().as_str() {
        "trace" => Ok(Level::TRACE),
        "debug" => Ok(Level::DEBUG),
        "info" => Ok(Level::INFO),
        "warn" => Ok(Level::WARN),
        "error" => Ok(Level::ERROR),
        _ => anyhow::bail!("Invalid log level: {level}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_log_level() {
        assert!(matches!(parse_log_level("trace"), Ok(Level::TRACE)));
        assert!(matches!(parse_log_level("debug"), Ok(Level::DEBUG)));
        assert!(matches!(parse_log_level("info"), Ok(Level::INFO)));
        assert!(matches!(parse_log_level("warn"), Ok(Level::WARN)));
        assert!(matches!(parse_log_level("error"), Ok(Level::ERROR)));
        assert!(matches!(parse_log_level("WARN"), Ok(Level::WARN)));
        assert!(parse_log_level("verbose").is_err());
    }

    #[test]
    fn test_file_appender_rotation() {
        let dir = tempfile::TempDir::new().unwrap();
        let log_dir = dir.path().to_string_lossy().into_owned();
        assert!(file_appender(&log_dir, "daily").is_ok());
        assert!(file_appender(&log_dir, "never").is_ok());
        assert!(file_appender(&log_dir, "weekly").is_err());
    }

    #[test]
    fn test_invalid_format_rejected_before_install() {
        let config = LoggingConfig {
            format: "xml".into(),
            ..LoggingConfig::default()
        };
        assert!(LoggerImpl::init(&config).is_err());
    }
}
