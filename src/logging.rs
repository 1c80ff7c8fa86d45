//! Logging System
//!
//! Structured logging using the `tracing` crate. Provides the typed log level carried by
//! the service parameters, the ambient (process-wide) level lookup, and subscriber
//! initialisation for the binary.

use crate::error::ServiceError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::{
    fmt as layer_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry,
};

/// Environment variable holding an `EnvFilter` directive that overrides the configured level
pub const LOG_ENV_VAR: &str = "RULES_LOG";

/// Log verbosity, ordered from quietest to most verbose
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    /// The process-wide level currently in effect.
    ///
    /// Reads the global maximum level filter maintained by `tracing`. The read is
    /// unsynchronised with respect to subscribers being installed concurrently.
    pub fn current() -> Self {
        LevelFilter::current().into()
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Off => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(LogLevel::Off),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!(
                "Invalid log level: {} (must be one of trace, debug, info, warn, error, off)",
                other
            )),
        }
    }
}

impl From<LevelFilter> for LogLevel {
    fn from(filter: LevelFilter) -> Self {
        if filter == LevelFilter::OFF {
            LogLevel::Off
        } else if filter == LevelFilter::ERROR {
            LogLevel::Error
        } else if filter == LevelFilter::WARN {
            LogLevel::Warn
        } else if filter == LevelFilter::INFO {
            LogLevel::Info
        } else if filter == LevelFilter::DEBUG {
            LogLevel::Debug
        } else {
            LogLevel::Trace
        }
    }
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::OFF,
            LogLevel::Error => LevelFilter::ERROR,
            LogLevel::Warn => LevelFilter::WARN,
            LogLevel::Info => LevelFilter::INFO,
            LogLevel::Debug => LevelFilter::DEBUG,
            LogLevel::Trace => LevelFilter::TRACE,
        }
    }
}

/// Output format for log lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(LogFormat::Text),
            "json" => Ok(LogFormat::Json),
            other => Err(format!(
                "Invalid log format: {} (must be 'json' or 'text')",
                other
            )),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Output format: json, text (default: text)
    #[serde(default)]
    pub format: LogFormat,

    /// Enable colored output (text format only)
    #[serde(default = "default_true")]
    pub color: bool,
}

fn default_true() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            color: default_true(),
        }
    }
}

/// Initialize the global subscriber.
///
/// `RULES_LOG` takes precedence over `level` when it holds a valid directive.
/// Logs go to stderr so command output on stdout stays machine-readable.
pub fn init_logging(level: LogLevel, config: &LoggingConfig) -> Result<(), ServiceError> {
    let filter = build_env_filter(level);
    let base_subscriber = Registry::default().with(filter);

    let result = match config.format {
        LogFormat::Json => base_subscriber
            .with(
                layer_fmt::layer()
                    .json()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Text => base_subscriber
            .with(
                layer_fmt::layer()
                    .with_target(true)
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_ansi(config.color)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
    };

    result.map_err(|e| ServiceError::LoggingError(format!("Failed to install subscriber: {}", e)))
}

fn build_env_filter(level: LogLevel) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV_VAR)
        .unwrap_or_else(|_| EnvFilter::new(level.as_str()))
}
