//! CLI: clap types and command execution for the rules service binary.
//!
//! Settings are gathered from configuration sources first and command-line flags second,
//! so flags override files and environment by plain last-write-wins.

use crate::config::{ConfigLoader, ParameterFile};
use crate::error::ServiceError;
use crate::logging::{LogFormat, LogLevel, LoggingConfig};
use crate::parameters::{
    self, with_admin_ips, with_log_level, with_periodic_pruning, with_storage_path, Parameter,
    Parameters,
};
use crate::service::Service;
use clap::{Parser, Subcommand, ValueEnum};
use comfy_table::{presets::UTF8_FULL, Table};
use std::path::PathBuf;

/// Log level used when neither configuration nor flags set one
pub const DEFAULT_LOG_LEVEL: LogLevel = LogLevel::Info;

/// Rules service - startup configuration and storage for rules evaluation
#[derive(Parser, Debug)]
#[command(name = "rules-service")]
#[command(about = "Startup configuration and storage for the rules-evaluation service")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (merged over the global config file)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Rules database location
    #[arg(long, global = true)]
    pub storage_path: Option<PathBuf>,

    /// Address allowed administrative access (repeatable, or comma-separated)
    #[arg(long = "admin-ip", global = true, value_delimiter = ',')]
    pub admin_ips: Vec<String>,

    /// Periodically prune the rules database (`--periodic-pruning=false` to disable)
    #[arg(
        long,
        global = true,
        num_args = 0..=1,
        require_equals = true,
        default_missing_value = "true"
    )]
    pub periodic_pruning: Option<bool>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long, global = true)]
    pub log_level: Option<LogLevel>,

    /// Log format (json, text)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Resolve and validate settings, then print them
    Check {
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Validate settings and open the rules store
    Start,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Toml,
}

impl Cli {
    /// Parameters given as flags, in a fixed order.
    pub fn parameters(&self) -> Vec<Parameter> {
        let mut params = Vec::new();
        if let Some(level) = self.log_level {
            params.push(with_log_level(level));
        }
        if let Some(path) = &self.storage_path {
            params.push(with_storage_path(path.clone()));
        }
        if !self.admin_ips.is_empty() {
            params.push(with_admin_ips(self.admin_ips.iter().cloned()));
        }
        if let Some(enabled) = self.periodic_pruning {
            params.push(with_periodic_pruning(enabled));
        }
        params
    }
}

/// Resolved inputs for one invocation
pub struct RunContext {
    params: Vec<Parameter>,
    logging: LoggingConfig,
    default_level: LogLevel,
}

impl RunContext {
    /// Load configuration sources from the default locations and the process environment.
    pub fn new(cli: &Cli) -> Result<Self, ServiceError> {
        Self::with_loader(cli, &ConfigLoader::new())
    }

    pub fn with_loader(cli: &Cli, loader: &ConfigLoader) -> Result<Self, ServiceError> {
        let file = loader.load(cli.config.as_deref())?;
        Ok(Self::from_sources(cli, file))
    }

    fn from_sources(cli: &Cli, file: ParameterFile) -> Self {
        let mut params = file.to_parameters();
        params.extend(cli.parameters());

        let mut logging = file.logging;
        if let Some(format) = cli.log_format {
            logging.format = format;
        }

        Self {
            params,
            logging,
            default_level: DEFAULT_LOG_LEVEL,
        }
    }

    /// Default log level for the built parameters when no setting names one.
    ///
    /// The binary passes the level of the installed subscriber, so a `RULES_LOG`
    /// override is what `check` reports.
    pub fn with_default_level(mut self, level: LogLevel) -> Self {
        self.default_level = level;
        self
    }

    /// Level the subscriber should use, available before validation runs.
    /// `RULES_LOG` still takes precedence when the subscriber is installed.
    pub fn log_level(&self) -> LogLevel {
        self.params
            .iter()
            .rev()
            .find_map(|p| match p {
                Parameter::LogLevel(level) => Some(*level),
                _ => None,
            })
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn execute(self, command: &Commands) -> Result<String, ServiceError> {
        match command {
            Commands::Check { format } => {
                let params =
                    parameters::build_with_default_level(self.default_level, self.params)?;
                render(&params, *format)
            }
            Commands::Start => {
                let service = Service::with_default_level(self.default_level, self.params)?;
                let path = service.parameters().storage_path().display().to_string();
                service.shutdown()?;
                Ok(format!("Rules store ready at {}", path))
            }
        }
    }
}

fn render(params: &Parameters, format: OutputFormat) -> Result<String, ServiceError> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(params)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to encode JSON: {}", e))),
        OutputFormat::Toml => toml::to_string_pretty(params)
            .map_err(|e| ServiceError::ConfigError(format!("Failed to encode TOML: {}", e))),
        OutputFormat::Text => {
            let admin_ips = if params.admin_ips().is_empty() {
                "(none)".to_string()
            } else {
                params.admin_ips().join("\n")
            };

            let mut table = Table::new();
            table.load_preset(UTF8_FULL).set_header(vec!["Setting", "Value"]);
            table.add_row(vec![
                "storage_path".to_string(),
                params.storage_path().display().to_string(),
            ]);
            table.add_row(vec!["log_level".to_string(), params.log_level().to_string()]);
            table.add_row(vec!["admin_ips".to_string(), admin_ips]);
            table.add_row(vec![
                "periodic_pruning".to_string(),
                params.periodic_pruning().to_string(),
            ]);
            Ok(table.to_string())
        }
    }
}
