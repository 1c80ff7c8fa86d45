//! Configuration System
//!
//! Loads service settings from TOML files and `RULES_*` environment variables. The file
//! layer only collects values: every field is optional, and [`ParameterFile::to_parameters`]
//! turns whatever is present into [`Parameter`]s for the regular build, which remains the
//! single place where validation happens.

use crate::error::ServiceError;
use crate::logging::{LogLevel, LoggingConfig};
use crate::parameters::{
    with_admin_ips, with_log_level, with_periodic_pruning, with_storage_path, Parameter,
};
use config::{Config, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

mod sources;

pub use sources::environment::ENV_PREFIX;
pub use sources::global_file::global_config_path;

/// Settings as read from configuration sources
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterFile {
    /// Log level: trace, debug, info, warn, error, off
    #[serde(default)]
    pub log_level: Option<LogLevel>,

    /// Rules database location
    #[serde(default)]
    pub storage_path: Option<PathBuf>,

    /// Addresses allowed administrative access
    #[serde(default)]
    pub admin_ips: Option<Vec<String>>,

    /// Periodically prune the rules database
    #[serde(default)]
    pub periodic_pruning: Option<bool>,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ParameterFile {
    /// Parameters for every field that was set, in field order.
    pub fn to_parameters(&self) -> Vec<Parameter> {
        let mut params = Vec::new();
        if let Some(level) = self.log_level {
            params.push(with_log_level(level));
        }
        if let Some(path) = &self.storage_path {
            params.push(with_storage_path(path.clone()));
        }
        if let Some(ips) = &self.admin_ips {
            params.push(with_admin_ips(ips.iter().cloned()));
        }
        if let Some(enabled) = self.periodic_pruning {
            params.push(with_periodic_pruning(enabled));
        }
        params
    }
}

/// Layered configuration loader
///
/// Precedence (lowest to highest): global file, explicit file, environment.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    global_file: Option<PathBuf>,
    env: Option<HashMap<String, String>>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            global_file: global_config_path(),
            env: None,
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the global file location; `None` skips the global file.
    pub fn with_global_file(mut self, path: Option<PathBuf>) -> Self {
        self.global_file = path;
        self
    }

    /// Read environment values from `vars` instead of the process environment.
    pub fn with_env(mut self, vars: HashMap<String, String>) -> Self {
        self.env = Some(vars);
        self
    }

    /// Load all sources. An explicit file must exist.
    pub fn load(&self, explicit_file: Option<&Path>) -> Result<ParameterFile, ServiceError> {
        let mut builder = Config::builder();
        builder = sources::global_file::add_to_builder(builder, self.global_file.as_deref());

        if let Some(path) = explicit_file {
            if !path.exists() {
                return Err(ServiceError::ConfigError(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            builder = builder.add_source(File::from(path).required(true));
        }

        builder = sources::environment::add_to_builder(builder, self.env.clone())?;

        let config = builder.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Load a single file, ignoring the global file and the environment.
    pub fn load_from_file(path: &Path) -> Result<ParameterFile, ServiceError> {
        Self::new()
            .with_global_file(None)
            .with_env(HashMap::new())
            .load(Some(path))
    }
}
