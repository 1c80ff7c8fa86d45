//! Service Parameters
//!
//! Startup parameters for the rules service. Callers supply any number of [`Parameter`]
//! values in any order; [`build`] applies them to a fresh set of defaults, last write
//! winning, and then runs a single validation pass. The resulting [`Parameters`] value is
//! read-only.
//!
//! ```no_run
//! use rules_service::parameters::{self, with_admin_ips, with_storage_path};
//!
//! let params = parameters::build([
//!     with_storage_path("/var/lib/rules"),
//!     with_admin_ips(["10.0.0.1"]),
//! ])
//! .expect("storage path supplied");
//! assert!(!params.periodic_pruning());
//! ```

use crate::error::ParameterError;
use crate::logging::LogLevel;
use serde::Serialize;
use std::path::{Path, PathBuf};

const STORAGE_PATH_FIELD: &str = "storage path";

/// Validated service parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Parameters {
    log_level: LogLevel,
    storage_path: PathBuf,
    admin_ips: Vec<String>,
    periodic_pruning: bool,
}

impl Parameters {
    fn with_defaults(log_level: LogLevel) -> Self {
        Self {
            log_level,
            storage_path: PathBuf::new(),
            admin_ips: Vec::new(),
            periodic_pruning: false,
        }
    }

    fn validate(&self) -> Result<(), ParameterError> {
        if self.storage_path.as_os_str().is_empty() {
            return Err(ParameterError::MissingMandatoryField {
                field: STORAGE_PATH_FIELD,
            });
        }
        Ok(())
    }

    pub fn log_level(&self) -> LogLevel {
        self.log_level
    }

    /// Location of the rules database. Never empty.
    pub fn storage_path(&self) -> &Path {
        &self.storage_path
    }

    /// Addresses allowed administrative access, in the order supplied.
    /// Entries are not checked for well-formedness.
    pub fn admin_ips(&self) -> &[String] {
        &self.admin_ips
    }

    pub fn periodic_pruning(&self) -> bool {
        self.periodic_pruning
    }
}

/// A single deferred change to [`Parameters`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Parameter {
    LogLevel(LogLevel),
    StoragePath(PathBuf),
    AdminIps(Vec<String>),
    PeriodicPruning(bool),
}

impl Parameter {
    fn apply(self, params: &mut Parameters) {
        match self {
            Parameter::LogLevel(level) => params.log_level = level,
            Parameter::StoragePath(path) => params.storage_path = path,
            Parameter::AdminIps(ips) => params.admin_ips = ips,
            Parameter::PeriodicPruning(enabled) => params.periodic_pruning = enabled,
        }
    }
}

/// Sets the log level for the service.
pub fn with_log_level(level: LogLevel) -> Parameter {
    Parameter::LogLevel(level)
}

/// Sets the storage path for the service.
pub fn with_storage_path(path: impl Into<PathBuf>) -> Parameter {
    Parameter::StoragePath(path.into())
}

/// Sets the administration IP addresses, replacing any set earlier.
pub fn with_admin_ips<I, S>(ips: I) -> Parameter
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Parameter::AdminIps(ips.into_iter().map(Into::into).collect())
}

/// Enables or disables periodic pruning of the rules database.
pub fn with_periodic_pruning(enabled: bool) -> Parameter {
    Parameter::PeriodicPruning(enabled)
}

/// Build parameters, defaulting the log level to the process-wide level.
///
/// See [`build_with_default_level`].
pub fn build<I>(params: I) -> Result<Parameters, ParameterError>
where
    I: IntoIterator<Item = Parameter>,
{
    build_with_default_level(LogLevel::current(), params)
}

/// Build parameters from `default_level` and the supplied settings.
///
/// Settings are applied strictly in order. Validation runs once, after all of them, so a
/// mandatory value may arrive at any position.
///
/// # Errors
///
/// Returns [`ParameterError::MissingMandatoryField`] if no non-empty storage path is set
/// once every setting has been applied.
pub fn build_with_default_level<I>(
    default_level: LogLevel,
    params: I,
) -> Result<Parameters, ParameterError>
where
    I: IntoIterator<Item = Parameter>,
{
    let mut parameters = Parameters::with_defaults(default_level);
    for param in params {
        param.apply(&mut parameters);
    }

    parameters.validate()?;

    Ok(parameters)
}
