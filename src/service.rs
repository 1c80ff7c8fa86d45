//! Rules service handle
//!
//! Validates the startup parameters and opens the rules store. Rule evaluation, admin
//! admission and pruning are driven by the rules engine, which reads what it needs through
//! the accessors here.

use crate::error::ServiceError;
use crate::logging::LogLevel;
use crate::parameters::{self, Parameter, Parameters};
use crate::store::RulesStore;
use tracing::{info, warn};

/// A started rules service
pub struct Service {
    parameters: Parameters,
    store: RulesStore,
}

impl Service {
    /// Start the service with the process-wide log level as the default level.
    pub fn new<I>(params: I) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = Parameter>,
    {
        Self::with_default_level(LogLevel::current(), params)
    }

    /// Start the service with an explicit default log level.
    pub fn with_default_level<I>(default_level: LogLevel, params: I) -> Result<Self, ServiceError>
    where
        I: IntoIterator<Item = Parameter>,
    {
        let parameters = parameters::build_with_default_level(default_level, params)?;
        let store = RulesStore::open(parameters.storage_path())?;

        info!(
            service = "rules",
            storage_path = %parameters.storage_path().display(),
            log_level = %parameters.log_level(),
            admin_ips = parameters.admin_ips().len(),
            periodic_pruning = parameters.periodic_pruning(),
            "Rules service started"
        );
        if parameters.admin_ips().is_empty() {
            warn!(service = "rules", "No admin IPs configured; administrative access disabled");
        }

        Ok(Self { parameters, store })
    }

    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    pub fn store(&self) -> &RulesStore {
        &self.store
    }

    pub fn admin_ips(&self) -> &[String] {
        self.parameters.admin_ips()
    }

    pub fn periodic_pruning(&self) -> bool {
        self.parameters.periodic_pruning()
    }

    /// Flush the store before shutdown.
    pub fn shutdown(self) -> Result<(), ServiceError> {
        let flushed = self.store.flush()?;
        info!(service = "rules", bytes = flushed, "Rules service stopped");
        Ok(())
    }
}
