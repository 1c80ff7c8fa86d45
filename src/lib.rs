//! Rules Service: Startup Parameters
//!
//! Assembles and validates the startup parameters of a rules-evaluation service from an
//! ordered list of optional settings, and opens the storage those parameters point at.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod parameters;
pub mod service;
pub mod store;

pub use error::{ParameterError, ServiceError, StorageError};
pub use parameters::{
    with_admin_ips, with_log_level, with_periodic_pruning, with_storage_path, Parameter,
    Parameters,
};
pub use service::Service;
