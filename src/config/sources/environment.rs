//! Environment source: RULES_* variables.
//!
//! `RULES_STORAGE_PATH`, `RULES_LOG_LEVEL`, `RULES_PERIODIC_PRUNING` map to top-level keys,
//! `RULES_ADMIN_IPS` is split on commas, and a double underscore selects a section
//! (`RULES_LOGGING__FORMAT`). Values are kept as strings; `periodic_pruning` and
//! `logging.color` are converted only when deserialized into their boolean fields.

use config::builder::DefaultState;
use config::ConfigBuilder;
use config::ConfigError;
use config::Environment;
use std::collections::HashMap;

pub const ENV_PREFIX: &str = "RULES";

const ADMIN_IPS_VAR: &str = "RULES_ADMIN_IPS";

/// Add the environment source. `vars` replaces the process environment when given.
///
/// An empty `RULES_ADMIN_IPS` sets an empty admin list rather than a single empty entry.
pub fn add_to_builder(
    builder: ConfigBuilder<DefaultState>,
    vars: Option<HashMap<String, String>>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    let mut vars = vars.unwrap_or_else(|| std::env::vars().collect());
    let clear_admin_ips = vars
        .get(ADMIN_IPS_VAR)
        .is_some_and(|value| value.trim().is_empty());
    if clear_admin_ips {
        vars.remove(ADMIN_IPS_VAR);
    }

    let builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("_")
            .separator("__")
            .list_separator(",")
            .with_list_parse_key("admin_ips")
            .source(Some(vars)),
    );

    if clear_admin_ips {
        builder.set_override("admin_ips", Vec::<String>::new())
    } else {
        Ok(builder)
    }
}
