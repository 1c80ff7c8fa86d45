//! Rules Service Binary
//!
//! Resolves startup settings from configuration files, environment and flags, validates
//! them, and reports or opens the rules store.

use anyhow::Context;
use clap::Parser;
use rules_service::cli::{Cli, RunContext};
use rules_service::logging::{init_logging, LogLevel};
use std::process;
use tracing::{error, info};

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => println!("{}", output),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = RunContext::new(cli).context("Failed to load configuration")?;

    init_logging(context.log_level(), context.logging()).context("Failed to initialize logging")?;
    let context = context.with_default_level(LogLevel::current());
    info!(command = ?cli.command, "Rules service command starting");

    let output = context.execute(&cli.command).map_err(|e| {
        error!("Command failed: {}", e);
        e
    })?;

    info!("Command completed successfully");
    Ok(output)
}
