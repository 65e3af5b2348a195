//! Rebyte CLI library

pub mod agent;
pub mod skill;
pub mod task;

// Re-export CLI types for testing
pub use clap::{Parser, Subcommand};

use std::time::Duration;

use anyhow::{Context, Result};
use rebyte_client_api::WaitOptions;
use rebyte_rest_client::RestClient;
use tracing::debug;

#[derive(Parser)]
#[command(name = "rebyte")]
#[command(about = "Rebyte orchestration CLI")]
#[command(version, author, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Task management commands
    Task {
        #[command(subcommand)]
        subcommand: task::TaskCommands,
    },
    /// Skill store commands
    Skill {
        #[command(subcommand)]
        subcommand: skill::SkillCommands,
    },
    /// Cloud agent commands
    Agent {
        #[command(subcommand)]
        subcommand: agent::AgentCommands,
    },
}

/// Construct the API client from the environment
pub(crate) fn api_client() -> Result<RestClient> {
    let client = RestClient::from_env().context("Failed to construct API client")?;
    debug!(base_url = %client.base_url(), "API client ready");
    Ok(client)
}

/// Print a resource as indented JSON
pub(crate) fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

pub(crate) fn wait_options(poll_interval_secs: u64, timeout_secs: u64) -> WaitOptions {
    WaitOptions::new(
        Duration::from_secs(poll_interval_secs),
        Duration::from_secs(timeout_secs),
    )
}
