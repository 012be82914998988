//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod campaign;
mod instance;

pub use campaign::CampaignCommands;
pub use instance::InstanceCommands;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};
use colored::*;
use std::time::Duration;
use tracing::info;
use warmup_monitor::{MonitorSettings, PollConfig, PollHandle, PollOutcome};

use crate::config::Config;
use crate::output::colorize_poll_state;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Messaging instance management
    Instance {
        #[command(subcommand)]
        command: InstanceCommands,
    },
    /// Warm-up campaign management
    Campaign {
        #[command(subcommand)]
        command: CampaignCommands,
    },
}

/// Polling overrides shared by every command that waits
#[derive(Args, Debug, Clone, Default)]
pub struct PollArgs {
    /// Delay between status polls, in milliseconds
    #[arg(long)]
    pub interval_ms: Option<u64>,

    /// Give up after this many polls
    #[arg(long)]
    pub max_attempts: Option<u32>,
}

impl PollArgs {
    /// Applies the process defaults, then any command-line override
    pub fn apply<S>(&self, defaults: &MonitorSettings, config: PollConfig<S>) -> PollConfig<S> {
        let mut config = config.with_settings(defaults);
        if let Some(ms) = self.interval_ms {
            config = config.interval(Duration::from_millis(ms));
        }
        if let Some(max_attempts) = self.max_attempts {
            config = config.max_attempts(max_attempts);
        }
        config
    }
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Instance { command } => instance::handle_instance_command(command, config).await,
        Commands::Campaign { command } => campaign::handle_campaign_command(command, config).await,
    }
}

/// Waits for a poll job, cancelling it on Ctrl-C
async fn wait_interruptible<S>(handle: PollHandle<S>) -> Result<PollOutcome<S>> {
    let cancel = handle.cancel_handle();
    let interrupt = tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, cancelling poll");
            cancel.cancel();
        }
    });

    let outcome = handle.wait().await;
    interrupt.abort();

    Ok(outcome?)
}

/// Turns a non-successful outcome into an error for the exit status
fn require_success<S>(outcome: &PollOutcome<S>, what: &str) -> Result<()> {
    println!(
        "{} {}",
        format!("{}:", what).bold(),
        colorize_poll_state(outcome.state())
    );

    match outcome {
        PollOutcome::Succeeded(_) => Ok(()),
        PollOutcome::Failed(_) => bail!("{} failed", what),
        PollOutcome::TimedOut => bail!("{} timed out", what),
        PollOutcome::Cancelled => bail!("{} cancelled", what),
    }
}
