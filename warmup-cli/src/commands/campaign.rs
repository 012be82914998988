//! Campaign command handlers
//!
//! Starts, stops and inspects warm-ups. `--wait` keeps polling the status
//! endpoint until the requested transition is visible.

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use warmup_client::BackendClient;
use warmup_core::domain::warmup::WarmupSnapshot;
use warmup_core::dto::warmup::StartWarmup;
use warmup_monitor::{ConnectionPollingMonitor, PollConfig, WarmupStatusSource, presets};

use super::{PollArgs, require_success, wait_interruptible};
use crate::config::Config;
use crate::output::{colorize_warmup, print_warmup_session, progress_line};

/// Campaign subcommands
#[derive(Subcommand)]
pub enum CampaignCommands {
    /// Start a warm-up between instances
    Start {
        /// Instance names taking part (at least two)
        #[arg(required = true, num_args = 2..)]
        instances: Vec<String>,

        /// Maximum messages per instance per day
        #[arg(long)]
        daily_limit: Option<u32>,

        /// Wait until the warm-up reports active
        #[arg(long)]
        wait: bool,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Stop a warm-up
    Stop {
        /// Warm-up ID
        id: String,

        /// Wait until the warm-up reports stopped
        #[arg(long)]
        wait: bool,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Show the status of a warm-up
    Status {
        /// Warm-up ID
        id: String,
    },
}

/// Handle campaign commands
pub async fn handle_campaign_command(command: CampaignCommands, config: &Config) -> Result<()> {
    match command {
        CampaignCommands::Start {
            instances,
            daily_limit,
            wait,
            poll,
        } => start_campaign(config, instances, daily_limit, wait, &poll).await,
        CampaignCommands::Stop { id, wait, poll } => stop_campaign(config, &id, wait, &poll).await,
        CampaignCommands::Status { id } => show_status(config, &id).await,
    }
}

/// Start a warm-up, optionally waiting for it to become active
async fn start_campaign(
    config: &Config,
    instances: Vec<String>,
    daily_limit: Option<u32>,
    wait: bool,
    poll: &PollArgs,
) -> Result<()> {
    let client = config.client();

    let session = client
        .start_warmup(StartWarmup {
            instances,
            daily_limit,
        })
        .await
        .context("Failed to start warm-up")?;

    print_warmup_session(&session);

    if wait {
        println!();
        let poll_config = poll.apply(&config.monitor, presets::warmup_started());
        wait_for_status(client, &session.id, poll_config, "Warm-up start").await?;
    }

    Ok(())
}

/// Stop a warm-up, optionally waiting for it to report stopped
async fn stop_campaign(config: &Config, id: &str, wait: bool, poll: &PollArgs) -> Result<()> {
    let client = config.client();

    client
        .stop_warmup(id)
        .await
        .with_context(|| format!("Failed to stop warm-up {}", id))?;

    println!("{} {}", "✓".green(), format!("Stop requested for {}", id).bold());

    if wait {
        let poll_config = poll.apply(&config.monitor, presets::warmup_stopped());
        wait_for_status(client, id, poll_config, "Warm-up stop").await?;
    }

    Ok(())
}

/// Show one warm-up's status
async fn show_status(config: &Config, id: &str) -> Result<()> {
    let status = config
        .client()
        .warmup_status(id)
        .await
        .with_context(|| format!("Failed to get status of warm-up {}", id))?;

    println!(
        "{} {} ({} messages sent)",
        format!("{}:", status.id).bold(),
        colorize_warmup(&status.status),
        status.messages_sent
    );

    Ok(())
}

/// Poll a warm-up's status with the given config
async fn wait_for_status(
    client: Arc<BackendClient>,
    id: &str,
    poll_config: PollConfig<WarmupSnapshot>,
    what: &str,
) -> Result<()> {
    let monitor = ConnectionPollingMonitor::new(WarmupStatusSource::new(client));
    let poll_config = poll_config.on_snapshot(|snapshot, progress| {
        println!("{}", progress_line(progress, &snapshot.status.to_string()));
    });

    let handle = monitor.start(id, poll_config)?;
    let outcome = wait_interruptible(handle).await?;

    require_success(&outcome, what)
}
