//! Instance command handlers
//!
//! Handles listing instances, checking their connection state, pairing
//! them via QR code and logging them out.

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use warmup_monitor::{ConnectionPollingMonitor, InstanceStatusSource, presets};

use super::{PollArgs, require_success, wait_interruptible};
use crate::config::Config;
use crate::output::{colorize_connection, print_instance_summary, print_qr_code, progress_line};

/// Instance subcommands
#[derive(Subcommand)]
pub enum InstanceCommands {
    /// List all instances
    List,
    /// Show the connection state of an instance
    Status {
        /// Instance name
        name: String,
    },
    /// Request a QR code and wait until the instance is paired
    Connect {
        /// Instance name
        name: String,

        #[command(flatten)]
        poll: PollArgs,
    },
    /// Disconnect an instance
    Logout {
        /// Instance name
        name: String,
    },
}

/// Handle instance commands
pub async fn handle_instance_command(command: InstanceCommands, config: &Config) -> Result<()> {
    match command {
        InstanceCommands::List => list_instances(config).await,
        InstanceCommands::Status { name } => show_status(config, &name).await,
        InstanceCommands::Connect { name, poll } => connect_instance(config, &name, &poll).await,
        InstanceCommands::Logout { name } => logout_instance(config, &name).await,
    }
}

/// List all instances
async fn list_instances(config: &Config) -> Result<()> {
    let instances = config
        .client()
        .list_instances()
        .await
        .context("Failed to list instances")?;

    if instances.is_empty() {
        println!("{}", "No instances found.".yellow());
    } else {
        println!("{}", format!("Found {} instance(s):", instances.len()).bold());
        println!();
        for instance in &instances {
            print_instance_summary(instance);
        }
    }

    Ok(())
}

/// Show one instance's connection state
async fn show_status(config: &Config, name: &str) -> Result<()> {
    let response = config
        .client()
        .connection_state(name)
        .await
        .with_context(|| format!("Failed to get connection state of {}", name))?;

    println!(
        "{} {}",
        format!("{}:", response.instance.instance_name).bold(),
        colorize_connection(&response.instance.state)
    );

    Ok(())
}

/// Request a QR code, then poll until the instance is open
async fn connect_instance(config: &Config, name: &str, poll: &PollArgs) -> Result<()> {
    let client = config.client();

    let qr = client
        .connect_instance(name)
        .await
        .with_context(|| format!("Failed to request QR code for {}", name))?;

    if qr.is_empty() {
        println!("{}", "No QR code returned; the instance may already be paired.".dimmed());
    } else {
        print_qr_code(name, &qr);
    }

    let monitor = ConnectionPollingMonitor::new(InstanceStatusSource::new(client));
    let poll_config = poll
        .apply(&config.monitor, presets::instance_connection())
        .on_snapshot(|snapshot, progress| {
            println!("{}", progress_line(progress, &snapshot.state.to_string()));
        });

    println!(
        "{}",
        format!(
            "Waiting for {} to connect (every {:?}, up to {} attempts)...",
            name,
            poll_config.poll_interval(),
            poll_config.attempt_limit()
        )
        .dimmed()
    );

    let handle = monitor.start(name, poll_config)?;
    let outcome = wait_interruptible(handle).await?;

    require_success(&outcome, "Pairing")
}

/// Log an instance out
async fn logout_instance(config: &Config, name: &str) -> Result<()> {
    config
        .client()
        .logout_instance(name)
        .await
        .with_context(|| format!("Failed to log out {}", name))?;

    println!("{} {}", "✓".green(), format!("Logged out {}", name).bold());
    Ok(())
}
