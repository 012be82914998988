//! Warmup CLI
//!
//! Command-line interface for the warm-up backend: pair instances, start
//! and stop warm-ups, and wait for either to settle.

mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use commands::{Commands, handle_command};
use config::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use warmup_monitor::MonitorSettings;

#[derive(Parser)]
#[command(name = "warmup")]
#[command(about = "WhatsApp warm-up campaign CLI", long_about = None)]
struct Cli {
    /// Backend URL
    #[arg(long, env = "WARMUP_BACKEND_URL", default_value = "http://localhost:8080")]
    backend_url: String,

    /// API key sent with every request
    #[arg(long, env = "WARMUP_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warmup_cli=info,warmup_monitor=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let config = Config {
        backend_url: cli.backend_url,
        api_key: cli.api_key,
        monitor: MonitorSettings::from_env(),
    };
    config.validate()?;

    handle_command(cli.command, &config).await
}
