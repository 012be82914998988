//! Configuration module
//!
//! Handles CLI configuration: backend location, credentials and polling
//! defaults. Everything is passed explicitly to the command handlers.

use std::sync::Arc;

use anyhow::{Result, bail};
use warmup_client::BackendClient;
use warmup_monitor::MonitorSettings;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// URL of the warm-up backend
    pub backend_url: String,

    /// API key for the backend, if it requires one
    pub api_key: Option<String>,

    /// Polling defaults, overridable per command
    pub monitor: MonitorSettings,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if !self.backend_url.starts_with("http://") && !self.backend_url.starts_with("https://") {
            bail!("backend_url must start with http:// or https://");
        }

        self.monitor.validate()?;
        Ok(())
    }

    /// Builds a backend client from this configuration
    pub fn client(&self) -> Arc<BackendClient> {
        let client = BackendClient::new(&self.backend_url);
        let client = match &self.api_key {
            Some(key) => client.with_api_key(key),
            None => client,
        };
        Arc::new(client)
    }
}
