//! Warm-up-related API endpoints

use tracing::debug;
use warmup_core::domain::warmup::WarmupSession;
use warmup_core::dto::warmup::{StartWarmup, WarmupStatusResponse};

use crate::error::{ClientError, Result};
use crate::{BackendClient, require_id};

impl BackendClient {
    // =============================================================================
    // Warm-up Sessions
    // =============================================================================

    /// Start a warm-up between the given instances
    ///
    /// At least two instances are required since the backend exchanges
    /// messages between them.
    pub async fn start_warmup(&self, req: StartWarmup) -> Result<WarmupSession> {
        if req.instances.len() < 2 {
            return Err(ClientError::InvalidRequest(
                "a warm-up needs at least two instances".to_string(),
            ));
        }
        debug!("Starting warm-up for {} instance(s)", req.instances.len());

        let url = self.endpoint(&["warmup", "start"])?;
        let response = self
            .authorize(self.client.post(url).json(&req))
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Stop a running warm-up
    pub async fn stop_warmup(&self, id: &str) -> Result<()> {
        require_id("warm-up id", id)?;

        let url = self.endpoint(&["warmup", id, "stop"])?;
        let response = self.authorize(self.client.post(url)).send().await?;

        self.handle_empty_response(response).await
    }

    /// Get the current status of a warm-up
    pub async fn warmup_status(&self, id: &str) -> Result<WarmupStatusResponse> {
        require_id("warm-up id", id)?;

        let url = self.endpoint(&["warmup", id, "status"])?;
        let response = self.authorize(self.client.get(url)).send().await?;

        self.handle_response(response).await
    }
}
