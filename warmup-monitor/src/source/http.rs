//! HTTP-backed status sources
//!
//! Thin adapters from [`BackendClient`] endpoints to [`StatusSource`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use warmup_client::BackendClient;
use warmup_core::domain::instance::InstanceSnapshot;
use warmup_core::domain::warmup::WarmupSnapshot;

use super::{SourceError, StatusSource};

/// Polls `GET /instance/connectionState/{name}`
#[derive(Debug, Clone)]
pub struct InstanceStatusSource {
    client: Arc<BackendClient>,
}

impl InstanceStatusSource {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusSource for InstanceStatusSource {
    type Snapshot = InstanceSnapshot;

    async fn fetch(&self, target_id: &str) -> Result<InstanceSnapshot, SourceError> {
        let response = self.client.connection_state(target_id).await?;
        Ok(response.into_snapshot(Utc::now()))
    }
}

/// Polls `GET /warmup/{id}/status`
#[derive(Debug, Clone)]
pub struct WarmupStatusSource {
    client: Arc<BackendClient>,
}

impl WarmupStatusSource {
    pub fn new(client: Arc<BackendClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl StatusSource for WarmupStatusSource {
    type Snapshot = WarmupSnapshot;

    async fn fetch(&self, target_id: &str) -> Result<WarmupSnapshot, SourceError> {
        let response = self.client.warmup_status(target_id).await?;
        Ok(response.into_snapshot(Utc::now()))
    }
}
