//! Instance-related API endpoints

use tracing::debug;
use warmup_core::domain::instance::{Instance, QrCode};
use warmup_core::dto::instance::ConnectionStateResponse;

use crate::error::Result;
use crate::{BackendClient, require_id};

impl BackendClient {
    // =============================================================================
    // Instance Connection
    // =============================================================================

    /// List every instance known to the backend
    pub async fn list_instances(&self) -> Result<Vec<Instance>> {
        let url = self.endpoint(&["instance", "fetchInstances"])?;
        let response = self.authorize(self.client.get(url)).send().await?;

        self.handle_response(response).await
    }

    /// Ask the backend to start pairing an instance
    ///
    /// The returned QR code must be scanned on the phone; the instance then
    /// moves from `connecting` to `open`, which callers observe by polling
    /// [`BackendClient::connection_state`].
    ///
    /// # Example
    /// ```no_run
    /// # use warmup_client::BackendClient;
    /// # async fn example() -> Result<(), warmup_client::ClientError> {
    /// let client = BackendClient::new("http://localhost:8080");
    /// let qr = client.connect_instance("sales-01").await?;
    /// if let Some(code) = qr.code {
    ///     println!("scan: {}", code);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn connect_instance(&self, name: &str) -> Result<QrCode> {
        require_id("instance name", name)?;
        debug!("Requesting QR code for instance {}", name);

        let url = self.endpoint(&["instance", "connect", name])?;
        let response = self.authorize(self.client.get(url)).send().await?;

        self.handle_response(response).await
    }

    /// Get the current connection state of an instance
    pub async fn connection_state(&self, name: &str) -> Result<ConnectionStateResponse> {
        require_id("instance name", name)?;

        let url = self.endpoint(&["instance", "connectionState", name])?;
        let response = self.authorize(self.client.get(url)).send().await?;

        self.handle_response(response).await
    }

    /// Disconnect an instance from the platform
    pub async fn logout_instance(&self, name: &str) -> Result<()> {
        require_id("instance name", name)?;

        let url = self.endpoint(&["instance", "logout", name])?;
        let response = self.authorize(self.client.delete(url)).send().await?;

        self.handle_empty_response(response).await
    }
}
