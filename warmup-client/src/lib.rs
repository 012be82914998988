//! Warmup HTTP Client
//!
//! A small, type-safe HTTP client for the warm-up backend API.
//!
//! The backend owns every piece of business logic (pairing instances,
//! scheduling synthetic traffic). This crate only shapes requests and
//! decodes responses into `warmup-core` types.
//!
//! # Example
//!
//! ```no_run
//! use warmup_client::BackendClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), warmup_client::ClientError> {
//!     let client = BackendClient::new("http://localhost:8080").with_api_key("secret");
//!
//!     let state = client.connection_state("sales-01").await?;
//!     println!("sales-01 is {}", state.instance.state);
//!     Ok(())
//! }
//! ```

pub mod error;
mod instances;
#[cfg(test)]
mod test_server;
mod warmups;

pub use error::{ClientError, Result};

use reqwest::{Client, RequestBuilder, Url};
use serde::de::DeserializeOwned;

/// Header carrying the backend API key
const API_KEY_HEADER: &str = "apikey";

/// HTTP client for the warm-up backend API
///
/// Endpoints are grouped by resource:
/// - Instance connection (list, connect, connection state, logout)
/// - Warm-up sessions (start, stop, status)
#[derive(Debug, Clone)]
pub struct BackendClient {
    /// Base URL of the backend (e.g., "http://localhost:8080")
    base_url: String,
    /// API key sent with every request, if configured
    api_key: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl BackendClient {
    /// Create a new backend client
    ///
    /// # Arguments
    /// * `base_url` - The base URL of the backend API (e.g., "http://localhost:8080")
    ///
    /// # Example
    /// ```
    /// use warmup_client::BackendClient;
    ///
    /// let client = BackendClient::new("http://localhost:8080");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new backend client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use warmup_client::BackendClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(10))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BackendClient::with_client("http://localhost:8080", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: None,
            client,
        }
    }

    /// Attach an API key, sent in the `apikey` header
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        let api_key = api_key.into();
        self.api_key = if api_key.is_empty() {
            None
        } else {
            Some(api_key)
        };
        self
    }

    /// Get the base URL of the backend
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Build a full URL by appending path segments to the base URL
    ///
    /// Each segment is percent-encoded, so an identifier containing `?`,
    /// `#` or `%` stays inside its own segment.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            ClientError::InvalidRequest(format!("Invalid base URL {}: {}", self.base_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| {
                ClientError::InvalidRequest(format!("Base URL cannot take path segments: {}", self.base_url))
            })?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Attach the API key to a request, if one is configured
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.api_key {
            Some(key) => request.header(API_KEY_HEADER, key),
            None => request,
        }
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-2xx statuses become `ClientError::ApiError` carrying the body text.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        response
            .json()
            .await
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response whose body is ignored
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(ClientError::api_error(status.as_u16(), error_text));
        }

        Ok(())
    }
}

/// Reject identifiers that cannot be placed in a URL path segment
fn require_id(kind: &str, id: &str) -> Result<()> {
    if id.trim().is_empty() {
        return Err(ClientError::InvalidRequest(format!("{} cannot be empty", kind)));
    }
    if id.contains('/') {
        return Err(ClientError::InvalidRequest(format!(
            "{} cannot contain '/': {}",
            kind, id
        )));
    }
    Ok(())
}
