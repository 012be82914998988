//! Status source layer
//!
//! A status source fetches one snapshot for a target identifier. Sources
//! hold no poll state; the monitor decides what a snapshot means.
//!
//! All sources are trait-based so the monitor can be driven by fakes in
//! tests and by closures in ad-hoc callers.

mod http;

pub use http::{InstanceStatusSource, WarmupStatusSource};

use std::future::Future;

use async_trait::async_trait;
use thiserror::Error;
use warmup_client::ClientError;

/// Error from a single fetch
///
/// The monitor treats every variant as transient: it is logged, counted as
/// a used attempt, and polling continues.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The backend call failed
    #[error(transparent)]
    Client(#[from] ClientError),

    /// The source could not produce a snapshot for another reason
    #[error("Status unavailable: {0}")]
    Unavailable(String),
}

/// Fetches the current status of a target
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Decoded status body
    type Snapshot: Send + 'static;

    /// Fetches one snapshot for `target_id`
    ///
    /// # Arguments
    /// * `target_id` - Instance name or warm-up id, never empty
    async fn fetch(&self, target_id: &str) -> Result<Self::Snapshot, SourceError>;
}

/// Status source backed by an async closure
///
/// # Example
/// ```
/// use warmup_monitor::{FnSource, SourceError};
///
/// let source = FnSource::new(|target: String| async move {
///     Ok::<_, SourceError>(format!("{} is open", target))
/// });
/// # let _ = source;
/// ```
pub struct FnSource<F> {
    fetch: F,
}

impl<F> FnSource<F> {
    pub fn new(fetch: F) -> Self {
        Self { fetch }
    }
}

#[async_trait]
impl<F, Fut, S> StatusSource for FnSource<F>
where
    F: Fn(String) -> Fut + Send + Sync,
    Fut: Future<Output = Result<S, SourceError>> + Send,
    S: Send + 'static,
{
    type Snapshot = S;

    async fn fetch(&self, target_id: &str) -> Result<S, SourceError> {
        (self.fetch)(target_id.to_string()).await
    }
}
