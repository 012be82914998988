//! Connection polling monitor
//!
//! Each started job runs in its own task with its own timer and attempt
//! counter. A tick fetches one snapshot, evaluates the caller's predicates
//! and either ends the job or sleeps for the configured interval. The next
//! request is never issued before the previous one settled.
//!
//! Cancellation wins every race: the cancellation branch is polled first,
//! and a request still in flight when the job is cancelled is dropped
//! without its result being looked at.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{Instrument, debug, info, info_span, warn};
use uuid::Uuid;
use warmup_core::domain::poll::{PollOutcome, PollProgress, PollState};

use crate::config::PollConfig;
use crate::error::{MonitorError, Result};
use crate::source::StatusSource;

/// Starts poll jobs against one status source
pub struct ConnectionPollingMonitor<Src: ?Sized> {
    source: Arc<Src>,
}

impl<Src> ConnectionPollingMonitor<Src>
where
    Src: StatusSource + 'static,
{
    /// Creates a monitor that polls `source`
    pub fn new(source: Src) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

impl<Src> ConnectionPollingMonitor<Src>
where
    Src: StatusSource + ?Sized + 'static,
{
    /// Creates a monitor sharing an existing source
    pub fn from_arc(source: Arc<Src>) -> Self {
        Self { source }
    }

    /// Starts monitoring `target_id`
    ///
    /// The first request is issued as soon as the spawned task runs, then
    /// one per `config.interval` until the job reaches a terminal state.
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    /// Returns `MonitorError::InvalidConfig` for an empty `target_id` or a
    /// zero attempt cap. No request is issued in that case.
    pub fn start(
        &self,
        target_id: impl Into<String>,
        config: PollConfig<Src::Snapshot>,
    ) -> Result<PollHandle<Src::Snapshot>> {
        let target_id = target_id.into();
        if target_id.trim().is_empty() {
            return Err(MonitorError::InvalidConfig(
                "target_id cannot be empty".to_string(),
            ));
        }
        config.validate()?;

        let job = PollJob {
            job_id: Uuid::new_v4(),
            target_id,
            attempt: 0,
            max_attempts: config.max_attempts,
            interval: config.interval,
        };
        let job_id = job.job_id;

        let token = CancellationToken::new();
        let (progress_tx, progress_rx) = watch::channel(PollProgress::new(job.max_attempts));

        let span = info_span!("poll_job", job_id = %job.job_id, target = %job.target_id);
        let task = tokio::spawn(
            run_job(
                job,
                Arc::clone(&self.source),
                config,
                token.clone(),
                progress_tx,
            )
            .instrument(span),
        );

        Ok(PollHandle {
            job_id,
            cancel: CancelHandle { token },
            progress: progress_rx,
            task,
        })
    }
}

impl<Src: ?Sized> Clone for ConnectionPollingMonitor<Src> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

/// One outstanding monitoring task, owned by the poll loop
#[derive(Debug)]
struct PollJob {
    job_id: Uuid,
    target_id: String,
    attempt: u32,
    max_attempts: u32,
    interval: Duration,
}

impl PollJob {
    fn progress(&self, state: PollState) -> PollProgress {
        PollProgress {
            attempt: self.attempt,
            max_attempts: self.max_attempts,
            state,
        }
    }
}

/// Handle to a running poll job
///
/// Dropping the handle does not stop the job; call [`PollHandle::cancel`].
#[derive(Debug)]
pub struct PollHandle<S> {
    job_id: Uuid,
    cancel: CancelHandle,
    progress: watch::Receiver<PollProgress>,
    task: JoinHandle<PollOutcome<S>>,
}

impl<S> PollHandle<S> {
    /// Identifier used in this job's log lines
    pub fn job_id(&self) -> Uuid {
        self.job_id
    }

    /// Stops the job; its outcome becomes `Cancelled` unless it already ended
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// A cloneable handle that can cancel this job from elsewhere
    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Latest published progress
    pub fn progress(&self) -> PollProgress {
        *self.progress.borrow()
    }

    /// Receiver notified after every poll and on the terminal transition
    pub fn subscribe(&self) -> watch::Receiver<PollProgress> {
        self.progress.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Waits for the terminal outcome
    ///
    /// # Errors
    /// `MonitorError::TaskFailed` if the poll task panicked, which only
    /// happens when a caller-supplied predicate or callback panics.
    pub async fn wait(self) -> Result<PollOutcome<S>> {
        Ok(self.task.await?)
    }
}

/// Cancels a poll job
#[derive(Debug, Clone)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    /// Requests cancellation; never fails and is idempotent
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// The poll loop of one job
async fn run_job<Src>(
    mut job: PollJob,
    source: Arc<Src>,
    config: PollConfig<Src::Snapshot>,
    token: CancellationToken,
    progress: watch::Sender<PollProgress>,
) -> PollOutcome<Src::Snapshot>
where
    Src: StatusSource + ?Sized,
{
    debug!(
        "Starting poll job (interval: {:?}, max attempts: {})",
        job.interval, job.max_attempts
    );

    let outcome = loop {
        if token.is_cancelled() {
            break PollOutcome::Cancelled;
        }

        let fetched = tokio::select! {
            biased;
            _ = token.cancelled() => None,
            result = source.fetch(&job.target_id) => Some(result),
        };

        let Some(result) = fetched else {
            debug!("Cancelled with a request in flight, discarding it");
            break PollOutcome::Cancelled;
        };

        job.attempt += 1;

        match result {
            Ok(snapshot) => {
                let current = job.progress(PollState::Pending);
                progress.send_replace(current);

                if let Some(on_snapshot) = &config.on_snapshot {
                    on_snapshot(&snapshot, &current);
                }

                if config
                    .is_failure
                    .as_ref()
                    .is_some_and(|is_failure| is_failure(&snapshot))
                {
                    break PollOutcome::Failed(snapshot);
                }

                if (config.is_success)(&snapshot) {
                    break PollOutcome::Succeeded(snapshot);
                }

                debug!("Attempt {}/{}: not ready", job.attempt, job.max_attempts);
            }
            Err(e) => {
                warn!(
                    "Attempt {}/{} failed, will retry: {}",
                    job.attempt, job.max_attempts, e
                );
                progress.send_replace(job.progress(PollState::Pending));
            }
        }

        if job.attempt >= job.max_attempts {
            break PollOutcome::TimedOut;
        }

        tokio::select! {
            biased;
            _ = token.cancelled() => break PollOutcome::Cancelled,
            _ = tokio::time::sleep(job.interval) => {}
        }
    };

    let state = outcome.state();
    progress.send_replace(job.progress(state));
    info!("Poll job finished as {} after {} attempt(s)", state, job.attempt);

    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Notify;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Conn {
        Connecting,
        Open,
        Refused,
    }

    /// Replays a fixed script of results, then repeats `fallback`
    struct ScriptedSource {
        script: Mutex<VecDeque<std::result::Result<Conn, String>>>,
        fallback: Conn,
        calls: AtomicUsize,
    }

    impl ScriptedSource {
        fn new(script: Vec<std::result::Result<Conn, String>>, fallback: Conn) -> Self {
            Self {
                script: Mutex::new(script.into()),
                fallback,
                calls: AtomicUsize::new(0),
            }
        }

        fn always(conn: Conn) -> Self {
            Self::new(vec![], conn)
        }
    }

    #[async_trait]
    impl StatusSource for ScriptedSource {
        type Snapshot = Conn;

        async fn fetch(&self, _target_id: &str) -> std::result::Result<Conn, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            let next = self.script.lock().unwrap().pop_front();
            match next {
                Some(Ok(conn)) => Ok(conn),
                Some(Err(msg)) => Err(SourceError::Unavailable(msg)),
                None => Ok(self.fallback),
            }
        }
    }

    /// Blocks every fetch until released, to hold a request in flight
    struct GatedSource {
        entered: Notify,
        release: Notify,
        calls: AtomicUsize,
    }

    #[async_trait]
    impl StatusSource for GatedSource {
        type Snapshot = Conn;

        async fn fetch(&self, _target_id: &str) -> std::result::Result<Conn, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.entered.notify_one();
            self.release.notified().await;
            Ok(Conn::Open)
        }
    }

    fn fast_config(max_attempts: u32) -> PollConfig<Conn> {
        PollConfig::new(|c: &Conn| *c == Conn::Open)
            .interval(Duration::ZERO)
            .max_attempts(max_attempts)
    }

    #[tokio::test]
    async fn test_times_out_after_exactly_max_attempts() {
        for max_attempts in [1, 2, 5, 10] {
            let source = Arc::new(ScriptedSource::always(Conn::Connecting));
            let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

            let handle = monitor.start("sales-01", fast_config(max_attempts)).unwrap();
            let outcome = handle.wait().await.unwrap();

            assert_eq!(outcome, PollOutcome::TimedOut);
            assert_eq!(source.calls.load(Ordering::SeqCst), max_attempts as usize);
        }
    }

    #[tokio::test]
    async fn test_single_attempt_times_out() {
        let source = Arc::new(ScriptedSource::always(Conn::Connecting));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let handle = monitor.start("sales-01", fast_config(1)).unwrap();
        let outcome = handle.wait().await.unwrap();

        assert_eq!(outcome.state(), PollState::TimedOut);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_succeeds_on_second_snapshot() {
        let source = Arc::new(ScriptedSource::new(
            vec![Ok(Conn::Connecting), Ok(Conn::Open)],
            Conn::Connecting,
        ));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let handle = monitor.start("sales-01", fast_config(3)).unwrap();
        let outcome = handle.wait().await.unwrap();

        assert_eq!(outcome, PollOutcome::Succeeded(Conn::Open));
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_success_stops_polling() {
        let source = Arc::new(ScriptedSource::new(
            vec![Ok(Conn::Connecting), Ok(Conn::Connecting), Ok(Conn::Open)],
            Conn::Open,
        ));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let handle = monitor.start("sales-01", fast_config(10)).unwrap();
        let progress = handle.subscribe();
        let outcome = handle.wait().await.unwrap();

        assert!(outcome.is_success());
        // Give a misbehaving loop the chance to issue another request.
        tokio::task::yield_now().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);

        let last = *progress.borrow();
        assert_eq!(last.attempt, 3);
        assert_eq!(last.state, PollState::Succeeded);
    }

    #[tokio::test]
    async fn test_failure_takes_precedence_over_success() {
        let source = Arc::new(ScriptedSource::always(Conn::Refused));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let config = PollConfig::new(|_: &Conn| true)
            .failure_when(|c: &Conn| *c == Conn::Refused)
            .interval(Duration::ZERO)
            .max_attempts(5);

        let outcome = monitor.start("sales-01", config).unwrap().wait().await.unwrap();

        assert_eq!(outcome, PollOutcome::Failed(Conn::Refused));
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_before_first_poll() {
        let source = Arc::new(ScriptedSource::always(Conn::Open));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let handle = monitor.start("sales-01", fast_config(3)).unwrap();
        handle.cancel();
        let outcome = handle.wait().await.unwrap();

        assert_eq!(outcome, PollOutcome::Cancelled);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_cancel_discards_in_flight_response() {
        let source = Arc::new(GatedSource {
            entered: Notify::new(),
            release: Notify::new(),
            calls: AtomicUsize::new(0),
        });
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let handle = monitor.start("sales-01", fast_config(3)).unwrap();
        let progress = handle.subscribe();

        source.entered.notified().await;
        handle.cancel();
        // The response would have matched `is_success`.
        source.release.notify_one();

        let outcome = handle.wait().await.unwrap();
        assert_eq!(outcome, PollOutcome::Cancelled);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);

        let last = *progress.borrow();
        assert_eq!(last.attempt, 0);
        assert_eq!(last.state, PollState::Cancelled);
    }

    #[tokio::test]
    async fn test_cancel_after_terminal_keeps_outcome() {
        let source = Arc::new(ScriptedSource::always(Conn::Open));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let handle = monitor.start("sales-01", fast_config(3)).unwrap();
        let mut progress = handle.subscribe();
        progress
            .wait_for(|p| p.state.is_terminal())
            .await
            .unwrap();

        handle.cancel();
        let outcome = handle.wait().await.unwrap();
        assert_eq!(outcome, PollOutcome::Succeeded(Conn::Open));
    }

    #[tokio::test]
    async fn test_transient_errors_count_as_attempts() {
        let source = Arc::new(ScriptedSource::new(
            vec![
                Ok(Conn::Connecting),
                Err("connection reset".to_string()),
                Err("timeout".to_string()),
                Ok(Conn::Open),
            ],
            Conn::Connecting,
        ));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let handle = monitor.start("sales-01", fast_config(5)).unwrap();
        let progress = handle.subscribe();
        let outcome = handle.wait().await.unwrap();

        assert_eq!(outcome, PollOutcome::Succeeded(Conn::Open));
        assert_eq!(source.calls.load(Ordering::SeqCst), 4);
        assert_eq!(progress.borrow().attempt, 4);
    }

    #[tokio::test]
    async fn test_errors_until_exhausted_time_out() {
        let source = Arc::new(ScriptedSource::new(
            vec![Err("down".to_string()), Err("down".to_string())],
            Conn::Open,
        ));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let outcome = monitor
            .start("sales-01", fast_config(2))
            .unwrap()
            .wait()
            .await
            .unwrap();

        assert_eq!(outcome, PollOutcome::TimedOut);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_on_snapshot_sees_every_decoded_snapshot() {
        let source = Arc::new(ScriptedSource::new(
            vec![
                Ok(Conn::Connecting),
                Err("blip".to_string()),
                Ok(Conn::Connecting),
                Ok(Conn::Open),
            ],
            Conn::Connecting,
        ));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let config = fast_config(10).on_snapshot(move |conn: &Conn, progress: &PollProgress| {
            sink.lock().unwrap().push((*conn, progress.attempt, progress.max_attempts));
        });

        let outcome = monitor.start("sales-01", config).unwrap().wait().await.unwrap();
        assert!(outcome.is_success());

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (Conn::Connecting, 1, 10),
                (Conn::Connecting, 3, 10),
                (Conn::Open, 4, 10),
            ]
        );
    }

    #[tokio::test]
    async fn test_rejects_invalid_jobs_without_polling() {
        let source = Arc::new(ScriptedSource::always(Conn::Open));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        assert!(matches!(
            monitor.start("", fast_config(3)),
            Err(MonitorError::InvalidConfig(_))
        ));
        assert!(matches!(
            monitor.start("sales-01", fast_config(0)),
            Err(MonitorError::InvalidConfig(_))
        ));

        tokio::task::yield_now().await;
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_independent_jobs_do_not_interfere() {
        let monitor = ConnectionPollingMonitor::new(ScriptedSource::always(Conn::Connecting));

        let slow = fast_config(50).interval(Duration::from_secs(3600));
        let first = monitor.start("a", slow).unwrap();
        let second = monitor.start("b", fast_config(2)).unwrap();

        assert_eq!(second.wait().await.unwrap(), PollOutcome::TimedOut);
        assert!(!first.cancel_handle().is_cancelled());

        first.cancel();
        assert_eq!(first.wait().await.unwrap(), PollOutcome::Cancelled);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_interval_between_polls() {
        let source = Arc::new(ScriptedSource::new(
            vec![Ok(Conn::Connecting), Ok(Conn::Connecting)],
            Conn::Open,
        ));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let config = PollConfig::new(|c: &Conn| *c == Conn::Open)
            .interval(Duration::from_secs(2))
            .max_attempts(60);

        let started = tokio::time::Instant::now();
        let outcome = monitor.start("sales-01", config).unwrap().wait().await.unwrap();

        assert!(outcome.is_success());
        assert_eq!(source.calls.load(Ordering::SeqCst), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(4));
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_during_interval() {
        let source = Arc::new(ScriptedSource::always(Conn::Connecting));
        let monitor = ConnectionPollingMonitor::from_arc(Arc::clone(&source));

        let config = PollConfig::new(|c: &Conn| *c == Conn::Open)
            .interval(Duration::from_secs(60))
            .max_attempts(60);

        let handle = monitor.start("sales-01", config).unwrap();
        let mut progress = handle.subscribe();
        progress.wait_for(|p| p.attempt == 1).await.unwrap();

        handle.cancel();
        assert_eq!(handle.wait().await.unwrap(), PollOutcome::Cancelled);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }
}
