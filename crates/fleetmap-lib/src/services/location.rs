// Location Service
// One-shot and continuous position acquisition over an abstract source
// (browser-geolocation equivalent). A continuous watch always self-cancels
// after WATCH_EXPIRY so an abandoned watch cannot drain the host's battery.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

use crate::models::LocationPoint;

/// A continuous watch stops itself after this long even if never cancelled
pub const WATCH_EXPIRY: Duration = Duration::from_secs(30);

/// Maximum time to wait for a single fix
pub const FIX_TIMEOUT: Duration = Duration::from_secs(5);

/// Polling cadence of the watch loop
pub const WATCH_INTERVAL: Duration = Duration::from_secs(2);

/// Location error
#[derive(Error, Debug)]
pub enum LocationError {
    #[error("geolocation is not supported on this host")]
    NotSupported,

    #[error("location permission denied")]
    PermissionDenied,

    #[error("location fix timed out after {seconds} seconds")]
    Timeout { seconds: u64 },

    #[error("location unavailable: {message}")]
    Unavailable { message: String },
}

impl LocationError {
    pub fn code(&self) -> &'static str {
        match self {
            LocationError::NotSupported => "LOCATION_NOT_SUPPORTED",
            LocationError::PermissionDenied => "LOCATION_PERMISSION_DENIED",
            LocationError::Timeout { .. } => "LOCATION_TIMEOUT",
            LocationError::Unavailable { .. } => "LOCATION_UNAVAILABLE",
        }
    }
}

/// Result type for location operations
pub type LocationResult<T> = Result<T, LocationError>;

/// Fix acquisition options
#[derive(Debug, Clone)]
pub struct FixOptions {
    pub high_accuracy: bool,
    pub timeout: Duration,
    /// Maximum acceptable age of a cached fix; zero means no stale fixes
    pub max_age: Duration,
}

impl Default for FixOptions {
    fn default() -> Self {
        Self {
            high_accuracy: true,
            timeout: FIX_TIMEOUT,
            max_age: Duration::ZERO,
        }
    }
}

/// Host position source (browser geolocation, a GPS daemon, a test stub)
#[async_trait]
pub trait PositionSource: Send + Sync + 'static {
    async fn current_position(&self, options: &FixOptions) -> LocationResult<LocationPoint>;
}

/// Handle to a running continuous watch
///
/// Dropping the handle does not stop the watch; the expiry timer reaps it.
/// `cancel()` stops it early.
pub struct WatchHandle {
    cancel: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl WatchHandle {
    pub fn cancel(mut self) {
        if let Some(tx) = self.cancel.take() {
            let _ = tx.send(());
        }
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// Wraps a position source with timeout and watch lifecycle handling
pub struct LocationProvider<S: PositionSource> {
    source: Arc<S>,
    options: FixOptions,
}

impl<S: PositionSource> LocationProvider<S> {
    pub fn new(source: S) -> Self {
        Self::with_options(source, FixOptions::default())
    }

    pub fn with_options(source: S, options: FixOptions) -> Self {
        Self {
            source: Arc::new(source),
            options,
        }
    }

    /// One-shot position fetch with the configured acquisition timeout.
    pub async fn current_position(&self) -> LocationResult<LocationPoint> {
        match tokio::time::timeout(
            self.options.timeout,
            self.source.current_position(&self.options),
        )
        .await
        {
            Ok(result) => result,
            Err(_) => Err(LocationError::Timeout {
                seconds: self.options.timeout.as_secs(),
            }),
        }
    }

    /// Start a continuous watch.
    ///
    /// Fixes are delivered to `on_update` at the polling cadence. The first
    /// error is delivered to `on_error` and ends the watch. The watch ends on
    /// its own after `WATCH_EXPIRY` (30 s) if neither cancelled nor failed.
    pub fn watch_position<F, E>(&self, mut on_update: F, on_error: E) -> WatchHandle
    where
        F: FnMut(LocationPoint) + Send + 'static,
        E: FnOnce(LocationError) + Send + 'static,
    {
        let source = Arc::clone(&self.source);
        let options = self.options.clone();
        let (cancel_tx, mut cancel_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            let expiry = tokio::time::sleep(WATCH_EXPIRY);
            tokio::pin!(expiry);
            let mut ticker = tokio::time::interval(WATCH_INTERVAL);
            let mut on_error = Some(on_error);
            // Set once the handle is dropped; a dropped handle detaches the
            // watch instead of cancelling it, so the branch must go quiet.
            let mut handle_gone = false;

            loop {
                tokio::select! {
                    _ = &mut expiry => {
                        log::debug!(
                            "[Location] watch auto-cancelled after {}s",
                            WATCH_EXPIRY.as_secs()
                        );
                        break;
                    }
                    cancelled = &mut cancel_rx, if !handle_gone => {
                        match cancelled {
                            Ok(()) => {
                                log::debug!("[Location] watch cancelled");
                                break;
                            }
                            Err(_) => handle_gone = true,
                        }
                    }
                    _ = ticker.tick() => {
                        let fix = tokio::time::timeout(
                            options.timeout,
                            source.current_position(&options),
                        )
                        .await
                        .unwrap_or(Err(LocationError::Timeout {
                            seconds: options.timeout.as_secs(),
                        }));
                        match fix {
                            Ok(point) => on_update(point),
                            Err(err) => {
                                log::warn!("[Location] watch error: {err}");
                                if let Some(report) = on_error.take() {
                                    report(err);
                                }
                                break;
                            }
                        }
                    }
                }
            }
        });

        WatchHandle {
            cancel: Some(cancel_tx),
            task,
        }
    }
}
