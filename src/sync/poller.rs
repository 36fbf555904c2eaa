//! SyncPoller — background refresh scheduling.
//!
//! A tokio task performs an initial refresh, then refreshes on a fixed
//! interval. External events (page visible again, window focus, a manual
//! refresh button) all funnel through [`SyncPoller::request_refresh`];
//! triggers arriving while a refresh is in flight coalesce into one
//! follow-up refresh instead of being dropped. Refreshes run one at a time
//! inside the task, so snapshot installs follow completion order.
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use libreria::sync::{SyncClient, SyncPoller};
//!
//! let client = SyncClient::new("http://localhost:3000");
//! let poller = SyncPoller::spawn(client.clone());
//!
//! // ... consume client.snapshot() ...
//! poller.request_refresh(); // e.g. window regained focus
//!
//! let stats = poller.stop().await;
//! println!("{} refreshes, {} fallbacks", stats.refreshes, stats.fallbacks);
//! ```

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Notify};
use tokio::task::JoinHandle;
use tracing::debug;

use super::client::SyncClient;

/// Statistics from the poller.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PollerStats {
    /// Completed refresh cycles (each advanced the snapshot epoch once).
    pub refreshes: usize,
    /// Refreshes that landed live backend data.
    pub live: usize,
    /// Refreshes that fell back to the seed catalog.
    pub fallbacks: usize,
}

/// Handle to the background refresh task: trigger, then stop and collect
/// stats. Dropping the handle signals stop without waiting.
pub struct SyncPoller {
    client: SyncClient,
    trigger: Arc<Notify>,
    stop_tx: watch::Sender<bool>,
    handle: Option<JoinHandle<PollerStats>>,
}

impl SyncPoller {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);

    /// Spawn with the default 5 second interval.
    pub fn spawn(client: SyncClient) -> Self {
        Self::spawn_with_interval(client, Self::DEFAULT_INTERVAL)
    }

    /// Spawn the refresh task. The interval's first tick fires immediately,
    /// which is the startup fetch.
    pub fn spawn_with_interval(client: SyncClient, interval: Duration) -> Self {
        let trigger = Arc::new(Notify::new());
        let (stop_tx, mut stop_rx) = watch::channel(false);

        let task_client = client.clone();
        let task_trigger = trigger.clone();
        let handle = tokio::spawn(async move {
            let mut stats = PollerStats::default();
            let mut ticker = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {}
                    _ = task_trigger.notified() => {}
                    _ = stop_rx.changed() => break,
                }

                stats.refreshes += 1;
                if task_client.refresh().await {
                    stats.live += 1;
                } else {
                    stats.fallbacks += 1;
                }
            }

            debug!(?stats, "sync poller stopped");
            stats
        });

        SyncPoller {
            client,
            trigger,
            stop_tx,
            handle: Some(handle),
        }
    }

    /// The client whose snapshot this poller keeps fresh.
    pub fn client(&self) -> &SyncClient {
        &self.client
    }

    /// Request an immediate refresh. Idempotent while one is outstanding:
    /// any number of triggers during an in-flight refresh collapse into a
    /// single follow-up, and none is dropped.
    pub fn request_refresh(&self) {
        self.trigger.notify_one();
    }

    /// Signal shutdown, wait for the task, and return its stats. From this
    /// point on any in-flight fetch completion no longer touches the
    /// snapshot.
    pub async fn stop(mut self) -> PollerStats {
        self.client.mark_stopped();
        let _ = self.stop_tx.send(true);
        match self.handle.take() {
            Some(handle) => handle.await.unwrap_or_default(),
            None => PollerStats::default(),
        }
    }
}

impl Drop for SyncPoller {
    fn drop(&mut self) {
        self.client.mark_stopped();
        let _ = self.stop_tx.send(true);
        // Don't join on drop - let the task finish naturally
    }
}
