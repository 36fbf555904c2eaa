//! SyncClient — keeps a client-held catalog snapshot fresh.
//!
//! Fetches defeat caches with a timestamp query parameter and an explicit
//! `Cache-Control: no-store`; any failure (connect error, non-2xx, malformed
//! body) is absorbed here by installing the embedded seed catalog. Either
//! way a completed refresh installs a whole new snapshot and advances the
//! epoch exactly once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, RwLock};
use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;
use tracing::{debug, warn};

use crate::book::Book;

use super::normalize::normalize_books;
use super::seed::seed_catalog;
use super::snapshot::CatalogSnapshot;

struct Shared {
    snapshot: RwLock<CatalogSnapshot>,
    stopped: AtomicBool,
}

/// Periodic catalog fetcher publishing epoch-tagged snapshots.
///
/// Clone-friendly: clones share the same snapshot state, so a UI can hold
/// one handle while the poller drives another.
#[derive(Clone)]
pub struct SyncClient {
    http: reqwest::Client,
    base_url: String,
    shared: Arc<Shared>,
}

impl SyncClient {
    /// Create a client fetching from `base_url` (e.g. `"http://localhost:3000"`).
    pub fn new(base_url: impl Into<String>) -> Self {
        SyncClient {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            shared: Arc::new(Shared {
                snapshot: RwLock::new(CatalogSnapshot::default()),
                stopped: AtomicBool::new(false),
            }),
        }
    }

    /// Use a preconfigured reqwest client (timeouts, proxies).
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = http;
        self
    }

    /// The snapshot as of the last completed refresh.
    pub fn snapshot(&self) -> CatalogSnapshot {
        read_lock(&self.shared.snapshot).clone()
    }

    /// Epoch of the current snapshot.
    pub fn epoch(&self) -> u64 {
        read_lock(&self.shared.snapshot).epoch
    }

    /// Refresh the held snapshot. Never fails: a fetch error is logged and
    /// the seed catalog is installed instead. Returns `true` when live data
    /// landed, `false` on fallback.
    pub async fn refresh(&self) -> bool {
        let (books, live) = match self.fetch_books().await {
            Ok(books) => (books, true),
            Err(err) => {
                warn!(error = %err, "catalog fetch failed, falling back to seed catalog");
                (seed_catalog(), false)
            }
        };
        self.install(books);
        live
    }

    async fn fetch_books(&self) -> Result<Vec<Book>, reqwest::Error> {
        let url = format!("{}/api/books", self.base_url);
        let payload: Value = self
            .http
            .get(&url)
            .query(&[("_t", cache_buster().to_string())])
            .header(reqwest::header::CACHE_CONTROL, "no-store")
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(normalize_books(&payload))
    }

    /// Install a new snapshot, bumping the epoch. Completions that arrive
    /// after shutdown are dropped — the state they would update no longer
    /// has a consumer.
    fn install(&self, books: Vec<Book>) {
        if self.shared.stopped.load(Ordering::SeqCst) {
            debug!("refresh completed after shutdown, dropping result");
            return;
        }
        let mut snapshot = write_lock(&self.shared.snapshot);
        let epoch = snapshot.epoch + 1;
        debug!(epoch, books = books.len(), "installing catalog snapshot");
        *snapshot = CatalogSnapshot::new(books, epoch);
    }

    /// Mark the client stopped: late refresh completions become no-ops.
    pub(crate) fn mark_stopped(&self) {
        self.shared.stopped.store(true, Ordering::SeqCst);
    }
}

/// Unix-millis timestamp used as the `_t` cache-defeating parameter.
fn cache_buster() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or(0)
}

// A poisoned snapshot lock still holds the last fully-installed snapshot.
fn read_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockReadGuard<'_, T> {
    match lock.read() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

fn write_lock<T>(lock: &RwLock<T>) -> std::sync::RwLockWriteGuard<'_, T> {
    match lock.write() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
