//! Catalog synchronization — polling client, payload normalization, and
//! epoch-tagged snapshots.
//!
//! The [`SyncClient`] keeps a client-held [`CatalogSnapshot`] fresh without
//! blocking its consumer: every completed refresh — live data or the
//! embedded seed fallback — installs a new snapshot and advances its epoch,
//! so derived views know to recompute even when the book list did not
//! change structurally. The [`SyncPoller`] drives refreshes on an interval
//! plus on-demand triggers, and tears down cleanly.

mod client;
mod normalize;
mod poller;
mod seed;
mod snapshot;

pub use client::SyncClient;
pub use normalize::normalize_books;
pub use poller::{PollerStats, SyncPoller};
pub use seed::seed_catalog;
pub use snapshot::CatalogSnapshot;
