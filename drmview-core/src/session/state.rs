//! Observable session state.
//!
//! Each observable keeps its latest value in a `watch` channel. Writes coming
//! from engine callbacks carry the session generation they were started under
//! and are dropped once the session has been released or re-initialized.

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::tracks::TrackCatalog;

/// Latest catalog, loading flag and playback error of one session.
#[derive(Debug)]
pub struct SessionState {
    catalog: watch::Sender<TrackCatalog>,
    loading: watch::Sender<bool>,
    error: watch::Sender<Option<String>>,
    generation: AtomicU64,
    catalog_generation: AtomicU64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionState {
    pub fn new() -> Self {
        let (catalog, _) = watch::channel(TrackCatalog::default());
        let (loading, _) = watch::channel(false);
        let (error, _) = watch::channel(None);

        Self {
            catalog,
            loading,
            error,
            generation: AtomicU64::new(0),
            catalog_generation: AtomicU64::new(0),
        }
    }

    /// Current session generation.
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Invalidates every writer started under an earlier generation.
    pub fn advance_generation(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_current(&self, generation: u64) -> bool {
        self.generation() == generation
    }

    /// Snapshot of the current catalog.
    pub fn catalog(&self) -> TrackCatalog {
        self.catalog.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn last_error(&self) -> Option<String> {
        self.error.borrow().clone()
    }

    pub fn subscribe_catalog(&self) -> watch::Receiver<TrackCatalog> {
        self.catalog.subscribe()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<Option<String>> {
        self.error.subscribe()
    }

    /// Publishes a freshly built catalog unless `generation` is stale.
    ///
    /// The generation check runs under the channel's write lock, so a release
    /// that clears the catalog cannot be overwritten by a late rebuild.
    pub fn publish_catalog(&self, generation: u64, catalog: TrackCatalog) -> bool {
        self.catalog.send_if_modified(|current| {
            if !self.is_current(generation) {
                return false;
            }
            let stamped = catalog.with_generation(
                self.catalog_generation.fetch_add(1, Ordering::SeqCst) + 1,
            );
            *current = stamped;
            true
        })
    }

    /// Publishes the loading flag unless `generation` is stale.
    pub fn publish_loading(&self, generation: u64, loading: bool) -> bool {
        self.loading.send_if_modified(|current| {
            if !self.is_current(generation) || *current == loading {
                return false;
            }
            *current = loading;
            true
        })
    }

    /// Publishes a playback error unless `generation` is stale.
    pub fn publish_error(&self, generation: u64, message: String) -> bool {
        self.error.send_if_modified(|current| {
            if !self.is_current(generation) {
                return false;
            }
            *current = Some(message);
            true
        })
    }

    /// Drops the catalog and resets the loading flag after a release.
    pub fn reset(&self) {
        self.catalog.send_replace(TrackCatalog::default());
        self.loading.send_replace(false);
    }

    pub fn clear_error(&self) {
        self.error.send_if_modified(|current| current.take().is_some());
    }
}
