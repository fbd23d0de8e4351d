//! Observable metadata fetch state.
//!
//! [`MetadataStore`] owns the fetch lifecycle the presentation layer renders:
//! the current [`FetchState`], a loading flag and the video id being edited.
//! Every fetch is tagged with a generation; completions from superseded
//! fetches, or arriving after the store is released, are discarded.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use drmview_core::RuntimeMode;
use drmview_core::config::MetadataConfig;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::catalog::MetadataCatalog;
use crate::errors::MetadataError;
use crate::state::FetchState;
use crate::types::VideoMetadata;

#[derive(Debug)]
struct StoreShared {
    state: watch::Sender<FetchState>,
    loading: watch::Sender<bool>,
    generation: AtomicU64,
}

impl StoreShared {
    fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    fn publish(&self, generation: u64, next: FetchState) -> bool {
        let loading = next.is_loading();
        let applied = self.state.send_if_modified(|current| {
            if !self.is_current(generation) {
                return false;
            }
            *current = next;
            true
        });

        if applied {
            self.loading.send_if_modified(|current| {
                if !self.is_current(generation) || *current == loading {
                    return false;
                }
                *current = loading;
                true
            });
        }
        applied
    }

    fn complete(&self, generation: u64, result: Result<VideoMetadata, MetadataError>) -> bool {
        let next = match result {
            Ok(metadata) => {
                tracing::info!("Loaded metadata for {}", metadata.id());
                FetchState::Loaded(Arc::new(metadata))
            }
            Err(e) => {
                tracing::error!("Metadata fetch failed: {}", e);
                FetchState::Failed(e.user_message())
            }
        };

        let applied = self.publish(generation, next);
        if !applied {
            tracing::warn!("Discarded stale metadata result (generation {})", generation);
        }
        applied
    }
}

/// Handle to one issued fetch.
#[derive(Debug)]
pub struct FetchTicket {
    generation: u64,
    task: JoinHandle<bool>,
}

impl FetchTicket {
    /// Generation the fetch was issued under.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Waits for the fetch to finish. Returns whether its result became the
    /// current state.
    pub async fn finished(self) -> bool {
        self.task.await.unwrap_or(false)
    }
}

/// Fetch state machine over a [`MetadataCatalog`].
#[derive(Debug)]
pub struct MetadataStore {
    catalog: MetadataCatalog,
    shared: Arc<StoreShared>,
    video_id: watch::Sender<String>,
}

impl MetadataStore {
    /// Creates an idle store whose id field starts at `default_video_id`.
    pub fn new(catalog: MetadataCatalog, default_video_id: impl Into<String>) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        let (loading, _) = watch::channel(false);
        let (video_id, _) = watch::channel(default_video_id.into());

        Self {
            catalog,
            shared: Arc::new(StoreShared {
                state,
                loading,
                generation: AtomicU64::new(0),
            }),
            video_id,
        }
    }

    /// Builds the catalog for `mode` and seeds the configured default id.
    ///
    /// # Errors
    /// - `MetadataError::Configuration` - Live provider could not be built
    pub fn from_config(config: &MetadataConfig, mode: RuntimeMode) -> Result<Self, MetadataError> {
        let catalog = MetadataCatalog::from_config(config, mode)?;
        Ok(Self::new(catalog, config.default_video_id.clone()))
    }

    /// Catalog serving this store.
    pub fn catalog(&self) -> &MetadataCatalog {
        &self.catalog
    }

    /// Starts a fetch for `video_id`, superseding any fetch in flight.
    ///
    /// A blank id fails immediately with `Failed` and never enters
    /// `Loading`; it still supersedes an earlier pending fetch. Must be
    /// called within a Tokio runtime.
    ///
    /// # Errors
    /// - `MetadataError::Validation` - `video_id` is empty or blank
    pub fn fetch_metadata(&self, video_id: &str) -> Result<FetchTicket, MetadataError> {
        let video_id = video_id.trim().to_string();
        let generation = self.shared.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if video_id.is_empty() {
            let error = MetadataError::invalid_video_id();
            tracing::debug!("Rejected metadata fetch: {}", error);
            self.shared
                .publish(generation, FetchState::Failed(error.user_message()));
            return Err(error);
        }

        tracing::debug!(
            "Fetching metadata for {} (generation {})",
            video_id,
            generation
        );
        self.shared.publish(generation, FetchState::Loading);

        let shared = Arc::clone(&self.shared);
        let catalog = self.catalog.clone();
        let task = tokio::spawn(async move {
            let result = catalog.fetch(&video_id).await;
            shared.complete(generation, result)
        });

        Ok(FetchTicket { generation, task })
    }

    /// Fetches the id currently held in the id field.
    ///
    /// # Errors
    /// - `MetadataError::Validation` - The id field is empty or blank
    pub fn fetch_current(&self) -> Result<FetchTicket, MetadataError> {
        let video_id = self.video_id();
        self.fetch_metadata(&video_id)
    }

    /// Moves `Failed` back to `Idle`. Other states are left untouched.
    pub fn clear_error(&self) {
        self.shared.state.send_if_modified(|current| {
            if matches!(current, FetchState::Failed(_)) {
                *current = FetchState::Idle;
                true
            } else {
                false
            }
        });
    }

    /// Replaces the id field with the trimmed `video_id`.
    pub fn set_video_id(&self, video_id: &str) {
        let trimmed = video_id.trim();
        self.video_id.send_if_modified(|current| {
            if current == trimmed {
                return false;
            }
            *current = trimmed.to_string();
            true
        });
    }

    /// Current contents of the id field.
    pub fn video_id(&self) -> String {
        self.video_id.borrow().clone()
    }

    /// Snapshot of the fetch state.
    pub fn state(&self) -> FetchState {
        self.shared.state.borrow().clone()
    }

    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        *self.shared.loading.borrow()
    }

    /// Subscribes to fetch state changes.
    pub fn subscribe_state(&self) -> watch::Receiver<FetchState> {
        self.shared.state.subscribe()
    }

    /// Subscribes to the loading flag.
    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.shared.loading.subscribe()
    }

    /// Invalidates all pending fetches and drops the store.
    pub fn release(self) {
        tracing::debug!("Metadata store released");
    }
}

impl Drop for MetadataStore {
    fn drop(&mut self) {
        self.shared.generation.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::MockMetadataProvider;

    fn mock_store() -> MetadataStore {
        let catalog = MetadataCatalog::with_provider(Arc::new(MockMetadataProvider::default()));
        MetadataStore::new(catalog, "dQw4w9WgXcQ")
    }

    #[tokio::test]
    async fn test_fetch_loads_metadata() {
        let store = mock_store();

        let ticket = store.fetch_metadata("jNQXAC9IVRw").unwrap();
        assert!(ticket.finished().await);

        let state = store.state();
        assert_eq!(state.metadata().unwrap().title(), "Me at the zoo");
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_blank_id_fails_without_loading() {
        let store = mock_store();
        let loading = store.subscribe_loading();

        let error = store.fetch_metadata("   ").unwrap_err();

        assert_eq!(error, MetadataError::invalid_video_id());
        assert_eq!(
            store.state(),
            FetchState::Failed("Please enter a valid video ID".to_string())
        );
        assert!(!loading.has_changed().unwrap());
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_clear_error_only_leaves_failed() {
        let store = mock_store();
        store.clear_error();
        assert_eq!(store.state(), FetchState::Idle);

        store.fetch_metadata("").unwrap_err();
        store.clear_error();
        assert_eq!(store.state(), FetchState::Idle);

        store
            .fetch_metadata("dQw4w9WgXcQ")
            .unwrap()
            .finished()
            .await;
        store.clear_error();
        assert!(matches!(store.state(), FetchState::Loaded(_)));
    }

    #[tokio::test]
    async fn test_video_id_field() {
        let store = mock_store();
        assert_eq!(store.video_id(), "dQw4w9WgXcQ");

        store.set_video_id("  9bZkp7q19f0 \n");
        assert_eq!(store.video_id(), "9bZkp7q19f0");

        let ticket = store.fetch_current().unwrap();
        ticket.finished().await;
        assert_eq!(store.state().metadata().unwrap().duration_seconds(), 253);

        store.set_video_id("   ");
        assert!(store.fetch_current().is_err());
    }

    #[tokio::test]
    async fn test_generations_increase() {
        let store = mock_store();

        let first = store.fetch_metadata("a").unwrap();
        let second = store.fetch_metadata("b").unwrap();

        assert!(second.generation() > first.generation());
    }
}
