//! Fetch state machine ordering against a provider with controllable latency.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use drmview_metadata::{
    FetchState, MetadataCatalog, MetadataError, MetadataProvider, MetadataStore,
    MockMetadataProvider, VideoMetadata,
};
use tokio::sync::{Mutex, oneshot};
use tokio::time::timeout;

const EVENT_WAIT: Duration = Duration::from_secs(2);

/// Provider that holds a lookup until its gate is opened.
#[derive(Debug, Default)]
struct GatedProvider {
    gates: Mutex<HashMap<String, oneshot::Receiver<Result<(), MetadataError>>>>,
    mock: MockMetadataProvider,
}

impl GatedProvider {
    async fn gate(&self, video_id: &str) -> oneshot::Sender<Result<(), MetadataError>> {
        let (sender, receiver) = oneshot::channel();
        self.gates.lock().await.insert(video_id.to_string(), receiver);
        sender
    }
}

#[async_trait]
impl MetadataProvider for GatedProvider {
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata, MetadataError> {
        let gate = self.gates.lock().await.remove(video_id);
        if let Some(gate) = gate {
            gate.await.unwrap_or(Ok(()))?;
        }
        self.mock.fetch_metadata(video_id).await
    }

    fn name(&self) -> &'static str {
        "gated"
    }
}

fn store_over(provider: Arc<GatedProvider>) -> MetadataStore {
    MetadataStore::new(MetadataCatalog::with_provider(provider), "dQw4w9WgXcQ")
}

#[tokio::test]
async fn test_later_fetch_wins_over_slow_earlier_fetch() {
    let provider = Arc::new(GatedProvider::default());
    let slow_gate = provider.gate("9bZkp7q19f0").await;
    let store = store_over(Arc::clone(&provider));

    let slow = store.fetch_metadata("9bZkp7q19f0").unwrap();
    let fast = store.fetch_metadata("jNQXAC9IVRw").unwrap();
    assert!(fast.finished().await);

    slow_gate.send(Ok(())).unwrap();
    assert!(!slow.finished().await);

    let state = store.state();
    assert_eq!(state.metadata().unwrap().id(), "jNQXAC9IVRw");
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_stale_failure_does_not_overwrite() {
    let provider = Arc::new(GatedProvider::default());
    let slow_gate = provider.gate("broken").await;
    let store = store_over(Arc::clone(&provider));

    let slow = store.fetch_metadata("broken").unwrap();
    store
        .fetch_metadata("dQw4w9WgXcQ")
        .unwrap()
        .finished()
        .await;

    slow_gate
        .send(Err(MetadataError::Transport {
            reason: "connection reset".to_string(),
            status: None,
            body: None,
        }))
        .unwrap();
    assert!(!slow.finished().await);

    assert!(matches!(store.state(), FetchState::Loaded(_)));
}

#[tokio::test]
async fn test_loading_flag_tracks_fetch() {
    let provider = Arc::new(GatedProvider::default());
    let gate = provider.gate("jNQXAC9IVRw").await;
    let store = store_over(Arc::clone(&provider));
    let mut loading = store.subscribe_loading();

    let ticket = store.fetch_metadata("jNQXAC9IVRw").unwrap();
    assert_eq!(store.state(), FetchState::Loading);
    assert!(*loading.borrow_and_update());

    gate.send(Ok(())).unwrap();
    timeout(EVENT_WAIT, loading.wait_for(|loading| !*loading))
        .await
        .unwrap()
        .unwrap();
    assert!(ticket.finished().await);
}

#[tokio::test]
async fn test_failure_clears_loading_and_can_be_dismissed() {
    let provider = Arc::new(GatedProvider::default());
    let gate = provider.gate("dQw4w9WgXcQ").await;
    let store = store_over(Arc::clone(&provider));

    let ticket = store.fetch_current().unwrap();
    gate.send(Err(MetadataError::NotFound {
        video_id: "dQw4w9WgXcQ".to_string(),
    }))
    .unwrap();
    assert!(ticket.finished().await);

    assert_eq!(
        store.state(),
        FetchState::Failed("Error: Video not found: dQw4w9WgXcQ".to_string())
    );
    assert!(!store.is_loading());

    store.clear_error();
    assert_eq!(store.state(), FetchState::Idle);
}

#[tokio::test]
async fn test_blank_fetch_supersedes_pending_fetch() {
    let provider = Arc::new(GatedProvider::default());
    let gate = provider.gate("jNQXAC9IVRw").await;
    let store = store_over(Arc::clone(&provider));

    let pending = store.fetch_metadata("jNQXAC9IVRw").unwrap();
    store.fetch_metadata("  ").unwrap_err();
    gate.send(Ok(())).unwrap();

    assert!(!pending.finished().await);
    assert_eq!(
        store.state(),
        FetchState::Failed("Please enter a valid video ID".to_string())
    );
    assert!(!store.is_loading());
}

#[tokio::test]
async fn test_release_discards_pending_completion() {
    let provider = Arc::new(GatedProvider::default());
    let gate = provider.gate("jNQXAC9IVRw").await;
    let store = store_over(Arc::clone(&provider));
    let state = store.subscribe_state();

    let pending = store.fetch_metadata("jNQXAC9IVRw").unwrap();
    store.release();
    gate.send(Ok(())).unwrap();

    assert!(!pending.finished().await);
    assert_eq!(*state.borrow(), FetchState::Loading);
}
