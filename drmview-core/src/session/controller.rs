//! Session controller owning the playback engine.

use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use super::engine::{EngineError, EngineEvent, EngineEvents, EngineFactory, PlaybackEngine};
use super::state::SessionState;
use crate::drm::MediaSource;
use crate::tracks::{
    SelectionDirective, TrackCatalog, TrackCatalogBuilder, TrackSelectionError, TrackSelector,
};

/// Player session wiring engine callbacks into observable state.
///
/// The session holds no parsing or selection logic of its own: track events
/// go through [`TrackCatalogBuilder`] and user picks through
/// [`TrackSelector`].
pub struct PlaybackSession<F: EngineFactory> {
    factory: F,
    source: MediaSource,
    engine: Option<F::Engine>,
    selector: TrackSelector,
    state: Arc<SessionState>,
    event_pump: Option<JoinHandle<()>>,
}

impl<F: EngineFactory> PlaybackSession<F> {
    pub fn new(source: MediaSource, factory: F) -> Self {
        Self {
            factory,
            source,
            engine: None,
            selector: TrackSelector::new(),
            state: Arc::new(SessionState::new()),
            event_pump: None,
        }
    }

    pub fn is_initialized(&self) -> bool {
        self.engine.is_some()
    }

    pub fn source(&self) -> &MediaSource {
        &self.source
    }

    /// Creates and prepares the engine. Does nothing if already initialized.
    ///
    /// The loading flag is raised while the source is prepared and lowered
    /// again on both outcomes; afterwards the engine's buffering events own it.
    ///
    /// # Errors
    /// - `EngineError::CreationFailed` - The factory could not allocate an engine
    /// - `EngineError::PrepareFailed` - The engine could not load the source
    pub async fn initialize(&mut self) -> Result<(), EngineError> {
        if self.engine.is_some() {
            tracing::debug!("Playback session already initialized");
            return Ok(());
        }

        let generation = self.state.generation();
        self.state.publish_loading(generation, true);

        let prepared = match self.factory.create_engine() {
            Ok(mut engine) => match engine.prepare(&self.source).await {
                Ok(events) => Ok((engine, events)),
                Err(e) => {
                    engine.release().await;
                    Err(e)
                }
            },
            Err(e) => Err(e),
        };

        self.state.publish_loading(generation, false);

        match prepared {
            Ok((engine, events)) => {
                tracing::info!(
                    "Playback session prepared: manifest={}, drm={}",
                    self.source.manifest_url,
                    self.source
                        .drm
                        .as_ref()
                        .map_or("none".to_string(), |drm| drm.scheme.to_string())
                );
                self.engine = Some(engine);
                self.event_pump = Some(tokio::spawn(run_event_pump(
                    Arc::clone(&self.state),
                    generation,
                    events,
                )));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to initialize player: {}", e);
                self.state.publish_error(generation, e.to_string());
                Err(e)
            }
        }
    }

    /// Selects the resolution at `index` of the current catalog.
    ///
    /// The catalog snapshot and the engine's live tracks are both read at call
    /// time. On any failure the previously applied override stays in place.
    ///
    /// # Errors
    /// - `TrackSelectionError::OutOfRange` - `index` is outside the current catalog
    /// - `TrackSelectionError::NoVideoTrackGroup` - Engine missing or without video tracks
    /// - `TrackSelectionError::StaleResolution` - Option no longer offered by the engine
    /// - `TrackSelectionError::Engine` - Engine refused the override
    pub fn select_by_catalog_index(
        &mut self,
        index: usize,
    ) -> Result<SelectionDirective, TrackSelectionError> {
        let catalog = self.state.catalog();
        let live = self
            .engine
            .as_ref()
            .map(PlaybackEngine::current_tracks)
            .unwrap_or_default();

        let directive = TrackSelector::resolve(&catalog, index, &live).inspect_err(|e| {
            tracing::warn!("Rejected selection of catalog index {}: {}", index, e);
        })?;

        let engine = self
            .engine
            .as_mut()
            .ok_or(TrackSelectionError::NoVideoTrackGroup)?;
        engine.apply_selection(&directive)?;

        tracing::debug!(
            "Applied video override {} index={} ({})",
            directive.group_id(),
            directive.track_index(),
            directive.resolution()
        );
        self.selector.commit(directive.clone());
        Ok(directive)
    }

    /// Override applied by the last successful selection.
    pub fn current_selection(&self) -> Option<&SelectionDirective> {
        self.selector.current()
    }

    /// Tears the engine down. Safe to call when never initialized.
    ///
    /// Events still queued or arriving later from the old engine no longer
    /// reach the observable state.
    pub async fn release(&mut self) {
        self.state.advance_generation();

        if let Some(pump) = self.event_pump.take() {
            pump.abort();
        }

        if let Some(mut engine) = self.engine.take() {
            engine.release().await;
            tracing::info!("Playback session released");
        }

        self.selector.reset();
        self.state.reset();
    }

    /// Snapshot of the current catalog.
    pub fn catalog(&self) -> TrackCatalog {
        self.state.catalog()
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    pub fn last_error(&self) -> Option<String> {
        self.state.last_error()
    }

    pub fn clear_error(&self) {
        self.state.clear_error();
    }

    pub fn subscribe_catalog(&self) -> watch::Receiver<TrackCatalog> {
        self.state.subscribe_catalog()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.state.subscribe_loading()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<Option<String>> {
        self.state.subscribe_errors()
    }
}

impl<F: EngineFactory> Drop for PlaybackSession<F> {
    fn drop(&mut self) {
        self.state.advance_generation();
        if let Some(pump) = self.event_pump.take() {
            pump.abort();
        }
    }
}

/// Folds engine events into session state until the stream ends or the
/// session generation moves on.
async fn run_event_pump(state: Arc<SessionState>, generation: u64, mut events: EngineEvents) {
    tracing::debug!("Engine event pump started (generation {})", generation);

    while let Some(event) = events.recv().await {
        if !state.is_current(generation) {
            break;
        }

        match event {
            EngineEvent::TracksChanged(snapshot) => {
                let catalog = TrackCatalogBuilder::rebuild(&snapshot.raw_video_tracks());
                let options = catalog.len();
                if state.publish_catalog(generation, catalog) {
                    tracing::debug!("Track catalog rebuilt with {} resolutions", options);
                }
            }
            EngineEvent::BufferingChanged(buffering) => {
                state.publish_loading(generation, buffering);
            }
            EngineEvent::PlaybackError(message) => {
                tracing::error!("Playback error: {}", message);
                state.publish_error(generation, message);
            }
        }
    }

    tracing::debug!("Engine event pump stopped (generation {})", generation);
}
