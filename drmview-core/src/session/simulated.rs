//! In-process playback engine for development and tests.
//!
//! The simulated engine decodes nothing. It keeps a scripted track snapshot,
//! emits the same events a real engine would, and records every override it
//! is asked to apply. A [`SimulatedEngineHandle`] drives it from the outside
//! the way decoder threads would.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use tokio::sync::mpsc;

use super::engine::{EngineError, EngineEvent, EngineEvents, PlaybackEngine};
use crate::drm::MediaSource;
use crate::tracks::{
    SelectionDirective, TrackFormat, TrackGroup, TrackGroupId, TrackKind, TrackSnapshot,
};

#[derive(Debug, Default)]
struct SimulatedShared {
    tracks: TrackSnapshot,
    events: Option<mpsc::UnboundedSender<EngineEvent>>,
    applied: Vec<SelectionDirective>,
    prepared_sources: Vec<MediaSource>,
    fail_prepare: Option<String>,
    engines_created: usize,
    engines_released: usize,
}

impl SimulatedShared {
    fn emit(&self, event: EngineEvent) {
        if let Some(events) = &self.events {
            // Receiver gone means the session stopped listening.
            let _ = events.send(event);
        }
    }
}

/// Controls simulated engines and inspects what they were asked to do.
#[derive(Debug, Clone, Default)]
pub struct SimulatedEngineHandle {
    shared: Arc<Mutex<SimulatedShared>>,
}

impl SimulatedEngineHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an engine bound to this handle.
    pub fn engine(&self) -> SimulatedEngine {
        self.shared.lock().engines_created += 1;
        SimulatedEngine {
            shared: Arc::clone(&self.shared),
            prepared: false,
        }
    }

    /// Replaces the track set and notifies a prepared engine's listener.
    pub fn set_tracks(&self, snapshot: TrackSnapshot) {
        let mut shared = self.shared.lock();
        shared.tracks = snapshot.clone();
        shared.emit(EngineEvent::TracksChanged(snapshot));
    }

    /// Changes the live track set without emitting an event, as happens when
    /// the engine updates its groups just before reporting the change.
    pub fn set_tracks_silently(&self, snapshot: TrackSnapshot) {
        self.shared.lock().tracks = snapshot;
    }

    pub fn set_buffering(&self, buffering: bool) {
        self.shared
            .lock()
            .emit(EngineEvent::BufferingChanged(buffering));
    }

    pub fn report_error(&self, message: &str) {
        self.shared
            .lock()
            .emit(EngineEvent::PlaybackError(message.to_string()));
    }

    /// Makes the next `prepare` calls fail with the given reason.
    pub fn fail_prepare(&self, reason: &str) {
        self.shared.lock().fail_prepare = Some(reason.to_string());
    }

    pub fn applied_directives(&self) -> Vec<SelectionDirective> {
        self.shared.lock().applied.clone()
    }

    pub fn prepared_sources(&self) -> Vec<MediaSource> {
        self.shared.lock().prepared_sources.clone()
    }

    pub fn engines_created(&self) -> usize {
        self.shared.lock().engines_created
    }

    pub fn engines_released(&self) -> usize {
        self.shared.lock().engines_released
    }

    /// Whether an engine currently has a listener attached.
    pub fn is_streaming(&self) -> bool {
        self.shared
            .lock()
            .events
            .as_ref()
            .is_some_and(|events| !events.is_closed())
    }
}

/// Playback engine backed by a [`SimulatedEngineHandle`].
#[derive(Debug)]
pub struct SimulatedEngine {
    shared: Arc<Mutex<SimulatedShared>>,
    prepared: bool,
}

#[async_trait]
impl PlaybackEngine for SimulatedEngine {
    async fn prepare(&mut self, source: &MediaSource) -> Result<EngineEvents, EngineError> {
        let mut shared = self.shared.lock();
        if let Some(reason) = shared.fail_prepare.clone() {
            return Err(EngineError::PrepareFailed { reason });
        }

        let (sender, receiver) = mpsc::unbounded_channel();
        shared.prepared_sources.push(source.clone());
        shared.events = Some(sender);
        self.prepared = true;

        // Engines report the initial track set once the manifest is parsed.
        if !shared.tracks.is_empty() {
            let tracks = shared.tracks.clone();
            shared.emit(EngineEvent::TracksChanged(tracks));
        }

        Ok(receiver)
    }

    fn current_tracks(&self) -> TrackSnapshot {
        if !self.prepared {
            return TrackSnapshot::default();
        }
        self.shared.lock().tracks.clone()
    }

    fn apply_selection(&mut self, directive: &SelectionDirective) -> Result<(), EngineError> {
        if !self.prepared {
            return Err(EngineError::NotPrepared);
        }

        let mut shared = self.shared.lock();
        let group = shared
            .tracks
            .groups()
            .iter()
            .find(|group| group.id == directive.group_id())
            .ok_or_else(|| EngineError::OverrideRejected {
                reason: format!("unknown track group {}", directive.group_id()),
            })?;
        if directive.track_index() >= group.len() {
            return Err(EngineError::OverrideRejected {
                reason: format!(
                    "track index {} outside {} with {} tracks",
                    directive.track_index(),
                    group.id,
                    group.len()
                ),
            });
        }

        shared.applied.push(directive.clone());
        Ok(())
    }

    async fn release(&mut self) {
        if !self.prepared {
            return;
        }
        self.prepared = false;

        let mut shared = self.shared.lock();
        shared.events = None;
        shared.engines_released += 1;
    }
}

/// Track set of the bundled DRM demo stream: a five-rung video ladder in
/// manifest order plus one audio group.
pub fn demo_track_snapshot() -> TrackSnapshot {
    TrackSnapshot::new(vec![
        TrackGroup::video(
            0,
            vec![
                TrackFormat::new(1920, 1080, 4_800_000),
                TrackFormat::new(1280, 720, 2_400_000),
                TrackFormat::new(854, 480, 1_200_000),
                TrackFormat::new(640, 360, 800_000),
                TrackFormat::new(426, 240, 400_000),
            ],
        ),
        TrackGroup {
            id: TrackGroupId(1),
            kind: TrackKind::Audio,
            formats: vec![TrackFormat::new(-1, -1, 128_000)],
        },
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlaybackConfig;
    use crate::tracks::{TrackCatalogBuilder, TrackSelector};

    fn source() -> MediaSource {
        MediaSource::from_config(&PlaybackConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_prepare_emits_initial_tracks() {
        let handle = SimulatedEngineHandle::new();
        handle.set_tracks(demo_track_snapshot());
        let mut engine = handle.engine();

        let mut events = engine.prepare(&source()).await.unwrap();

        assert_eq!(
            events.recv().await,
            Some(EngineEvent::TracksChanged(demo_track_snapshot()))
        );
        assert_eq!(handle.prepared_sources(), vec![source()]);
        assert!(handle.is_streaming());
    }

    #[tokio::test]
    async fn test_unprepared_engine_has_no_tracks() {
        let handle = SimulatedEngineHandle::new();
        handle.set_tracks(demo_track_snapshot());
        let engine = handle.engine();

        assert!(engine.current_tracks().is_empty());
    }

    #[tokio::test]
    async fn test_apply_records_valid_directive() {
        let handle = SimulatedEngineHandle::new();
        handle.set_tracks(demo_track_snapshot());
        let mut engine = handle.engine();
        let _events = engine.prepare(&source()).await.unwrap();
        let live = engine.current_tracks();
        let catalog = TrackCatalogBuilder::rebuild(&live.raw_video_tracks());
        let directive = TrackSelector::resolve(&catalog, 0, &live).unwrap();

        engine.apply_selection(&directive).unwrap();

        assert_eq!(handle.applied_directives(), vec![directive]);
    }

    #[tokio::test]
    async fn test_release_closes_event_stream() {
        let handle = SimulatedEngineHandle::new();
        let mut engine = handle.engine();
        let mut events = engine.prepare(&source()).await.unwrap();

        engine.release().await;

        assert_eq!(events.recv().await, None);
        assert_eq!(handle.engines_released(), 1);
        assert!(!handle.is_streaming());
    }

    #[tokio::test]
    async fn test_prepare_failure() {
        let handle = SimulatedEngineHandle::new();
        handle.fail_prepare("license request denied");
        let mut engine = handle.engine();

        let error = engine.prepare(&source()).await.unwrap_err();

        assert_eq!(
            error,
            EngineError::PrepareFailed {
                reason: "license request denied".to_string()
            }
        );
    }
}
