//! Boundary between the session controller and a playback engine.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::drm::MediaSource;
use crate::tracks::{SelectionDirective, TrackSnapshot};

/// Errors reported by a playback engine.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("Failed to create playback engine: {reason}")]
    CreationFailed { reason: String },

    #[error("Failed to prepare media source: {reason}")]
    PrepareFailed { reason: String },

    #[error("Playback engine is not prepared")]
    NotPrepared,

    #[error("Track override rejected: {reason}")]
    OverrideRejected { reason: String },
}

/// Asynchronous notifications delivered by the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The active track set changed; carries the complete new snapshot.
    TracksChanged(TrackSnapshot),
    /// Buffering started (`true`) or ended (`false`).
    BufferingChanged(bool),
    /// Playback failed; the engine stays allocated until released.
    PlaybackError(String),
}

/// Receiving end of an engine's event stream.
pub type EngineEvents = mpsc::UnboundedReceiver<EngineEvent>;

/// Playback engine operations the session relies on.
///
/// Decoding, rendering and license exchange all happen behind this trait.
/// Events are delivered from engine threads through the channel returned by
/// [`PlaybackEngine::prepare`].
#[async_trait]
pub trait PlaybackEngine: Send + 'static {
    /// Loads a source and starts delivering events for it.
    ///
    /// # Errors
    /// - `EngineError::PrepareFailed` - Manifest or DRM session could not be set up
    async fn prepare(&mut self, source: &MediaSource) -> Result<EngineEvents, EngineError>;

    /// Track groups as the engine sees them right now.
    fn current_tracks(&self) -> TrackSnapshot;

    /// Applies a video override: clear earlier video overrides, enable the
    /// video renderer, pin the requested track.
    ///
    /// # Errors
    /// - `EngineError::NotPrepared` - No source is loaded
    /// - `EngineError::OverrideRejected` - Group or track index unknown to the engine
    fn apply_selection(&mut self, directive: &SelectionDirective) -> Result<(), EngineError>;

    /// Stops playback and frees decoder resources.
    async fn release(&mut self);
}

/// Creates engines on demand for [`super::PlaybackSession::initialize`].
pub trait EngineFactory: Send {
    type Engine: PlaybackEngine;

    /// # Errors
    /// - `EngineError::CreationFailed` - The platform could not allocate an engine
    fn create_engine(&self) -> Result<Self::Engine, EngineError>;
}

impl<E, F> EngineFactory for F
where
    E: PlaybackEngine,
    F: Fn() -> Result<E, EngineError> + Send,
{
    type Engine = E;

    fn create_engine(&self) -> Result<E, EngineError> {
        self()
    }
}
