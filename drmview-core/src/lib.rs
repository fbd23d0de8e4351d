//! Drmview Core - Track catalog, selection and playback session control
//!
//! This crate holds the platform independent part of the DRM player: duration
//! parsing, the resolution catalog derived from decoder tracks, translation of
//! a user pick into an engine override, and the session controller that owns
//! the playback engine and publishes observable state.

pub mod config;
pub mod drm;
pub mod duration;
pub mod mode;
pub mod session;
pub mod tracing_setup;
pub mod tracks;

// Re-export main types for convenient access
pub use config::{ConfigError, DrmviewConfig, MetadataConfig, PlaybackConfig};
pub use drm::{DrmConfiguration, DrmScheme, MediaSource};
pub use duration::{format_duration, parse_duration_seconds};
pub use mode::RuntimeMode;
pub use session::{
    EngineError, EngineEvent, EngineFactory, PlaybackEngine, PlaybackSession, SimulatedEngine,
    SimulatedEngineHandle,
};
pub use tracks::{
    RawVideoTrack, SelectionDirective, TrackCatalog, TrackCatalogBuilder, TrackSelectionError,
    TrackSelector, TrackSnapshot, VideoResolution,
};

/// Core errors that can bubble up from any Drmview subsystem.
#[derive(Debug, thiserror::Error)]
pub enum DrmviewError {
    #[error("Track selection error: {0}")]
    Selection(#[from] TrackSelectionError),

    #[error("Playback engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl DrmviewError {
    /// Returns a user-friendly error message suitable for display.
    pub fn user_message(&self) -> String {
        match self {
            DrmviewError::Selection(e) => match e {
                TrackSelectionError::OutOfRange { .. } => {
                    "That resolution is no longer available".to_string()
                }
                TrackSelectionError::NoVideoTrackGroup => {
                    "Video tracks are not available yet".to_string()
                }
                _ => format!("Error selecting video track: {e}"),
            },
            DrmviewError::Engine(e) => format!("Failed to initialize player: {e}"),
            DrmviewError::Configuration(_) => "Configuration error occurred".to_string(),
            DrmviewError::Io(_) => "File system error occurred".to_string(),
        }
    }

    /// Checks if this error is due to user input validation.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            DrmviewError::Configuration(_)
                | DrmviewError::Selection(TrackSelectionError::OutOfRange { .. })
        )
    }
}

pub type Result<T> = std::result::Result<T, DrmviewError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_is_user_error() {
        let error = DrmviewError::from(TrackSelectionError::OutOfRange { index: 9, len: 3 });
        assert!(error.is_user_error());
        assert_eq!(error.user_message(), "That resolution is no longer available");
    }

    #[test]
    fn test_engine_error_message() {
        let error = DrmviewError::from(EngineError::PrepareFailed {
            reason: "license server unreachable".to_string(),
        });
        assert!(!error.is_user_error());
        assert!(error.user_message().contains("license server unreachable"));
    }
}
