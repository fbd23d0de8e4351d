//! Translation of a catalog pick into an engine track override.

use super::catalog::TrackCatalog;
use super::resolution::VideoResolution;
use super::snapshot::{TrackGroupId, TrackKind, TrackSnapshot};
use crate::session::EngineError;

/// Errors raised while turning a catalog position into an override.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackSelectionError {
    #[error("Catalog index {index} is out of range for {len} resolutions")]
    OutOfRange { index: usize, len: usize },

    #[error("No video track group is available")]
    NoVideoTrackGroup,

    #[error("Resolution {resolution} is no longer offered by the engine")]
    StaleResolution { resolution: VideoResolution },

    #[error("Engine rejected track override: {0}")]
    Engine(#[from] EngineError),
}

/// Single instruction within a selection directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionStep {
    /// Drop every override previously set for this track kind
    ClearOverrides(TrackKind),
    /// Turn the renderer for this track kind back on
    EnableRenderer(TrackKind),
    /// Pin one track of a group
    SetOverride {
        group_id: TrackGroupId,
        track_index: usize,
    },
}

/// Override request for the video renderer.
///
/// Applying a directive replaces any earlier video override instead of
/// stacking on top of it, so applying the same directive twice yields the same
/// engine configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionDirective {
    group_id: TrackGroupId,
    track_index: usize,
    resolution: VideoResolution,
}

impl SelectionDirective {
    pub fn group_id(&self) -> TrackGroupId {
        self.group_id
    }

    /// Index within the live group, which may differ from the catalog entry's
    /// recorded index when the group was reordered.
    pub fn track_index(&self) -> usize {
        self.track_index
    }

    pub fn resolution(&self) -> &VideoResolution {
        &self.resolution
    }

    /// Ordered steps the engine performs for this directive.
    pub fn steps(&self) -> [SelectionStep; 3] {
        [
            SelectionStep::ClearOverrides(TrackKind::Video),
            SelectionStep::EnableRenderer(TrackKind::Video),
            SelectionStep::SetOverride {
                group_id: self.group_id,
                track_index: self.track_index,
            },
        ]
    }
}

/// Holds the last applied video override.
#[derive(Debug, Default)]
pub struct TrackSelector {
    applied: Option<SelectionDirective>,
}

impl TrackSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolves a catalog position against the live snapshot and records the
    /// resulting directive as applied.
    ///
    /// # Errors
    /// - `TrackSelectionError::OutOfRange` - `index` is not a position in `catalog`
    /// - `TrackSelectionError::NoVideoTrackGroup` - `live` has no video group
    /// - `TrackSelectionError::StaleResolution` - the picked option vanished from the live group
    pub fn select_by_catalog_index(
        &mut self,
        catalog: &TrackCatalog,
        index: usize,
        live: &TrackSnapshot,
    ) -> Result<SelectionDirective, TrackSelectionError> {
        let directive = Self::resolve(catalog, index, live)?;
        self.commit(directive.clone());
        Ok(directive)
    }

    /// Maps `catalog[index]` onto the video group of `live` without touching
    /// the selector state.
    ///
    /// The catalog may lag one event behind the engine. The recorded track
    /// index is used when the live group still carries the same option there;
    /// otherwise the option is looked up by `(width, height, bitrate)`.
    ///
    /// # Errors
    /// - `TrackSelectionError::OutOfRange` - `index` is not a position in `catalog`
    /// - `TrackSelectionError::NoVideoTrackGroup` - `live` has no video group
    /// - `TrackSelectionError::StaleResolution` - the picked option vanished from the live group
    pub fn resolve(
        catalog: &TrackCatalog,
        index: usize,
        live: &TrackSnapshot,
    ) -> Result<SelectionDirective, TrackSelectionError> {
        let requested = catalog
            .get(index)
            .copied()
            .ok_or(TrackSelectionError::OutOfRange {
                index,
                len: catalog.len(),
            })?;

        let group = live
            .primary_video_group()
            .ok_or(TrackSelectionError::NoVideoTrackGroup)?;

        let track_index = match group.formats.get(requested.track_index()) {
            Some(format) if requested.matches(format) => requested.track_index(),
            _ => group
                .formats
                .iter()
                .position(|format| requested.matches(format))
                .ok_or(TrackSelectionError::StaleResolution {
                    resolution: requested,
                })?,
        };

        Ok(SelectionDirective {
            group_id: group.id,
            track_index,
            resolution: requested,
        })
    }

    /// Records a directive the engine accepted.
    pub fn commit(&mut self, directive: SelectionDirective) {
        self.applied = Some(directive);
    }

    pub fn current(&self) -> Option<&SelectionDirective> {
        self.applied.as_ref()
    }

    /// Forgets the applied override, used when the engine is torn down.
    pub fn reset(&mut self) {
        self.applied = None;
    }
}
