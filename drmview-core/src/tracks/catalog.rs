//! Resolution catalog rebuilt from raw decoder tracks.

use std::collections::HashSet;
use std::sync::Arc;

use super::resolution::VideoResolution;
use super::snapshot::TrackFormat;

/// Video track as reported by the engine, before any filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawVideoTrack {
    pub width: i32,
    pub height: i32,
    pub bitrate: i32,
    pub index_in_group: usize,
}

impl RawVideoTrack {
    pub fn new(width: i32, height: i32, bitrate: i32, index_in_group: usize) -> Self {
        Self {
            width,
            height,
            bitrate,
            index_in_group,
        }
    }

    pub fn from_format(format: &TrackFormat, index_in_group: usize) -> Self {
        Self::new(format.width, format.height, format.bitrate, index_in_group)
    }
}

/// Ordered list of selectable resolutions, ascending by height.
///
/// A catalog is replaced wholesale on every track change and is cheap to
/// clone; readers always work on their own snapshot. The generation counter
/// identifies the rebuild cycle that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackCatalog {
    generation: u64,
    entries: Arc<[VideoResolution]>,
}

impl Default for TrackCatalog {
    fn default() -> Self {
        Self {
            generation: 0,
            entries: Arc::from(Vec::new()),
        }
    }
}

impl TrackCatalog {
    /// Returns the same entries tagged with another rebuild generation.
    pub fn with_generation(self, generation: u64) -> Self {
        Self { generation, ..self }
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn get(&self, index: usize) -> Option<&VideoResolution> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &VideoResolution> {
        self.entries.iter()
    }
}

/// Builds resolution catalogs from raw decoder tracks.
pub struct TrackCatalogBuilder;

impl TrackCatalogBuilder {
    /// Derives the catalog for one track-change event.
    ///
    /// Tracks with non-positive width or height are dropped, repeated
    /// `(width, height, bitrate)` options keep their first occurrence, and the
    /// rest is sorted by height with ties left in discovery order. The result
    /// depends only on `raw`.
    pub fn rebuild(raw: &[RawVideoTrack]) -> TrackCatalog {
        let mut seen = HashSet::with_capacity(raw.len());
        let mut entries: Vec<VideoResolution> = raw
            .iter()
            .filter_map(|track| {
                let format = TrackFormat::new(track.width, track.height, track.bitrate);
                VideoResolution::from_format(&format, track.index_in_group)
            })
            .filter(|resolution| seen.insert(resolution.key()))
            .collect();

        // Stable: equal heights keep discovery order.
        entries.sort_by_key(VideoResolution::height);

        TrackCatalog {
            generation: 0,
            entries: entries.into(),
        }
    }
}
