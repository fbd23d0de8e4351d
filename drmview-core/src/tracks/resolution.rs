//! User-facing resolution option.

use super::snapshot::TrackFormat;

/// One selectable video resolution.
///
/// `track_index` points into the video group of the snapshot that produced
/// this value and is meaningless against any later snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VideoResolution {
    width: u32,
    height: u32,
    bitrate_bps: u32,
    track_index: usize,
}

impl VideoResolution {
    /// Creates a resolution, rejecting zero dimensions.
    pub fn new(width: u32, height: u32, bitrate_bps: u32, track_index: usize) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }

        Some(Self {
            width,
            height,
            bitrate_bps,
            track_index,
        })
    }

    /// Converts an engine format, dropping placeholder tracks with
    /// non-positive dimensions. An unknown bitrate becomes zero.
    pub fn from_format(format: &TrackFormat, track_index: usize) -> Option<Self> {
        let width = u32::try_from(format.width).ok()?;
        let height = u32::try_from(format.height).ok()?;
        let bitrate_bps = u32::try_from(format.bitrate).unwrap_or(0);

        Self::new(width, height, bitrate_bps, track_index)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bitrate_bps(&self) -> u32 {
        self.bitrate_bps
    }

    pub fn track_index(&self) -> usize {
        self.track_index
    }

    /// Identity of the option within a catalog: `(width, height, bitrate)`.
    pub fn key(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.bitrate_bps)
    }

    /// Whether an engine format describes the same option.
    pub fn matches(&self, format: &TrackFormat) -> bool {
        Self::from_format(format, self.track_index).is_some_and(|other| other.key() == self.key())
    }
}

impl std::fmt::Display for VideoResolution {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}x{} ({} kbps)",
            self.width,
            self.height,
            self.bitrate_bps / 1000
        )
    }
}
