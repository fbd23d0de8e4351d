//! Track groups as reported by the playback engine.

use super::catalog::RawVideoTrack;

/// Media component a track group belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrackKind {
    Video,
    Audio,
    Text,
    Other,
}

/// Engine-assigned identifier of a track group within one snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TrackGroupId(pub u32);

impl std::fmt::Display for TrackGroupId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "group#{}", self.0)
    }
}

/// Decoder format of a single track.
///
/// Engines report unknown values as negative numbers, so dimensions and
/// bitrate stay signed here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackFormat {
    pub width: i32,
    pub height: i32,
    pub bitrate: i32,
}

impl TrackFormat {
    pub fn new(width: i32, height: i32, bitrate: i32) -> Self {
        Self {
            width,
            height,
            bitrate,
        }
    }
}

/// Interchangeable decode options for one media component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackGroup {
    pub id: TrackGroupId,
    pub kind: TrackKind,
    pub formats: Vec<TrackFormat>,
}

impl TrackGroup {
    pub fn video(id: u32, formats: Vec<TrackFormat>) -> Self {
        Self {
            id: TrackGroupId(id),
            kind: TrackKind::Video,
            formats,
        }
    }

    pub fn len(&self) -> usize {
        self.formats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty()
    }
}

/// Complete set of track groups at one point in time.
///
/// Snapshots are values: the engine hands out a fresh one with every change
/// event and on every `current_tracks` call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackSnapshot {
    groups: Vec<TrackGroup>,
}

impl TrackSnapshot {
    pub fn new(groups: Vec<TrackGroup>) -> Self {
        Self { groups }
    }

    pub fn groups(&self) -> &[TrackGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// First video group in engine order.
    ///
    /// Catalog indices and overrides both refer to this group.
    pub fn primary_video_group(&self) -> Option<&TrackGroup> {
        self.groups
            .iter()
            .find(|group| group.kind == TrackKind::Video)
    }

    /// Video tracks of the primary video group with their in-group indices.
    pub fn raw_video_tracks(&self) -> Vec<RawVideoTrack> {
        self.primary_video_group()
            .map(|group| {
                group
                    .formats
                    .iter()
                    .enumerate()
                    .map(|(index, format)| RawVideoTrack::from_format(format, index))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn audio_group(id: u32) -> TrackGroup {
        TrackGroup {
            id: TrackGroupId(id),
            kind: TrackKind::Audio,
            formats: vec![TrackFormat::new(-1, -1, 128_000)],
        }
    }

    #[test]
    fn test_primary_video_group_skips_audio() {
        let snapshot = TrackSnapshot::new(vec![
            audio_group(0),
            TrackGroup::video(1, vec![TrackFormat::new(1280, 720, 2_400_000)]),
            TrackGroup::video(2, vec![TrackFormat::new(640, 360, 800_000)]),
        ]);

        let group = snapshot.primary_video_group().unwrap();
        assert_eq!(group.id, TrackGroupId(1));
    }

    #[test]
    fn test_raw_tracks_carry_in_group_index() {
        let snapshot = TrackSnapshot::new(vec![TrackGroup::video(
            0,
            vec![
                TrackFormat::new(1920, 1080, 4_800_000),
                TrackFormat::new(640, 360, 800_000),
            ],
        )]);

        let raw = snapshot.raw_video_tracks();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw[1].index_in_group, 1);
        assert_eq!(raw[1].height, 360);
    }

    #[test]
    fn test_audio_only_snapshot_has_no_video_tracks() {
        let snapshot = TrackSnapshot::new(vec![audio_group(0)]);
        assert!(snapshot.primary_video_group().is_none());
        assert!(snapshot.raw_video_tracks().is_empty());
    }
}
