//! Adaptive video track catalog and user-driven selection.
//!
//! The engine reports its track groups as snapshots. [`TrackCatalogBuilder`]
//! turns the video part of a snapshot into an ordered list of distinct
//! resolutions, and [`TrackSelector`] maps a position in that list back to a
//! concrete override against whatever the engine reports at selection time.

pub mod catalog;
pub mod resolution;
pub mod selector;
pub mod snapshot;

pub use catalog::{RawVideoTrack, TrackCatalog, TrackCatalogBuilder};
pub use resolution::VideoResolution;
pub use selector::{SelectionDirective, SelectionStep, TrackSelectionError, TrackSelector};
pub use snapshot::{TrackFormat, TrackGroup, TrackGroupId, TrackKind, TrackSnapshot};
