//! Video list response of the YouTube Data API.

use drmview_core::parse_duration_seconds;
use serde::Deserialize;

use super::{DRM_SCHEME, fallback_thumbnail_url, license_url};
use crate::errors::MetadataError;
use crate::types::VideoMetadata;

/// Top-level `videos.list` document.
#[derive(Debug, Deserialize)]
pub struct VideoListResponse {
    /// Matching videos; absent when nothing matched
    pub items: Option<Vec<VideoItem>>,
}

/// One entry of a video list.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoItem {
    /// Title, description and thumbnails
    pub snippet: Option<Snippet>,
    /// Duration and other playback details
    pub content_details: Option<ContentDetails>,
}

/// Descriptive part of a video entry.
#[derive(Debug, Deserialize)]
pub struct Snippet {
    /// Video title
    pub title: Option<String>,
    /// Video description
    pub description: Option<String>,
    /// Thumbnails keyed by size
    pub thumbnails: Option<Thumbnails>,
}

/// Thumbnail set; only the sizes used for previews are read.
#[derive(Debug, Deserialize)]
pub struct Thumbnails {
    /// 480x360 thumbnail
    pub high: Option<Thumbnail>,
    /// 120x90 thumbnail
    pub default: Option<Thumbnail>,
}

/// Single thumbnail image.
#[derive(Debug, Deserialize)]
pub struct Thumbnail {
    /// Image URL
    pub url: Option<String>,
}

/// Playback details of a video entry.
#[derive(Debug, Deserialize)]
pub struct ContentDetails {
    /// ISO-8601 style duration token, e.g. `PT3M32S`
    pub duration: Option<String>,
}

impl Thumbnails {
    fn preferred_url(&self) -> Option<&str> {
        [&self.high, &self.default]
            .into_iter()
            .flatten()
            .find_map(|thumbnail| thumbnail.url.as_deref())
    }
}

/// Parses a `videos.list` body into a normalized record for `video_id`.
///
/// Only the first item is used. Missing title or description fall back to
/// placeholders, a missing duration counts as zero and a missing thumbnail
/// is replaced by the templated preview URL.
///
/// # Errors
/// - `MetadataError::NotFound` - `items` is absent or empty
/// - `MetadataError::Malformed` - Body is not JSON, or the first item lacks
///   `snippet` or `contentDetails`
pub fn parse_video_list(
    body: &str,
    video_id: &str,
    source_tag: &str,
) -> Result<VideoMetadata, MetadataError> {
    let malformed = |reason: String| MetadataError::Malformed {
        video_id: video_id.to_string(),
        reason,
    };

    let response: VideoListResponse =
        serde_json::from_str(body).map_err(|e| malformed(format!("invalid JSON: {e}")))?;

    let item = response
        .items
        .and_then(|items| items.into_iter().next())
        .ok_or_else(|| MetadataError::NotFound {
            video_id: video_id.to_string(),
        })?;

    let snippet = item
        .snippet
        .ok_or_else(|| malformed("missing snippet".to_string()))?;
    let details = item
        .content_details
        .ok_or_else(|| malformed("missing contentDetails".to_string()))?;

    let duration_seconds = details
        .duration
        .as_deref()
        .map_or(0, parse_duration_seconds);
    let thumbnail_url = snippet
        .thumbnails
        .as_ref()
        .and_then(Thumbnails::preferred_url)
        .map_or_else(|| fallback_thumbnail_url(video_id), str::to_string);

    let mut builder = VideoMetadata::builder(source_tag, video_id)
        .duration_seconds(duration_seconds)
        .license_url(license_url(video_id))
        .drm_scheme(DRM_SCHEME)
        .thumbnail_url(thumbnail_url);
    if let Some(title) = snippet.title {
        builder = builder.title(title);
    }
    if let Some(description) = snippet.description {
        builder = builder.description(description);
    }

    Ok(builder.build())
}
