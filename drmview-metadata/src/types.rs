//! Normalized video metadata record.

use drmview_core::format_duration;
use serde::Serialize;

/// Title used when the source omits one.
pub const PLACEHOLDER_TITLE: &str = "Unknown Title";

/// Description used when the source omits one.
pub const PLACEHOLDER_DESCRIPTION: &str = "No description available";

/// Descriptive metadata for one video.
///
/// Built once per successful lookup and never mutated. The content
/// identifier is always `"<source>-<id>"` and cannot be set independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoMetadata {
    id: String,
    content_id: String,
    title: String,
    description: String,
    duration_seconds: u32,
    license_url: String,
    drm_scheme: String,
    thumbnail_url: Option<String>,
}

impl VideoMetadata {
    /// Starts a record for `id` from the source tagged `source_tag`.
    pub fn builder(source_tag: &str, id: &str) -> VideoMetadataBuilder {
        VideoMetadataBuilder {
            source_tag: source_tag.to_string(),
            id: id.to_string(),
            title: PLACEHOLDER_TITLE.to_string(),
            description: PLACEHOLDER_DESCRIPTION.to_string(),
            duration_seconds: 0,
            license_url: String::new(),
            drm_scheme: String::new(),
            thumbnail_url: None,
        }
    }

    /// External identifier the record was looked up by.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Namespaced identifier used to correlate the DRM session.
    pub fn content_id(&self) -> &str {
        &self.content_id
    }

    /// Video title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Video description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Duration in whole seconds.
    pub fn duration_seconds(&self) -> u32 {
        self.duration_seconds
    }

    /// Duration rendered as `H:MM:SS`.
    pub fn formatted_duration(&self) -> String {
        format_duration(self.duration_seconds)
    }

    /// License endpoint associated with the source.
    pub fn license_url(&self) -> &str {
        &self.license_url
    }

    /// Free-form DRM scheme label.
    pub fn drm_scheme(&self) -> &str {
        &self.drm_scheme
    }

    /// Preview image, if one is known.
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.thumbnail_url.as_deref()
    }
}

/// Builder for [`VideoMetadata`].
#[derive(Debug, Clone)]
pub struct VideoMetadataBuilder {
    source_tag: String,
    id: String,
    title: String,
    description: String,
    duration_seconds: u32,
    license_url: String,
    drm_scheme: String,
    thumbnail_url: Option<String>,
}

impl VideoMetadataBuilder {
    /// Sets the title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the duration in seconds.
    pub fn duration_seconds(mut self, seconds: u32) -> Self {
        self.duration_seconds = seconds;
        self
    }

    /// Sets the license URL.
    pub fn license_url(mut self, url: impl Into<String>) -> Self {
        self.license_url = url.into();
        self
    }

    /// Sets the DRM scheme label.
    pub fn drm_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.drm_scheme = scheme.into();
        self
    }

    /// Sets the thumbnail URL.
    pub fn thumbnail_url(mut self, url: impl Into<String>) -> Self {
        self.thumbnail_url = Some(url.into());
        self
    }

    /// Finishes the record, deriving the content identifier.
    pub fn build(self) -> VideoMetadata {
        VideoMetadata {
            content_id: format!("{}-{}", self.source_tag, self.id),
            id: self.id,
            title: self.title,
            description: self.description,
            duration_seconds: self.duration_seconds,
            license_url: self.license_url,
            drm_scheme: self.drm_scheme,
            thumbnail_url: self.thumbnail_url,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fields_read_back_as_given() {
        let metadata = VideoMetadata::builder("youtube", "jNQXAC9IVRw")
            .title("Me at the zoo")
            .description("First upload")
            .duration_seconds(19)
            .license_url("https://www.youtube.com/api/timedtext?v=jNQXAC9IVRw")
            .drm_scheme("YouTube Standard")
            .thumbnail_url("https://i.ytimg.com/vi/jNQXAC9IVRw/hqdefault.jpg")
            .build();

        assert_eq!(metadata.id(), "jNQXAC9IVRw");
        assert_eq!(metadata.content_id(), "youtube-jNQXAC9IVRw");
        assert_eq!(metadata.title(), "Me at the zoo");
        assert_eq!(metadata.description(), "First upload");
        assert_eq!(metadata.duration_seconds(), 19);
        assert_eq!(
            metadata.license_url(),
            "https://www.youtube.com/api/timedtext?v=jNQXAC9IVRw"
        );
        assert_eq!(metadata.drm_scheme(), "YouTube Standard");
        assert_eq!(
            metadata.thumbnail_url(),
            Some("https://i.ytimg.com/vi/jNQXAC9IVRw/hqdefault.jpg")
        );
        assert_eq!(metadata.formatted_duration(), "0:00:19");
    }

    #[test]
    fn test_defaults_are_placeholders() {
        let metadata = VideoMetadata::builder("vimeo", "42").build();

        assert_eq!(metadata.content_id(), "vimeo-42");
        assert_eq!(metadata.title(), PLACEHOLDER_TITLE);
        assert_eq!(metadata.description(), PLACEHOLDER_DESCRIPTION);
        assert_eq!(metadata.duration_seconds(), 0);
        assert!(metadata.thumbnail_url().is_none());
    }

    #[test]
    fn test_serializes_content_id() {
        let metadata = VideoMetadata::builder("youtube", "abc").build();
        let json = serde_json::to_value(&metadata).unwrap();

        assert_eq!(json["content_id"], "youtube-abc");
        assert_eq!(json["thumbnail_url"], serde_json::Value::Null);
    }
}
