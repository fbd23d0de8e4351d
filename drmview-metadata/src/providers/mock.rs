//! Offline metadata provider with a fixed sample table.

use async_trait::async_trait;

use super::MetadataProvider;
use super::youtube::{DRM_SCHEME, fallback_thumbnail_url, license_url};
use crate::errors::MetadataError;
use crate::types::VideoMetadata;

struct MockEntry {
    video_id: &'static str,
    title: &'static str,
    description: &'static str,
    duration_seconds: u32,
}

const MOCK_ENTRIES: &[MockEntry] = &[
    MockEntry {
        video_id: "dQw4w9WgXcQ",
        title: "Rick Astley - Never Gonna Give You Up",
        description: "The official video for Never Gonna Give You Up by Rick Astley. \
                      The song was a global number 1 in 1987 and was the first of \
                      Rick's 8 consecutive UK chart toppers.",
        duration_seconds: 212,
    },
    MockEntry {
        video_id: "9bZkp7q19f0",
        title: "PSY - GANGNAM STYLE",
        description: "Official music video for PSY - GANGNAM STYLE. This global hit \
                      became a cultural phenomenon and is one of the most-watched \
                      videos on YouTube.",
        duration_seconds: 253,
    },
    MockEntry {
        video_id: "jNQXAC9IVRw",
        title: "Me at the zoo",
        description: "The first video uploaded to YouTube, featuring YouTube \
                      co-founder Jawed Karim at the San Diego Zoo.",
        duration_seconds: 19,
    },
];

const TEMPLATE_TITLE: &str = "Sample Video Title";
const TEMPLATE_DURATION_SECONDS: u32 = 120;

/// Deterministic provider used offline and when no credential is configured.
///
/// Known sample identifiers map to fixed records; anything else gets a
/// templated record. Lookups never fail.
#[derive(Debug, Clone)]
pub struct MockMetadataProvider {
    source_tag: String,
}

impl MockMetadataProvider {
    /// Creates a mock provider deriving content ids with `source_tag`.
    pub fn new(source_tag: impl Into<String>) -> Self {
        Self {
            source_tag: source_tag.into(),
        }
    }

    /// Builds the record for `video_id` without going through the trait.
    pub fn lookup(&self, video_id: &str) -> VideoMetadata {
        let builder = VideoMetadata::builder(&self.source_tag, video_id)
            .license_url(license_url(video_id))
            .drm_scheme(DRM_SCHEME)
            .thumbnail_url(fallback_thumbnail_url(video_id));

        match MOCK_ENTRIES.iter().find(|entry| entry.video_id == video_id) {
            Some(entry) => builder
                .title(entry.title)
                .description(entry.description)
                .duration_seconds(entry.duration_seconds),
            None => builder
                .title(TEMPLATE_TITLE)
                .description(format!(
                    "This is a mock description for video {video_id}. \
                     In a real app, this would be fetched from the YouTube API."
                ))
                .duration_seconds(TEMPLATE_DURATION_SECONDS),
        }
        .build()
    }
}

impl Default for MockMetadataProvider {
    fn default() -> Self {
        Self::new("youtube")
    }
}

#[async_trait]
impl MetadataProvider for MockMetadataProvider {
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata, MetadataError> {
        tracing::debug!("Serving mock metadata for {}", video_id);
        Ok(self.lookup(video_id))
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[tokio::test]
    async fn test_known_sample_is_fixed() {
        let provider = MockMetadataProvider::default();

        let metadata = provider.fetch_metadata("dQw4w9WgXcQ").await.unwrap();

        assert_eq!(metadata.id(), "dQw4w9WgXcQ");
        assert_eq!(metadata.content_id(), "youtube-dQw4w9WgXcQ");
        assert_eq!(metadata.title(), "Rick Astley - Never Gonna Give You Up");
        assert_eq!(metadata.duration_seconds(), 212);
        assert_eq!(
            metadata.thumbnail_url(),
            Some("https://i.ytimg.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
        );
        assert_eq!(metadata.drm_scheme(), "YouTube Standard");
    }

    #[test]
    fn test_all_samples() {
        let provider = MockMetadataProvider::default();

        assert_eq!(provider.lookup("9bZkp7q19f0").title(), "PSY - GANGNAM STYLE");
        assert_eq!(provider.lookup("9bZkp7q19f0").duration_seconds(), 253);
        assert_eq!(provider.lookup("jNQXAC9IVRw").title(), "Me at the zoo");
        assert_eq!(provider.lookup("jNQXAC9IVRw").duration_seconds(), 19);
    }

    #[test]
    fn test_unknown_id_gets_template() {
        let provider = MockMetadataProvider::new("test");

        let metadata = provider.lookup("unknown123");

        assert_eq!(metadata.content_id(), "test-unknown123");
        assert_eq!(metadata.title(), "Sample Video Title");
        assert_eq!(metadata.duration_seconds(), 120);
        assert!(metadata.description().contains("video unknown123."));
        assert_eq!(
            metadata.license_url(),
            "https://www.youtube.com/api/timedtext?v=unknown123"
        );
    }

    #[test]
    fn test_lookup_is_deterministic() {
        let provider = MockMetadataProvider::default();
        assert_eq!(provider.lookup("abc"), provider.lookup("abc"));
    }

    proptest! {
        #[test]
        fn any_identifier_gets_a_record(video_id in "[A-Za-z0-9_-]{1,16}") {
            let metadata = MockMetadataProvider::default().lookup(&video_id);

            prop_assert_eq!(metadata.id(), video_id.as_str());
            prop_assert_eq!(metadata.content_id(), format!("youtube-{video_id}"));
            prop_assert!(metadata.duration_seconds() > 0);
        }
    }
}
