//! Metadata lookup service.

use std::sync::Arc;

use drmview_core::RuntimeMode;
use drmview_core::config::MetadataConfig;

use crate::errors::MetadataError;
use crate::providers::{MetadataProvider, MockMetadataProvider, YouTubeProvider};
use crate::types::VideoMetadata;

/// Turns a video identifier into a normalized [`VideoMetadata`].
///
/// The catalog is stateless and cheap to clone; every call goes to the
/// configured provider.
#[derive(Debug, Clone)]
pub struct MetadataCatalog {
    provider: Arc<dyn MetadataProvider>,
}

impl MetadataCatalog {
    /// Picks the provider for the given configuration and mode.
    ///
    /// Offline mode, or a live mode without a usable credential, serves the
    /// mock table.
    ///
    /// # Errors
    /// - `MetadataError::Configuration` - Live provider could not be built
    pub fn from_config(config: &MetadataConfig, mode: RuntimeMode) -> Result<Self, MetadataError> {
        if mode.is_offline() || config.credential().is_none() {
            tracing::info!("Using mock metadata provider (mode: {})", mode);
            return Ok(Self::with_provider(Arc::new(MockMetadataProvider::new(
                config.source_tag.clone(),
            ))));
        }

        let provider = YouTubeProvider::from_config(config)?;
        Ok(Self::with_provider(Arc::new(provider)))
    }

    /// Creates a catalog over an explicit provider.
    pub fn with_provider(provider: Arc<dyn MetadataProvider>) -> Self {
        Self { provider }
    }

    /// Name of the provider serving lookups.
    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Whether lookups go to a remote source.
    pub fn is_live(&self) -> bool {
        self.provider.is_live()
    }

    /// Looks up metadata for `video_id`.
    ///
    /// Surrounding whitespace is ignored. Results are not cached.
    ///
    /// # Errors
    /// - `MetadataError::Validation` - `video_id` is empty or blank
    /// - `MetadataError::Transport` - Request failed, timed out or returned a non-success status
    /// - `MetadataError::NotFound` - Source has no entry for `video_id`
    /// - `MetadataError::Malformed` - Source response lacks required structure
    pub async fn fetch(&self, video_id: &str) -> Result<VideoMetadata, MetadataError> {
        let video_id = video_id.trim();
        if video_id.is_empty() {
            return Err(MetadataError::invalid_video_id());
        }

        self.provider.fetch_metadata(video_id).await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;

    use super::*;

    #[derive(Debug)]
    struct FixedProvider;

    #[async_trait]
    impl MetadataProvider for FixedProvider {
        async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata, MetadataError> {
            Ok(VideoMetadata::builder("fixed", video_id).build())
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_offline_mode_uses_mock() {
        let config = MetadataConfig {
            api_key: Some("live-key".to_string()),
            ..Default::default()
        };

        let catalog = MetadataCatalog::from_config(&config, RuntimeMode::Offline).unwrap();

        assert!(!catalog.is_live());
        let metadata = catalog.fetch("jNQXAC9IVRw").await.unwrap();
        assert_eq!(metadata.duration_seconds(), 19);
    }

    #[test]
    fn test_missing_credential_uses_mock() {
        let catalog =
            MetadataCatalog::from_config(&MetadataConfig::default(), RuntimeMode::Live).unwrap();
        assert_eq!(catalog.provider_name(), "mock");
    }

    #[test]
    fn test_credential_selects_live_provider() {
        let config = MetadataConfig {
            api_key: Some("live-key".to_string()),
            ..Default::default()
        };

        let catalog = MetadataCatalog::from_config(&config, RuntimeMode::Live).unwrap();

        assert!(catalog.is_live());
        assert_eq!(catalog.provider_name(), "youtube");
    }

    #[tokio::test]
    async fn test_custom_provider_is_not_live_by_default() {
        let catalog = MetadataCatalog::with_provider(Arc::new(FixedProvider));

        assert!(!catalog.is_live());
        assert_eq!(catalog.provider_name(), "fixed");
        assert_eq!(catalog.fetch("x1").await.unwrap().content_id(), "fixed-x1");
    }

    #[tokio::test]
    async fn test_blank_identifier_is_rejected() {
        let catalog = MetadataCatalog::with_provider(Arc::new(MockMetadataProvider::default()));

        assert_eq!(
            catalog.fetch("  \t ").await.unwrap_err(),
            MetadataError::invalid_video_id()
        );
    }

    #[tokio::test]
    async fn test_identifier_is_trimmed() {
        let catalog = MetadataCatalog::with_provider(Arc::new(MockMetadataProvider::default()));

        let metadata = catalog.fetch("  dQw4w9WgXcQ ").await.unwrap();

        assert_eq!(metadata.id(), "dQw4w9WgXcQ");
    }
}
