//! Metadata sources.

use async_trait::async_trait;

use crate::errors::MetadataError;
use crate::types::VideoMetadata;

pub mod mock;
pub mod youtube;

pub use mock::MockMetadataProvider;
pub use youtube::YouTubeProvider;

/// Trait for video metadata sources.
///
/// Implementations look up one video per call and never cache; a repeated
/// call for the same identifier asks the source again.
#[async_trait]
pub trait MetadataProvider: Send + Sync + std::fmt::Debug {
    /// Looks up metadata for a non-blank video identifier.
    ///
    /// # Errors
    /// - `MetadataError::Transport` - Request failed, timed out or returned a non-success status
    /// - `MetadataError::NotFound` - Source has no entry for `video_id`
    /// - `MetadataError::Malformed` - Source response lacks required structure
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata, MetadataError>;

    /// Short provider name for logs.
    fn name(&self) -> &'static str;

    /// Whether lookups leave the process.
    fn is_live(&self) -> bool {
        false
    }
}
