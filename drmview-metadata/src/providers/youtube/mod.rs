//! YouTube Data API v3 metadata provider.

use async_trait::async_trait;
use drmview_core::config::{MetadataConfig, parse_url};
use url::Url;

use super::MetadataProvider;
use crate::errors::MetadataError;
use crate::types::VideoMetadata;

pub mod response;

pub use response::parse_video_list;

/// DRM scheme label attached to every record from this source.
pub const DRM_SCHEME: &str = "YouTube Standard";

const VIDEO_PARTS: &str = "snippet,contentDetails";

/// Longest response body excerpt carried in a transport failure reason.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// License URL associated with a video of this source.
pub fn license_url(video_id: &str) -> String {
    format!(
        "https://www.youtube.com/api/timedtext?v={}",
        urlencoding::encode(video_id)
    )
}

/// Preview image used when a response lists no thumbnail.
pub fn fallback_thumbnail_url(video_id: &str) -> String {
    format!(
        "https://i.ytimg.com/vi/{}/hqdefault.jpg",
        urlencoding::encode(video_id)
    )
}

/// Credential form that is safe to log.
pub fn mask_credential(credential: &str) -> String {
    let chars: Vec<char> = credential.chars().collect();
    if chars.len() <= 10 {
        return format!("***** (len {})", chars.len());
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{head}...{tail} (len {})", chars.len())
}

/// Metadata provider backed by the `videos.list` endpoint.
#[derive(Debug, Clone)]
pub struct YouTubeProvider {
    client: reqwest::Client,
    endpoint: Url,
    api_key: String,
    source_tag: String,
}

impl YouTubeProvider {
    /// Creates a provider from metadata configuration.
    ///
    /// # Errors
    /// - `MetadataError::Configuration` - No credential, unparseable endpoint,
    ///   or the HTTP client could not be built
    pub fn from_config(config: &MetadataConfig) -> Result<Self, MetadataError> {
        let api_key = config
            .credential()
            .ok_or_else(|| MetadataError::Configuration {
                reason: "no API key configured".to_string(),
            })?
            .to_string();
        let endpoint = parse_url("metadata.endpoint", &config.endpoint).map_err(|e| {
            MetadataError::Configuration {
                reason: e.to_string(),
            }
        })?;

        let client = reqwest::Client::builder()
            .connect_timeout(config.connect_timeout)
            .read_timeout(config.read_timeout)
            .build()
            .map_err(|e| MetadataError::Configuration {
                reason: format!("failed to build HTTP client: {e}"),
            })?;

        tracing::info!(
            "Metadata provider configured: endpoint={}, key={}",
            endpoint,
            mask_credential(&api_key)
        );

        Ok(Self {
            client,
            endpoint,
            api_key,
            source_tag: config.source_tag.clone(),
        })
    }
}

/// Reason for a non-success status, with a bounded excerpt of the body.
fn status_reason(status: reqwest::StatusCode, body: Option<&str>) -> String {
    match body {
        Some(body) => {
            let body = body.trim();
            let mut excerpt: String = body.chars().take(MAX_ERROR_BODY_CHARS).collect();
            if excerpt.len() < body.len() {
                excerpt.push_str("...");
            }
            format!("HTTP {status} - {excerpt}")
        }
        None => format!("HTTP {status}"),
    }
}

/// Maps a client error to `Transport` without the request URL, which
/// carries the credential.
fn transport_error(error: reqwest::Error) -> MetadataError {
    let reason = if error.is_timeout() {
        "request timed out".to_string()
    } else if error.is_connect() {
        format!("connection failed: {}", error.without_url())
    } else {
        error.without_url().to_string()
    };

    MetadataError::Transport {
        reason,
        status: None,
        body: None,
    }
}

#[async_trait]
impl MetadataProvider for YouTubeProvider {
    async fn fetch_metadata(&self, video_id: &str) -> Result<VideoMetadata, MetadataError> {
        tracing::debug!("Fetching metadata for {} from {}", video_id, self.endpoint);

        let response = self
            .client
            .get(self.endpoint.clone())
            .query(&[
                ("id", video_id),
                ("key", self.api_key.as_str()),
                ("part", VIDEO_PARTS),
            ])
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .ok()
                .filter(|body| !body.trim().is_empty());
            tracing::error!(
                "Metadata request for {} failed with {}: {}",
                video_id,
                status,
                body.as_deref().unwrap_or("<empty body>")
            );
            return Err(MetadataError::Transport {
                reason: status_reason(status, body.as_deref()),
                status: Some(status.as_u16()),
                body,
            });
        }

        let body = response.text().await.map_err(transport_error)?;
        parse_video_list(&body, video_id, &self.source_tag)
    }

    fn name(&self) -> &'static str {
        "youtube"
    }

    fn is_live(&self) -> bool {
        true
    }
}
