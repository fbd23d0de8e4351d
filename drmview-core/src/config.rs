//! Centralized configuration for Drmview.
//!
//! All tunable parameters and deployment settings are defined here to avoid
//! hard-coded values scattered throughout the codebase.

use std::time::Duration;

use url::Url;

use crate::drm::DrmScheme;
use crate::mode::RuntimeMode;

/// Errors raised while validating configuration values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid URL for {field}: '{value}' ({reason})")]
    InvalidUrl {
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Timeout for {field} must be greater than zero")]
    InvalidTimeout { field: &'static str },
}

/// Central configuration for all Drmview components.
#[derive(Debug, Clone, Default)]
pub struct DrmviewConfig {
    pub mode: RuntimeMode,
    pub playback: PlaybackConfig,
    pub metadata: MetadataConfig,
}

/// Protected stream handed to the playback engine.
///
/// Both URLs are passed through opaquely; nothing in the core inspects the
/// manifest or the license exchange.
#[derive(Debug, Clone)]
pub struct PlaybackConfig {
    /// DASH manifest of the protected stream
    pub manifest_url: String,
    /// License server queried by the engine's DRM session
    pub license_url: String,
    /// Key system requested from the engine
    pub drm_scheme: DrmScheme,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            manifest_url: "https://bitmovin-a.akamaihd.net/content/art-of-motion_drm/mpds/11331.mpd"
                .to_string(),
            license_url: "https://cwip-shaka-proxy.appspot.com/no_auth".to_string(),
            drm_scheme: DrmScheme::Widevine,
        }
    }
}

/// Remote metadata lookup configuration.
#[derive(Debug, Clone)]
pub struct MetadataConfig {
    /// Videos endpoint of the metadata API
    pub endpoint: String,
    /// Access credential sent as a query parameter (None = no live source)
    pub api_key: Option<String>,
    /// TCP connect timeout for metadata requests
    pub connect_timeout: Duration,
    /// Read timeout for metadata responses
    pub read_timeout: Duration,
    /// Namespace prefix of derived content identifiers
    pub source_tag: String,
    /// Video looked up when the user has not entered one
    pub default_video_id: String,
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://www.googleapis.com/youtube/v3/videos".to_string(),
            api_key: None,
            connect_timeout: Duration::from_secs(15),
            read_timeout: Duration::from_secs(15),
            source_tag: "youtube".to_string(),
            default_video_id: "dQw4w9WgXcQ".to_string(),
        }
    }
}

impl MetadataConfig {
    /// Returns the credential if one is configured and non-blank.
    pub fn credential(&self) -> Option<&str> {
        self.api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }
}

impl DrmviewConfig {
    /// Creates configuration with environment variable overrides.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(mode) = std::env::var("DRMVIEW_MODE") {
            if let Ok(mode) = mode.parse::<RuntimeMode>() {
                config.mode = mode;
            }
        }

        // Metadata configuration overrides
        if let Ok(endpoint) = std::env::var("DRMVIEW_METADATA_ENDPOINT") {
            config.metadata.endpoint = endpoint;
        }

        if let Ok(api_key) = std::env::var("DRMVIEW_API_KEY") {
            config.metadata.api_key = Some(api_key);
        }

        if let Ok(timeout) = std::env::var("DRMVIEW_CONNECT_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.metadata.connect_timeout = Duration::from_secs(seconds);
            }
        }

        if let Ok(timeout) = std::env::var("DRMVIEW_READ_TIMEOUT") {
            if let Ok(seconds) = timeout.parse::<u64>() {
                config.metadata.read_timeout = Duration::from_secs(seconds);
            }
        }

        // Playback configuration overrides
        if let Ok(manifest_url) = std::env::var("DRMVIEW_MANIFEST_URL") {
            config.playback.manifest_url = manifest_url;
        }

        if let Ok(license_url) = std::env::var("DRMVIEW_LICENSE_URL") {
            config.playback.license_url = license_url;
        }

        config
    }

    /// Creates a configuration for tests: offline metadata and short timeouts.
    pub fn for_testing() -> Self {
        Self {
            mode: RuntimeMode::Offline,
            metadata: MetadataConfig {
                connect_timeout: Duration::from_secs(2),
                read_timeout: Duration::from_secs(2),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    /// Checks URLs and timeouts before any component is built from them.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidUrl` - A manifest, license or endpoint URL does not parse
    /// - `ConfigError::InvalidTimeout` - A metadata timeout is zero
    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_url("playback.manifest_url", &self.playback.manifest_url)?;
        parse_url("playback.license_url", &self.playback.license_url)?;
        parse_url("metadata.endpoint", &self.metadata.endpoint)?;

        if self.metadata.connect_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                field: "metadata.connect_timeout",
            });
        }
        if self.metadata.read_timeout.is_zero() {
            return Err(ConfigError::InvalidTimeout {
                field: "metadata.read_timeout",
            });
        }

        Ok(())
    }
}

/// Parses a configured URL, naming the offending field on failure.
///
/// # Errors
///
/// - `ConfigError::InvalidUrl` - `value` is not an absolute URL
pub fn parse_url(field: &'static str, value: &str) -> Result<Url, ConfigError> {
    Url::parse(value).map_err(|e| ConfigError::InvalidUrl {
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}
