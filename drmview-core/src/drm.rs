//! Protected media source description handed to the playback engine.

use url::Url;

use crate::config::{ConfigError, PlaybackConfig, parse_url};

/// Key system requested from the playback engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrmScheme {
    Widevine,
    PlayReady,
    ClearKey,
}

impl DrmScheme {
    /// DASH-IF system identifier of the key system.
    pub fn system_id(self) -> &'static str {
        match self {
            DrmScheme::Widevine => "edef8ba9-79d6-4ace-a3c8-27dcd51d21ed",
            DrmScheme::PlayReady => "9a04f079-9840-4286-ab92-e65be0885f95",
            DrmScheme::ClearKey => "e2719d58-a985-b3c9-781a-b030af78d30e",
        }
    }
}

impl std::fmt::Display for DrmScheme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DrmScheme::Widevine => write!(f, "Widevine"),
            DrmScheme::PlayReady => write!(f, "PlayReady"),
            DrmScheme::ClearKey => write!(f, "ClearKey"),
        }
    }
}

/// License acquisition settings for a protected stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrmConfiguration {
    pub scheme: DrmScheme,
    pub license_url: Url,
}

/// Manifest plus optional DRM configuration, prepared by the engine as one item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaSource {
    pub manifest_url: Url,
    pub drm: Option<DrmConfiguration>,
}

impl MediaSource {
    /// Builds the protected source described by the playback configuration.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidUrl` - Manifest or license URL does not parse
    pub fn from_config(config: &PlaybackConfig) -> Result<Self, ConfigError> {
        let manifest_url = parse_url("playback.manifest_url", &config.manifest_url)?;
        let license_url = parse_url("playback.license_url", &config.license_url)?;

        Ok(Self {
            manifest_url,
            drm: Some(DrmConfiguration {
                scheme: config.drm_scheme,
                license_url,
            }),
        })
    }

    /// Returns true when the engine must open a DRM session for this source.
    pub fn is_protected(&self) -> bool {
        self.drm.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_default_config() {
        let source = MediaSource::from_config(&PlaybackConfig::default()).unwrap();

        assert!(source.is_protected());
        assert_eq!(source.manifest_url.scheme(), "https");
        let drm = source.drm.unwrap();
        assert_eq!(drm.scheme, DrmScheme::Widevine);
        assert_eq!(drm.license_url.host_str(), Some("cwip-shaka-proxy.appspot.com"));
    }

    #[test]
    fn test_invalid_manifest_is_rejected() {
        let config = PlaybackConfig {
            manifest_url: "::".to_string(),
            ..Default::default()
        };
        assert!(MediaSource::from_config(&config).is_err());
    }

    #[test]
    fn test_widevine_system_id() {
        assert_eq!(
            DrmScheme::Widevine.system_id(),
            "edef8ba9-79d6-4ace-a3c8-27dcd51d21ed"
        );
        assert_eq!(DrmScheme::PlayReady.to_string(), "PlayReady");
    }
}
