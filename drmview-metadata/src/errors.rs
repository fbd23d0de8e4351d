//! Error types for metadata lookup.

use thiserror::Error;

/// Errors that can occur while looking up video metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    /// The identifier was rejected before any network activity.
    #[error("{reason}")]
    Validation {
        /// Message shown to the user
        reason: String,
    },

    /// The request could not complete or the endpoint answered with a
    /// non-success status.
    #[error("Transport error: {reason}")]
    Transport {
        /// Description of the failure
        reason: String,
        /// HTTP status, when the endpoint answered
        status: Option<u16>,
        /// Response body returned with a non-success status
        body: Option<String>,
    },

    /// The response was well formed but listed no entry for the identifier.
    #[error("Video not found: {video_id}")]
    NotFound {
        /// Identifier that was looked up
        video_id: String,
    },

    /// The response lacked structure every entry must carry.
    #[error("Malformed response for {video_id}: {reason}")]
    Malformed {
        /// Identifier that was looked up
        video_id: String,
        /// What was missing or unreadable
        reason: String,
    },

    /// The metadata source could not be built from configuration.
    #[error("Metadata configuration error: {reason}")]
    Configuration {
        /// The reason the configuration was rejected
        reason: String,
    },
}

impl MetadataError {
    /// Error for an empty or blank identifier.
    pub fn invalid_video_id() -> Self {
        MetadataError::Validation {
            reason: "Please enter a valid video ID".to_string(),
        }
    }

    /// Reason shown in a failed fetch state.
    pub fn user_message(&self) -> String {
        match self {
            MetadataError::Validation { reason } => reason.clone(),
            _ => format!("Error: {self}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_shown_verbatim() {
        assert_eq!(
            MetadataError::invalid_video_id().user_message(),
            "Please enter a valid video ID"
        );
    }

    #[test]
    fn test_other_errors_are_prefixed() {
        let error = MetadataError::Transport {
            reason: "HTTP 403 Forbidden - quotaExceeded".to_string(),
            status: Some(403),
            body: Some("quotaExceeded".to_string()),
        };
        assert_eq!(
            error.user_message(),
            "Error: Transport error: HTTP 403 Forbidden - quotaExceeded"
        );

        let error = MetadataError::NotFound {
            video_id: "abc".to_string(),
        };
        assert_eq!(error.user_message(), "Error: Video not found: abc");
    }
}
