//! Fetch lifecycle observed by the presentation layer.

use std::sync::Arc;

use crate::types::VideoMetadata;

/// State of the authoritative metadata fetch.
///
/// Transitions: `Idle -> Loading -> Loaded | Failed`, a new fetch moves any
/// state back to `Loading`, and clearing the error moves `Failed -> Idle`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FetchState {
    /// Nothing requested yet, or the last error was dismissed.
    #[default]
    Idle,
    /// A fetch is in flight.
    Loading,
    /// The last fetch produced a record.
    Loaded(Arc<VideoMetadata>),
    /// The last fetch failed with a human readable reason.
    Failed(String),
}

impl FetchState {
    /// Whether a fetch is in flight.
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// Loaded record, if any.
    pub fn metadata(&self) -> Option<&VideoMetadata> {
        match self {
            FetchState::Loaded(metadata) => Some(metadata.as_ref()),
            _ => None,
        }
    }

    /// Failure reason, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            FetchState::Failed(reason) => Some(reason.as_str()),
            _ => None,
        }
    }

    /// Whether the state is terminal for the current request.
    pub fn is_settled(&self) -> bool {
        matches!(self, FetchState::Loaded(_) | FetchState::Failed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let metadata = Arc::new(VideoMetadata::builder("youtube", "abc").build());

        assert!(FetchState::Loading.is_loading());
        assert!(!FetchState::Idle.is_settled());
        assert_eq!(
            FetchState::Loaded(Arc::clone(&metadata)).metadata(),
            Some(metadata.as_ref())
        );
        assert_eq!(FetchState::Failed("Error: x".to_string()).error(), Some("Error: x"));
        assert!(FetchState::Failed(String::new()).is_settled());
    }
}
