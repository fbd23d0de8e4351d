//! Drmview Metadata - Video metadata lookup and fetch state

#![deny(missing_docs)]
#![deny(clippy::missing_errors_doc)]
#![deny(clippy::missing_panics_doc)]
//!
//! Looks up descriptive metadata for a video identifier, either from the
//! YouTube Data API or from a deterministic offline table, and normalizes it
//! into a [`VideoMetadata`] record. [`MetadataStore`] wraps lookups in the
//! observable fetch state machine shown to users.

pub mod catalog;
pub mod errors;
pub mod providers;
pub mod state;
pub mod store;
pub mod types;

// Re-export main types
pub use catalog::MetadataCatalog;
pub use errors::MetadataError;
pub use providers::{MetadataProvider, MockMetadataProvider, YouTubeProvider};
pub use state::FetchState;
pub use store::{FetchTicket, MetadataStore};
pub use types::{VideoMetadata, VideoMetadataBuilder};

/// Convenience type alias for Results with MetadataError.
pub type Result<T> = std::result::Result<T, MetadataError>;
