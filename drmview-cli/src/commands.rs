//! CLI command implementations

use std::time::Duration;

use anyhow::{Context, bail};
use clap::Subcommand;
use drmview_core::session::simulated::demo_track_snapshot;
use drmview_core::{
    DrmviewConfig, DrmviewError, EngineError, MediaSource, PlaybackSession, RuntimeMode,
    SimulatedEngineHandle,
};
use drmview_metadata::{FetchState, MetadataStore, VideoMetadata};

const CATALOG_WAIT: Duration = Duration::from_secs(5);

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Look up metadata for a video
    Metadata {
        /// Video identifier (defaults to the configured sample video)
        video_id: Option<String>,
        /// Serve the offline sample table instead of the live API
        #[arg(long)]
        offline: bool,
    },
    /// Play the configured DRM stream on the simulated engine and list its resolutions
    Tracks {
        /// Catalog position to pin after listing
        #[arg(short, long)]
        select: Option<usize>,
    },
}

/// Handle the CLI command
///
/// # Errors
/// Returns the error of the command that failed
pub async fn handle_command(command: Commands, config: DrmviewConfig) -> anyhow::Result<()> {
    match command {
        Commands::Metadata { video_id, offline } => {
            show_metadata(&config, video_id.as_deref(), offline).await
        }
        Commands::Tracks { select } => show_tracks(&config, select).await,
    }
}

/// Fetch and print metadata for one video
///
/// # Errors
/// - `MetadataError::Validation` - Identifier is blank
/// - Lookup failures are reported with the same reason users would see
pub async fn show_metadata(
    config: &DrmviewConfig,
    video_id: Option<&str>,
    offline: bool,
) -> anyhow::Result<()> {
    let mode = if offline {
        RuntimeMode::Offline
    } else {
        config.mode
    };
    let store = MetadataStore::from_config(&config.metadata, mode)?;
    if let Some(video_id) = video_id {
        store.set_video_id(video_id);
    }
    tracing::info!(
        "Metadata lookup: mode={}, provider={}, live={}",
        mode,
        store.catalog().provider_name(),
        store.catalog().is_live()
    );

    println!(
        "Looking up {} via {} provider",
        store.video_id(),
        store.catalog().provider_name()
    );
    store.fetch_current()?.finished().await;

    match store.state() {
        FetchState::Loaded(metadata) => {
            print_metadata(&metadata);
            Ok(())
        }
        FetchState::Failed(reason) => {
            tracing::warn!("Metadata lookup for {} failed", store.video_id());
            bail!(reason)
        }
        other => bail!("metadata lookup ended in unexpected state {other:?}"),
    }
}

fn print_metadata(metadata: &VideoMetadata) {
    println!("{}", metadata.title());
    println!("{:-<60}", "");
    println!("  Video ID:    {}", metadata.id());
    println!("  Content ID:  {}", metadata.content_id());
    println!(
        "  Duration:    {} ({} s)",
        metadata.formatted_duration(),
        metadata.duration_seconds()
    );
    println!("  DRM scheme:  {}", metadata.drm_scheme());
    println!("  License URL: {}", metadata.license_url());
    if let Some(thumbnail) = metadata.thumbnail_url() {
        println!("  Thumbnail:   {thumbnail}");
    }
    println!();
    println!("{}", metadata.description());
}

/// List the resolutions of the configured stream and optionally pin one
///
/// # Errors
/// - `ConfigError` - Manifest or license URL is invalid
/// - `EngineError` - Simulated engine failed to prepare
/// - `TrackSelectionError` - Requested catalog position could not be applied
pub async fn show_tracks(config: &DrmviewConfig, select: Option<usize>) -> anyhow::Result<()> {
    let source = MediaSource::from_config(&config.playback)?;
    let handle = SimulatedEngineHandle::new();
    handle.set_tracks(demo_track_snapshot());

    let engine_handle = handle.clone();
    let mut session = PlaybackSession::new(source, move || {
        Ok::<_, EngineError>(engine_handle.engine())
    });
    let mut catalog_updates = session.subscribe_catalog();

    session.initialize().await?;
    let catalog = tokio::time::timeout(
        CATALOG_WAIT,
        catalog_updates.wait_for(|catalog| !catalog.is_empty()),
    )
    .await
    .context("engine reported no video tracks")??
    .clone();
    tracing::info!(
        "Resolution catalog ready: {} options (generation {})",
        catalog.len(),
        catalog.generation()
    );

    println!("Stream: {}", session.source().manifest_url);
    if let Some(drm) = &session.source().drm {
        println!(
            "DRM:    {} ({}) via {}",
            drm.scheme,
            drm.scheme.system_id(),
            drm.license_url
        );
    }
    println!("{:-<60}", "");
    for (index, resolution) in catalog.iter().enumerate() {
        println!("  [{index}] {resolution}");
    }

    if let Some(index) = select {
        match session.select_by_catalog_index(index) {
            Ok(directive) => {
                println!();
                println!("Selected {}", directive.resolution());
                for step in directive.steps() {
                    println!("  {step:?}");
                }
            }
            Err(e) => {
                tracing::warn!("Selecting catalog position {} failed: {}", index, e);
                let error = DrmviewError::from(e);
                eprintln!("{}", error.user_message());
                session.release().await;
                return Err(error.into());
            }
        }
    }

    session.release().await;
    Ok(())
}
