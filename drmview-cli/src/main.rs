//! Drmview CLI - Command-line interface
//!
//! Looks up video metadata and drives a playback session against the
//! simulated engine.

mod commands;

use std::path::PathBuf;

use clap::Parser;
use drmview_core::DrmviewConfig;
use drmview_core::tracing_setup::{CliLogLevel, init_tracing};

#[derive(Parser)]
#[command(name = "drmview")]
#[command(about = "DRM video player core: metadata lookup and resolution selection")]
struct Cli {
    /// Console log level (the log file always records everything)
    #[arg(long, value_enum, default_value_t = CliLogLevel::Info, global = true)]
    log_level: CliLogLevel,

    /// Directory for the per-run log file
    #[arg(long, global = true)]
    logs_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: commands::Commands,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.log_level.as_tracing_level(), cli.logs_dir.as_deref())?;

    let config = DrmviewConfig::from_env();
    config.validate()?;

    commands::handle_command(cli.command, config).await
}
