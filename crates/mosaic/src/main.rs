//! Mosaic CLI binary.
//!
//! - Replay recorded gateway traffic through the cache engine
//! - Print the effective configuration

use clap::{Parser, Subcommand};
use mosaic::{
    MosaicConfig, Notification, ObservabilityConfig, OfflineRest, ReplayError, ReplayErrorKind,
    init_observability_with_config, replay,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tokio::sync::mpsc;
use tracing::info;

/// Mosaic - gateway cache reconciliation engine
#[derive(Parser, Debug)]
#[command(name = "mosaic")]
#[command(about = "Gateway cache reconciliation engine", long_about = None)]
#[command(version)]
struct Cli {
    /// Command to execute
    #[command(subcommand)]
    command: Commands,

    /// Configuration file taking precedence over every other source
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    json_logs: bool,

    /// Log level filter, overridden by RUST_LOG
    #[arg(long, global = true, default_value = "info")]
    log_level: String,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Fold a JSON Lines file of `{"t": NAME, "d": PAYLOAD}` frames into an
    /// empty cache, logging every notification
    Replay {
        /// Path to the recorded frames
        file: PathBuf,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    init_observability_with_config(
        ObservabilityConfig::default()
            .with_log_level(cli.log_level.clone())
            .with_json_logs(cli.json_logs),
    )?;

    let config = MosaicConfig::load_with(cli.config.as_deref())?;

    match cli.command {
        Commands::Replay { file } => run_replay(&config, file).await?,
        Commands::Config => println!("{}", serde_json::to_string_pretty(&config)?),
    }

    Ok(())
}

async fn run_replay(
    config: &MosaicConfig,
    file: PathBuf,
) -> Result<(), Box<dyn std::error::Error>> {
    let input = tokio::fs::File::open(&file).await.map_err(|e| {
        ReplayError::new(ReplayErrorKind::Open {
            path: file.display().to_string(),
            reason: e.to_string(),
        })
    })?;

    let (tx, mut rx) = mpsc::unbounded_channel::<Notification>();
    let printer = tokio::spawn(async move {
        let mut count = 0usize;
        while let Some(notification) = rx.recv().await {
            count += 1;
            info!(name = notification.name(), "{:?}", notification);
        }
        count
    });

    let client = config.build_client(Arc::new(tx), Arc::new(OfflineRest));
    let summary = replay(&client, BufReader::new(input)).await?;
    client.typing().stop_all();
    drop(client);

    let notifications = printer.await?;
    info!(
        frames = summary.frames(),
        routed = summary.routed(),
        handled = summary.handled(),
        malformed = summary.malformed(),
        notifications,
        "Replay finished"
    );
    Ok(())
}
