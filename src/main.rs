use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use clipsync_lib::bootstrap::{self, CliOverrides};
use tracing::error;

/// Clipboard sync device: watches the local clipboard and syncs it through a relay room
#[derive(Parser, Debug)]
#[command(name = "clipsync", version, about)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Device identity, overrides `[device] id` and `DEVICE_ID`
    #[arg(long)]
    device_id: Option<String>,

    /// Pairing code to join on startup
    #[arg(long)]
    pin: Option<String>,

    /// Relay WebSocket URL, e.g. ws://relay.local:3000
    #[arg(long)]
    relay_url: Option<String>,

    /// Directory for the offline queue and history files
    #[arg(long)]
    data_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let overrides = CliOverrides {
        device_id: cli.device_id,
        pin: cli.pin,
        relay_url: cli.relay_url,
        data_dir: cli.data_dir,
    };

    let config = match bootstrap::load_config(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("clipsync: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = bootstrap::tracing::init_tracing_subscriber(config.log_file.as_deref()) {
        eprintln!("clipsync: failed to initialize tracing: {e:#}");
    }

    match bootstrap::run_device(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "clipsync failed to start");
            ExitCode::FAILURE
        }
    }
}
