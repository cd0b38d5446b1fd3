use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use uc_core::RelayConfig;
use uc_infra::load_relay_config;
use uc_relay::logging::init_tracing;
use uc_relay::{RelayServer, RelaySettings};

/// Room-scoped clipboard relay
#[derive(Parser, Debug)]
#[command(name = "uc-relay", version, about)]
struct Args {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Listen address, overrides `[server] bind`
    #[arg(long)]
    bind: Option<String>,

    /// Listen port, keeps the host part of the bind address
    #[arg(short, long)]
    port: Option<u16>,
}

fn settings_from(args: &Args) -> anyhow::Result<RelaySettings> {
    let config = match &args.config {
        Some(path) => load_relay_config(path)?,
        None => RelayConfig::empty(),
    };
    let mut settings = RelaySettings::from_config(&config);
    if let Some(bind) = &args.bind {
        settings.bind = bind.clone();
    }
    if let Some(port) = args.port {
        settings = settings.with_port(port);
    }
    Ok(settings)
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let settings = match settings_from(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("uc-relay: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = init_tracing(settings.log_file.as_deref()) {
        eprintln!("uc-relay: failed to initialize tracing: {e:#}");
    }
    info!(bind = %settings.bind, history_limit = settings.history_limit, "starting relay");

    let server = match RelayServer::bind(settings).await {
        Ok(server) => server,
        Err(e) => {
            error!(error = %format!("{e:#}"), "relay failed to start");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    match server.run_until(shutdown).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %format!("{e:#}"), "relay stopped with error");
            ExitCode::FAILURE
        }
    }
}
