//! Radiodial Server - Standalone headless backend for the Radiodial station directory.
//!
//! Serves the station catalog plus the now-playing and artwork lookups the
//! browser player polls. Audio itself never passes through this process.

mod config;

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use radiodial_core::{
    bootstrap, create_extractor, create_http_client, start_server, StreamKind, StreamMetadata,
};
use tokio::signal;

use crate::config::ServerConfig;

/// Radiodial Server - Station directory and now-playing backend.
#[derive(Parser, Debug)]
#[command(name = "radiodial-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the configuration file (YAML).
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(short, long, default_value = "info", env = "RADIODIAL_LOG_LEVEL")]
    log_level: log::LevelFilter,

    /// Bind port (overrides config file).
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address (overrides config file).
    #[arg(short = 'b', long)]
    bind_address: Option<std::net::IpAddr>,

    /// Data directory for persistent state (stations.json).
    #[arg(short = 'd', long, env = "RADIODIAL_DATA_DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Probe a single stream URL for its current track and exit.
    Probe {
        /// Stream URL to probe.
        url: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_level(args.log_level)
        .format_timestamp_millis()
        .init();

    let mut config =
        ServerConfig::load(args.config.as_deref()).context("Failed to load configuration")?;

    // CLI overrides win over file and environment
    if let Some(port) = args.port {
        config.bind_port = port;
    }
    if let Some(addr) = args.bind_address {
        config.bind_address = addr;
    }
    if let Some(data_dir) = args.data_dir {
        config.data_dir = Some(data_dir);
    }

    let core_config = config.to_core_config();

    if let Some(Command::Probe { url }) = args.command {
        return probe(&core_config, &url).await;
    }

    log::info!("Radiodial Server v{}", env!("CARGO_PKG_VERSION"));
    log::info!(
        "Configuration: bind={}:{}, data_dir={}",
        config.bind_address,
        config.bind_port,
        config
            .data_dir
            .as_ref()
            .map(|d| d.display().to_string())
            .unwrap_or_else(|| "none".to_string())
    );

    let app_state = bootstrap(&core_config).context("Failed to bootstrap services")?;
    log::info!("Services bootstrapped successfully");

    let addr: SocketAddr = core_config.bind_addr();
    let mut server_handle = tokio::spawn(async move { start_server(app_state, addr).await });

    tokio::select! {
        _ = shutdown_signal() => {
            log::info!("Shutdown signal received, stopping server...");
            server_handle.abort();
        }
        result = &mut server_handle => {
            // Server exited on its own, most likely a bind failure
            result
                .context("Server task panicked")?
                .context("HTTP server failed")?;
            anyhow::bail!("HTTP server stopped unexpectedly");
        }
    }

    log::info!("Shutdown complete");
    Ok(())
}

/// Runs one probe against `url` and prints the result as JSON.
async fn probe(config: &radiodial_core::Config, url: &str) -> Result<()> {
    let metadata = if StreamKind::from_url(url).supports_icy() {
        let client = create_http_client().context("Failed to create HTTP client")?;
        create_extractor(client, config).fetch(url).await
    } else {
        log::info!("[Probe] HLS stream - ICY metadata is not available");
        StreamMetadata::default()
    };

    let json = serde_json::to_string_pretty(&metadata).context("Failed to encode metadata")?;
    println!("{}", json);
    Ok(())
}

/// Waits for a shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            log::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                log::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
