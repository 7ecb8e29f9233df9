//! ptrk - Proximity tracking relay client
//!
//! Connects to a tracking server, classifies every object it reports and
//! prints a hex-encoded snapshot of all known objects to stdout every
//! 1.5 seconds until the server closes the connection.
//!
//! # Usage
//!
//! ```bash
//! # Connect to a server
//! ptrk 10.0.0.5 5463
//!
//! # Reassemble lines split across reads
//! ptrk 10.0.0.5 5463 --reassemble-lines
//!
//! # Enable debug logging (diagnostics go to stderr)
//! RUST_LOG=ptrk_client=debug ptrk 10.0.0.5 5463
//! ```
//!
//! # Signal Handling
//!
//! - SIGTERM/SIGINT: stop ingesting, stop the relay loop, exit

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use ptrk_client::{ClientConfig, LineFraming, TrackerClient};

/// ptrk - proximity tracking relay client
#[derive(Parser, Debug)]
#[command(name = "ptrk", version, about)]
struct Args {
    /// Server host name or IP address
    host: String,

    /// Server TCP port
    port: u16,

    /// Carry partial lines over to the next read instead of parsing
    /// every read on its own
    #[arg(long)]
    reassemble_lines: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    run_client(args)
}

/// Runs the client (async entry point).
#[tokio::main]
async fn run_client(args: Args) -> Result<()> {
    // Diagnostics on stderr, reports on stdout
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("ptrk=info".parse()?)
                .add_directive("ptrk_client=info".parse()?),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        pid = process::id(),
        host = %args.host,
        port = args.port,
        "ptrk starting"
    );

    let framing = if args.reassemble_lines {
        LineFraming::Reassemble
    } else {
        LineFraming::PerRead
    };

    let config = ClientConfig {
        host: args.host,
        port: args.port,
        framing,
        ..Default::default()
    };

    // Create cancellation token for graceful shutdown
    let cancel_token = CancellationToken::new();

    let shutdown_token = cancel_token.clone();
    tokio::spawn(async move {
        if let Err(e) = wait_for_shutdown_signal().await {
            error!(error = %e, "Error waiting for shutdown signal");
            return;
        }
        info!("Shutdown signal received");
        shutdown_token.cancel();
    });

    let client = TrackerClient::new(config, cancel_token);
    let address = client.config().address();

    let summary = client
        .run(tokio::io::stdout())
        .await
        .with_context(|| format!("Session with {address} failed"))?;

    info!(
        accepted = summary.ingest.accepted,
        rejected = summary.ingest.rejected,
        reports = summary.reports,
        "ptrk stopped"
    );
    Ok(())
}

/// Waits for a shutdown signal (SIGTERM or SIGINT).
async fn wait_for_shutdown_signal() -> Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut sigterm = signal(SignalKind::terminate())?;
        let mut sigint = signal(SignalKind::interrupt())?;

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT");
            }
        }
    }

    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await?;
        info!("Received Ctrl+C");
    }

    Ok(())
}
