//! Server connection client.
//!
//! This module provides the `TrackerClient` which handles:
//! - Resolving and connecting to the tracking server over TCP
//! - Running the ingestion loop on the connection
//! - Running the relay loop alongside it for the connection lifetime
//!
//! There is no reconnection: when the server closes the stream the
//! session ends and the relay loop is stopped and joined.
//!
//! **Panic-Free Policy:** This module follows the project's panic-free guidelines.
//! No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, or `todo!()`.

use std::time::Duration;

use tokio::io::{AsyncRead, AsyncWrite};
use tokio::net::{lookup_host, TcpStream};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::ingest::{IngestSummary, Ingestor, LineFraming};
use crate::relay::{spawn_relay, RELAY_INTERVAL};
use crate::store::ObjectStore;

// ============================================================================
// Configuration
// ============================================================================

/// Configuration for the tracker client.
///
/// # Example
///
/// ```rust
/// use ptrk_client::{ClientConfig, LineFraming};
///
/// let config = ClientConfig {
///     host: "tracker.local".to_string(),
///     port: 4000,
///     framing: LineFraming::Reassemble,
///     ..Default::default()
/// };
/// assert_eq!(config.address(), "tracker.local:4000");
/// ```
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Server host name or IP address.
    pub host: String,

    /// Server TCP port.
    pub port: u16,

    /// How inbound reads are cut into lines.
    pub framing: LineFraming,

    /// Time between relay reports. The binary always uses [`RELAY_INTERVAL`].
    pub relay_interval: Duration,
}

impl ClientConfig {
    /// Returns `host:port` for display.
    pub fn address(&self) -> String {
        if self.host.contains(':') {
            format!("[{}]:{}", self.host, self.port)
        } else {
            format!("{}:{}", self.host, self.port)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            framing: LineFraming::default(),
            relay_interval: RELAY_INTERVAL,
        }
    }
}

// ============================================================================
// Tracker Client
// ============================================================================

/// Outcome of one connection.
#[derive(Debug)]
pub struct SessionSummary {
    /// How ingestion went and why it stopped.
    pub ingest: IngestSummary,
    /// Reports written by the relay loop.
    pub reports: u64,
}

/// Client for the tracking server.
///
/// Owns the [`ObjectStore`] for its lifetime; both loops receive a
/// handle to it.
///
/// # Connection Lifecycle
///
/// 1. Resolve the server address and try each result in order
/// 2. Spawn the relay loop on its own task
/// 3. Ingest on the current task until the stream closes, fails, or
///    the cancellation token fires
/// 4. Stop the relay loop and wait for it to finish
pub struct TrackerClient {
    config: ClientConfig,
    store: ObjectStore,
    cancel_token: CancellationToken,
}

impl TrackerClient {
    /// Creates a new client with an empty store.
    #[must_use]
    pub fn new(config: ClientConfig, cancel_token: CancellationToken) -> Self {
        Self {
            config,
            store: ObjectStore::new(),
            cancel_token,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Handle to the store, e.g. for resetting it with [`ObjectStore::clear`].
    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    /// Connects to the server and runs a session, relaying to `sink`.
    pub async fn run<W>(&self, sink: W) -> Result<SessionSummary>
    where
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let stream = self.connect().await?;
        self.run_on(stream, sink).await
    }

    /// Resolves the server address and connects to the first address
    /// that accepts.
    pub async fn connect(&self) -> Result<TcpStream> {
        let addr = self.config.address();

        let candidates: Vec<_> = lookup_host((self.config.host.as_str(), self.config.port))
            .await
            .map_err(|source| ClientError::Resolve {
                addr: addr.clone(),
                source,
            })?
            .collect();

        let mut last_error = None;
        for candidate in candidates {
            debug!(%candidate, "Attempting to connect");
            match TcpStream::connect(candidate).await {
                Ok(stream) => {
                    info!(server = %candidate, "Connected to server");
                    return Ok(stream);
                }
                Err(e) => {
                    debug!(%candidate, error = %e, "Connection attempt failed");
                    last_error = Some(e);
                }
            }
        }

        match last_error {
            Some(source) => Err(ClientError::Connect { addr, source }),
            None => Err(ClientError::NoAddresses(addr)),
        }
    }

    /// Runs a session over an already established byte stream.
    ///
    /// Returns once ingestion has stopped and the relay loop has been
    /// joined. A relay failure stops ingestion and is returned as an
    /// error.
    pub async fn run_on<R, W>(&self, stream: R, sink: W) -> Result<SessionSummary>
    where
        R: AsyncRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let relay_token = self.cancel_token.child_token();
        let ingest_token = self.cancel_token.child_token();

        let mut relay = spawn_relay(
            self.store.clone(),
            sink,
            self.config.relay_interval,
            relay_token.clone(),
        );
        let ingest = Ingestor::new(self.store.clone(), self.config.framing).run(stream, &ingest_token);
        tokio::pin!(ingest);

        let (ingest, relayed) = tokio::select! {
            biased;
            summary = &mut ingest => {
                relay_token.cancel();
                (summary, relay.await)
            }
            relayed = &mut relay => {
                if !relay_token.is_cancelled() {
                    warn!("Relay loop ended early, stopping ingestion");
                }
                ingest_token.cancel();
                (ingest.await, relayed)
            }
        };

        let reports = relayed.map_err(|e| ClientError::RelayTask(e.to_string()))??;

        info!(
            accepted = ingest.accepted,
            rejected = ingest.rejected,
            reports,
            end = %ingest.end,
            "Session finished"
        );

        Ok(SessionSummary { ingest, reports })
    }
}

// ============================================================================
// Tests
// ============================================================================
