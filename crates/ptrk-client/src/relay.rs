//! Periodic relay of the object store.
//!
//! The relay loop runs as its own task. On every tick it snapshots the
//! [`ObjectStore`], encodes the snapshot and writes it to the sink as one
//! line. The first report goes out immediately.

use std::time::Duration;

use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use ptrk_protocol::encode_report;

use crate::error::{ClientError, Result};
use crate::store::ObjectStore;

/// Time between two reports.
pub const RELAY_INTERVAL: Duration = Duration::from_millis(1500);

/// `tokio::time::interval` rejects a zero period.
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Spawns the relay loop on its own task.
///
/// The task resolves to the number of reports written, or to
/// [`ClientError::Relay`] if the sink fails.
pub fn spawn_relay<W>(
    store: ObjectStore,
    sink: W,
    period: Duration,
    cancel_token: CancellationToken,
) -> JoinHandle<Result<u64>>
where
    W: AsyncWrite + Unpin + Send + 'static,
{
    tokio::spawn(run_relay(store, sink, period, cancel_token))
}

/// Relays the store every `period` until `cancel_token` fires.
pub async fn run_relay<W>(
    store: ObjectStore,
    mut sink: W,
    period: Duration,
    cancel_token: CancellationToken,
) -> Result<u64>
where
    W: AsyncWrite + Unpin,
{
    let mut ticker = interval(period.max(MIN_PERIOD));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut reports = 0u64;

    debug!(?period, "Relay loop starting");

    loop {
        tokio::select! {
            biased;
            _ = cancel_token.cancelled() => {
                debug!(reports, "Relay loop stopping");
                return Ok(reports);
            }
            _ = ticker.tick() => {}
        }

        relay_once(&store, &mut sink).await?;
        reports = reports.saturating_add(1);
    }
}

/// Writes one report line for the current snapshot.
///
/// Returns the number of objects relayed.
pub async fn relay_once<W>(store: &ObjectStore, sink: &mut W) -> Result<usize>
where
    W: AsyncWrite + Unpin,
{
    let snapshot = store.snapshot();
    let mut line = encode_report(&snapshot);
    line.push('\n');

    sink.write_all(line.as_bytes())
        .await
        .map_err(ClientError::Relay)?;
    sink.flush().await.map_err(ClientError::Relay)?;

    trace!(objects = snapshot.len(), "Relayed snapshot");
    Ok(snapshot.len())
}
