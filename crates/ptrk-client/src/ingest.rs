//! Ingestion of the inbound object feed.
//!
//! Bytes read from the server are framed into lines, parsed, classified
//! and upserted into the [`ObjectStore`]. Malformed lines are logged and
//! skipped; they never stop ingestion.
//!
//! # Framing
//!
//! Reads are not guaranteed to end on a line boundary. With
//! [`LineFraming::PerRead`] every read is split on its own, so a line
//! straddling two reads arrives as two malformed fragments and is lost.
//! [`LineFraming::Reassemble`] keeps the trailing fragment of a read and
//! prepends it to the next one, flushing whatever is left when the
//! stream ends.
//!
//! **Panic-Free Policy:** This module follows the project's panic-free guidelines.
//! No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, or `todo!()`.

use std::fmt;
use std::io;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, trace, warn};

use ptrk_core::TrackedObject;
use ptrk_protocol::{parse_line, split_on, ParseError};

use crate::store::{ObjectStore, Upsert};

/// Capacity of the receive buffer; a single read never exceeds this.
pub const RECEIVE_BUFFER_LEN: usize = 1024;

/// Upper bound on a carried-over fragment in reassembly mode.
const MAX_PENDING_LEN: usize = 64 * RECEIVE_BUFFER_LEN;

const LINE_SEPARATOR: char = '\n';

// ============================================================================
// Line Framing
// ============================================================================

/// How reads are cut into lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFraming {
    /// Split each read independently; partial lines are not carried over.
    #[default]
    PerRead,
    /// Carry an incomplete trailing line over to the next read.
    Reassemble,
}

/// Turns raw reads into non-empty lines.
#[derive(Debug, Default)]
pub struct LineFramer {
    mode: LineFraming,
    pending: Vec<u8>,
}

impl LineFramer {
    pub fn new(mode: LineFraming) -> Self {
        Self {
            mode,
            pending: Vec::new(),
        }
    }

    /// Frames one read, returning the complete non-empty lines it yields.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        match self.mode {
            LineFraming::PerRead => split_lines(&String::from_utf8_lossy(chunk)),
            LineFraming::Reassemble => {
                self.pending.extend_from_slice(chunk);

                let Some(last_newline) = self.pending.iter().rposition(|&b| b == b'\n') else {
                    if self.pending.len() > MAX_PENDING_LEN {
                        warn!(
                            bytes = self.pending.len(),
                            "Discarding oversized partial line"
                        );
                        self.pending.clear();
                    }
                    return Vec::new();
                };

                let complete: Vec<u8> = self.pending.drain(..=last_newline).collect();
                split_lines(&String::from_utf8_lossy(&complete))
            }
        }
    }

    /// Returns the carried-over fragment, if any, once the stream has ended.
    pub fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let tail = std::mem::take(&mut self.pending);
        Some(String::from_utf8_lossy(&tail).into_owned())
    }

    /// Bytes currently held back waiting for a line terminator.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

fn split_lines(text: &str) -> Vec<String> {
    split_on(text, LINE_SEPARATOR)
        .into_iter()
        .filter(|line| !line.is_empty())
        .map(str::to_owned)
        .collect()
}

// ============================================================================
// Ingestion
// ============================================================================

/// Why the ingestion loop stopped.
#[derive(Debug)]
pub enum StreamEnd {
    /// The peer closed the connection (zero-byte read).
    Closed,
    /// A read returned an error.
    ReadFailed(io::Error),
    /// The owning process asked ingestion to stop.
    Cancelled,
}

impl fmt::Display for StreamEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("closed by peer"),
            Self::ReadFailed(e) => write!(f, "read failed: {e}"),
            Self::Cancelled => f.write_str("cancelled"),
        }
    }
}

/// Counters reported when ingestion stops.
#[derive(Debug)]
pub struct IngestSummary {
    /// Lines that parsed and were stored.
    pub accepted: u64,
    /// Lines that failed to parse.
    pub rejected: u64,
    /// How the stream ended.
    pub end: StreamEnd,
}

/// Feeds framed lines from the server into the store.
#[derive(Debug)]
pub struct Ingestor {
    store: ObjectStore,
    framer: LineFramer,
    accepted: u64,
    rejected: u64,
}

impl Ingestor {
    pub fn new(store: ObjectStore, framing: LineFraming) -> Self {
        Self {
            store,
            framer: LineFramer::new(framing),
            accepted: 0,
            rejected: 0,
        }
    }

    /// Processes one read worth of bytes.
    pub fn ingest_chunk(&mut self, chunk: &[u8]) {
        trace!(bytes = chunk.len(), "Received chunk");
        for line in self.framer.push(chunk) {
            // Failures are already logged and counted
            let _ = self.ingest_line(&line);
        }
    }

    /// Parses, classifies and stores a single line.
    pub fn ingest_line(&mut self, line: &str) -> Result<Upsert, ParseError> {
        match parse_line(line) {
            Ok(report) => {
                let object = TrackedObject::classify(report);
                let outcome = self.store.upsert(object);
                self.accepted = self.accepted.saturating_add(1);
                debug!(
                    id = %object.id,
                    x = object.x,
                    y = object.y,
                    kind = %object.kind,
                    distance = object.distance(),
                    color = %object.color,
                    ?outcome,
                    "Object stored"
                );
                Ok(outcome)
            }
            Err(e) => {
                self.rejected = self.rejected.saturating_add(1);
                warn!(reason = %e, line = %line, "Could not parse line");
                Err(e)
            }
        }
    }

    /// Reads from `reader` until it closes, fails, or `cancel` fires.
    pub async fn run<R>(mut self, mut reader: R, cancel: &CancellationToken) -> IngestSummary
    where
        R: AsyncRead + Unpin,
    {
        let mut buf = vec![0u8; RECEIVE_BUFFER_LEN];

        let end = loop {
            let read = tokio::select! {
                biased;
                _ = cancel.cancelled() => None,
                read = reader.read(&mut buf) => Some(read),
            };

            let Some(read) = read else {
                break StreamEnd::Cancelled;
            };

            match read {
                Ok(0) => break StreamEnd::Closed,
                Ok(n) => self.ingest_chunk(buf.get(..n).unwrap_or_default()),
                Err(e) => break StreamEnd::ReadFailed(e),
            }
        };

        if let Some(tail) = self.framer.finish() {
            debug!(bytes = tail.len(), "Flushing unterminated final line");
            let _ = self.ingest_line(&tail);
        }

        info!(
            accepted = self.accepted,
            rejected = self.rejected,
            end = %end,
            "Ingestion stopped"
        );

        IngestSummary {
            accepted: self.accepted,
            rejected: self.rejected,
            end,
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
