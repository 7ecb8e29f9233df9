//! ptrk Client - Runtime for the proximity tracking relay
//!
//! This crate connects to a tracking server and keeps two loops running
//! for the lifetime of the connection:
//! - `ingest` - reads the object feed and upserts classified objects
//! - `relay` - snapshots the store on a fixed cadence and writes reports
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  bytes   ┌─────────────────┐  upsert  ┌──────────────┐
//! │  TcpStream   │─────────▶│    Ingestor     │─────────▶│ ObjectStore  │
//! └──────────────┘          │ frame/parse/    │          │ (Mutex +     │
//!                           │ classify        │          │  IndexMap)   │
//!                           └─────────────────┘          └──────┬───────┘
//!                                                               │ snapshot
//!                           ┌─────────────────┐                 ▼
//!                 stdout ◀──│   relay loop    │◀──── every RELAY_INTERVAL
//!                           └─────────────────┘
//! ```
//!
//! # Panic-Free Guarantees
//!
//! All production code in this crate follows the panic-free policy:
//! - No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, `todo!()`
//! - All fallible operations return `Result` or `Option`

pub mod client;
pub mod error;
pub mod ingest;
pub mod relay;
pub mod store;

pub use client::{ClientConfig, SessionSummary, TrackerClient};
pub use error::{ClientError, Result};
pub use ingest::{IngestSummary, Ingestor, LineFramer, LineFraming, StreamEnd, RECEIVE_BUFFER_LEN};
pub use relay::{relay_once, run_relay, spawn_relay, RELAY_INTERVAL};
pub use store::{ObjectStore, Upsert};
