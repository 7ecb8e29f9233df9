//! Error types for the ptrk client runtime.
//!
//! Connection setup failures are kept distinct from the other two
//! failure families: malformed records are [`ptrk_protocol::ParseError`]
//! values that are logged and skipped, and the end of the inbound stream
//! is reported as a [`crate::ingest::StreamEnd`], not as an error.
//!
//! **Panic-Free Policy:** This module follows the project's panic-free guidelines.
//! No `.unwrap()`, `.expect()`, `panic!()`, `unreachable!()`, or `todo!()`.

use std::io;
use thiserror::Error;

// ============================================================================
// Client Error Type
// ============================================================================

/// Client runtime errors.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The server address could not be resolved.
    #[error("Failed to resolve {addr}: {source}")]
    Resolve {
        /// The `host:port` that was looked up.
        addr: String,
        #[source]
        source: io::Error,
    },

    /// Resolution succeeded but produced no addresses.
    #[error("No addresses found for {0}")]
    NoAddresses(String),

    /// Every resolved address refused or failed the connection.
    #[error("Failed to connect to {addr}: {source}")]
    Connect {
        /// The `host:port` that was dialled.
        addr: String,
        /// Error from the last address attempted.
        #[source]
        source: io::Error,
    },

    /// Writing a report to the relay sink failed.
    #[error("Failed to write relay report: {0}")]
    Relay(#[source] io::Error),

    /// The relay task panicked or was aborted.
    #[error("Relay task failed: {0}")]
    RelayTask(String),
}

// ============================================================================
// Result Type Alias
// ============================================================================

/// Convenience Result type alias for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

// ============================================================================
// Tests
// ============================================================================
