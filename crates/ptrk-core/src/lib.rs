//! ptrk Core - Shared types for proximity tracking
//!
//! This crate provides the domain types shared between the protocol
//! layer (`ptrk-protocol`) and the client runtime (`ptrk-client`),
//! together with the proximity classifier.
//!
//! All code follows the panic-free policy: no `.unwrap()`, `.expect()`,
//! `panic!()`, `unreachable!()`, `todo!()`, or direct indexing `[i]`.

pub mod classify;
pub mod color;
pub mod error;
pub mod kind;
pub mod object;

// Re-exports for convenience
pub use classify::{classify, distance, DESIGNATED_X, DESIGNATED_Y};
pub use color::Color;
pub use error::{DomainError, DomainResult};
pub use kind::ObjectType;
pub use object::{ObjectId, ObjectReport, TrackedObject};
