//! skillgate core: transport-agnostic protocol primitives and error types.
//!
//! This crate defines the request/response wire contracts and the error
//! surface shared by the gateway and by embedding applications. It
//! intentionally carries no transport or runtime dependencies so it can be
//! reused in multiple contexts.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here
//! (`#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]`).
//! All fallible paths must surface as `Result` so production processes do
//! not crash on malformed input or hostile traffic.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{GateError, Result};
