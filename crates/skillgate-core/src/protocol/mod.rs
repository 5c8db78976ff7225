//! Protocol modules (request envelope, typed catalog, response builder).
//!
//! This module hosts the platform wire contracts:
//! - Envelope: shallow decode of an inbound body, just enough to read the
//!   discriminant, the freshness timestamp, and the application id.
//! - Request catalog: the closed set of typed payload shapes.
//! - Response: the per-request accumulator and its serialized envelope.
//!
//! All parsers are panic-free: malformed input is reported as
//! `DispatchError` instead of panicking, keeping the gateway resilient to
//! hostile traffic.

pub mod envelope;
pub mod request;
pub mod response;
