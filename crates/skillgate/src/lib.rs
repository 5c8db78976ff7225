//! Top-level facade crate for skillgate.
//!
//! Re-exports core types and the gateway library so users can depend on a single crate.

pub mod core {
    pub use skillgate_core::*;
}

pub mod gateway {
    pub use skillgate_gateway::*;
}
