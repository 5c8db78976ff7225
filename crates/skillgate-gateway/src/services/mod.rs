//! Built-in services.

pub mod greeter;

pub use greeter::GreeterService;
