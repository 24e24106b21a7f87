//! Ambient helpers shared by the mockup crates.

pub mod logging;

pub use logging::init_tracing;
