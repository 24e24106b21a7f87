//! Tracing subscriber setup.

use tracing_subscriber::EnvFilter;

/// Default filter directive used when `RUST_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Install a formatted tracing subscriber filtered by `RUST_LOG`.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_tracing() {
    let filter = std::env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .try_init();
}
