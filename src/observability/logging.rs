//! Structured logging.
//!
//! # Responsibilities
//! - Install the global `tracing` subscriber for binaries
//! - Resolve the log filter from `RUST_LOG`, falling back to a default
//!
//! Library code only emits events; it never installs a subscriber itself.

use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default filter used when `RUST_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "bugsnack=info";

/// Build the filter: `RUST_LOG` first, `fallback` otherwise.
pub fn env_filter(fallback: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Install a fmt subscriber writing to stderr.
///
/// Fails if a global subscriber is already set.
pub fn init_logging(fallback: &str) -> Result<(), TryInitError> {
    tracing_subscriber::registry()
        .with(env_filter(fallback))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init()
}
