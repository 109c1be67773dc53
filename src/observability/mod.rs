//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All reporters produce:
//!     → tracing events (delivery outcome, fallbacks, task failures)
//!
//! Consumers:
//!     → logging.rs subscriber (stderr, filter from RUST_LOG)
//! ```
//!
//! # Design Decisions
//! - Structured fields (`error = %e`) instead of formatted messages
//! - Fallbacks to a backup reporter are logged at WARN
//! - The subscriber is installed by binaries, never by the library

pub mod logging;

pub use logging::init_logging;
