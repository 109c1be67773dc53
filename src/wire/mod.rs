//! Bugsnag wire delivery subsystem.
//!
//! # Data Flow
//! ```text
//! SharedError + ReportMetadata
//!     → payload.rs (notify schema, stack formatting)
//!     → reporter.rs (encode, POST, drain, status check)
//!     → transport.rs (pluggable HTTP execution)
//!     → on any failure: error.rs DeliveryError → backup reporter
//! ```
//!
//! # Design Decisions
//! - One request per error, no retries, no batching
//! - Success is exactly HTTP 200; the sink's error body is never parsed
//! - The backup reporter is a required constructor argument

pub mod error;
pub mod payload;
pub mod reporter;
pub mod transport;

pub use error::{DeliveryError, TransportError};
pub use payload::Payload;
pub use reporter::WireReporter;
pub use transport::Transport;
