//! Error reporting dispatch.
//!
//! Takes an application failure, optionally with structured metadata, and
//! delivers it to one or more error-tracking sinks. A failed delivery to one
//! sink never blocks another, and delivery failures are handed to a backup
//! reporter instead of being swallowed.
//!
//! # Architecture Overview
//!
//! ```text
//!   caller
//!     │ report(ctx, err, metadata)
//!     ▼
//!   FanOutReporter ──────┬──────────────┬──────────────┐
//!   (optional)           ▼              ▼              ▼
//!                  WireReporter   WriterReporter  TracingReporter
//!                        │
//!                        │ payload → POST → drain → status
//!                        ▼
//!                  backup Reporter (on any failure)
//! ```

pub mod config;
pub mod observability;
pub mod report;
pub mod reporters;
pub mod wire;

pub use config::{NotifierConfig, ReporterConfig};
pub use report::{ReportContext, ReportMetadata, Reporter, SharedError, TracedError};
pub use reporters::{FanOutReporter, TracingReporter, WriterReporter};
pub use wire::{Transport, WireReporter};
