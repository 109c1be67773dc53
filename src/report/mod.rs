//! Reporting abstraction shared by every sink.
//!
//! # Data Flow
//! ```text
//! Application failure
//!     → SharedError (+ optional ReportMetadata)
//!     → Reporter::report(ctx, err, metadata)
//!         → FanOutReporter (optional, concurrent)
//!         → WireReporter / WriterReporter / TracingReporter
//!         → WireReporter backup chain on any delivery failure
//! ```
//!
//! # Design Decisions
//! - `report` has no return value; delivery failures end in a backup
//!   reporter or are discarded by the concrete reporter
//! - Errors are shared behind `Arc` so one failure can reach many sinks
//! - Error classification is carried explicitly by [`TracedError`]

pub mod context;
pub mod error;
pub mod metadata;
pub mod stack;

use std::sync::Arc;

use async_trait::async_trait;

pub use context::ReportContext;
pub use error::TracedError;
pub use metadata::ReportMetadata;
pub use stack::{BacktraceCapture, Frame, StackCapture};

/// An error value that can be handed to several reporters at once.
pub type SharedError = Arc<dyn std::error::Error + Send + Sync + 'static>;

/// A sink for application errors.
///
/// Implementations must never surface their own delivery failures to the
/// caller: a failure is either handed to a backup reporter or dropped.
#[async_trait]
pub trait Reporter: Send + Sync {
    async fn report(&self, ctx: &ReportContext, err: SharedError, metadata: Option<ReportMetadata>);
}

#[async_trait]
impl<R: Reporter + ?Sized> Reporter for Arc<R> {
    async fn report(&self, ctx: &ReportContext, err: SharedError, metadata: Option<ReportMetadata>) {
        (**self).report(ctx, err, metadata).await
    }
}

#[async_trait]
impl<R: Reporter + ?Sized> Reporter for Box<R> {
    async fn report(&self, ctx: &ReportContext, err: SharedError, metadata: Option<ReportMetadata>) {
        (**self).report(ctx, err, metadata).await
    }
}
