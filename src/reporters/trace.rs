//! Reporter that emits errors as `tracing` events.

use async_trait::async_trait;

use crate::report::metadata::{SEVERITY_INFO, SEVERITY_WARNING};
use crate::report::{ReportContext, ReportMetadata, Reporter, SharedError};

/// Logs every error through `tracing`, at a level derived from its severity.
///
/// Never fails, which makes it a safe backup for [`WireReporter`].
///
/// [`WireReporter`]: crate::wire::WireReporter
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

#[async_trait]
impl Reporter for TracingReporter {
    async fn report(&self, _ctx: &ReportContext, err: SharedError, metadata: Option<ReportMetadata>) {
        let mut metadata = metadata.unwrap_or_default();
        metadata.populate(&*err);

        match metadata.severity.as_str() {
            SEVERITY_INFO => tracing::info!(
                error = %err,
                error_class = %metadata.error_class,
                context = %metadata.context,
                "Error reported"
            ),
            SEVERITY_WARNING => tracing::warn!(
                error = %err,
                error_class = %metadata.error_class,
                context = %metadata.context,
                "Error reported"
            ),
            severity => tracing::error!(
                error = %err,
                error_class = %metadata.error_class,
                severity = %severity,
                context = %metadata.context,
                "Error reported"
            ),
        }
    }
}
