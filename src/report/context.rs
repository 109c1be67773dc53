//! Per-call cancellation and deadline.

use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation scope threaded through a single report call.
///
/// Cloning shares the same cancellation token, so a fan-out hands every
/// sub-reporter the caller's scope.
#[derive(Debug, Clone, Default)]
pub struct ReportContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl ReportContext {
    /// A context that is never cancelled and has no deadline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the context to an externally owned cancellation token.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Set the deadline relative to now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context() {
        let ctx = ReportContext::new();
        assert!(!ctx.is_cancelled());
        assert!(ctx.deadline().is_none());
    }

    #[test]
    fn test_clone_shares_cancellation() {
        let token = CancellationToken::new();
        let ctx = ReportContext::new().with_cancellation(token.clone());
        let child = ctx.clone();

        token.cancel();

        assert!(ctx.is_cancelled());
        assert!(child.is_cancelled());
    }

    #[tokio::test]
    async fn test_timeout_sets_deadline() {
        let before = Instant::now();
        let ctx = ReportContext::new().with_timeout(Duration::from_secs(5));
        let deadline = ctx.deadline().unwrap();
        assert!(deadline >= before + Duration::from_secs(5));
    }
}
