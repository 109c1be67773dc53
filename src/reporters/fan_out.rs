//! Concurrent fan-out to several reporters.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::task::JoinSet;

use crate::report::{ReportContext, ReportMetadata, Reporter, SharedError};

/// Sends one error to every registered reporter concurrently.
///
/// `report` returns once every sub-reporter has finished. Sub-reporters
/// receive the error only; metadata is not forwarded.
#[derive(Clone, Default)]
pub struct FanOutReporter {
    reporters: Vec<Arc<dyn Reporter>>,
}

impl FanOutReporter {
    pub fn new(reporters: Vec<Arc<dyn Reporter>>) -> Self {
        Self { reporters }
    }

    pub fn push(&mut self, reporter: Arc<dyn Reporter>) {
        self.reporters.push(reporter);
    }

    pub fn len(&self) -> usize {
        self.reporters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reporters.is_empty()
    }
}

impl FromIterator<Arc<dyn Reporter>> for FanOutReporter {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Reporter>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[async_trait]
impl Reporter for FanOutReporter {
    async fn report(&self, ctx: &ReportContext, err: SharedError, _metadata: Option<ReportMetadata>) {
        if self.reporters.is_empty() {
            return;
        }

        tracing::debug!(reporters = self.reporters.len(), "Fanning out error report");

        let mut tasks = JoinSet::new();
        for reporter in &self.reporters {
            let reporter = Arc::clone(reporter);
            let ctx = ctx.clone();
            let err = Arc::clone(&err);
            tasks.spawn(async move { reporter.report(&ctx, err, None).await });
        }

        while let Some(result) = tasks.join_next().await {
            if let Err(e) = result {
                // A panicking reporter must not keep the others from finishing.
                tracing::error!(error = %e, "Reporter task failed");
            }
        }
    }
}

impl fmt::Debug for FanOutReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FanOutReporter")
            .field("reporters", &self.reporters.len())
            .finish()
    }
}
