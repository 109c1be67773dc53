//! Bugsnag wire reporter.
//!
//! # Delivery Steps
//! ```text
//! capture stack → populate metadata → build payload → encode
//!     → build POST request → execute via Transport
//!     → drain response prefix → check status
//! ```
//! Every step that fails hands a [`DeliveryError`] to the backup reporter
//! and stops; a drain failure is reported on its own and the status check
//! still runs. Both the request and the drain are bounded by the
//! [`ReportContext`] cancellation and deadline.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::{HeaderValue, CONTENT_TYPE};
use reqwest::{Method, Request, Response, StatusCode};
use url::Url;

use crate::config::{NotifierConfig, ReporterConfig};
use crate::report::{
    BacktraceCapture, ReportContext, ReportMetadata, Reporter, SharedError, StackCapture,
    TracedError,
};
use crate::wire::error::{DeliveryError, TransportError};
use crate::wire::payload::{local_hostname, Payload, PayloadSource};
use crate::wire::transport::Transport;

/// Reporter that delivers errors to a Bugsnag-compatible ingestion endpoint.
///
/// The backup reporter is mandatory: it receives every failure this
/// reporter cannot resolve itself. It must tolerate concurrent calls.
pub struct WireReporter {
    api_key: String,
    release_stage: String,
    notifier: NotifierConfig,
    transport: Arc<dyn Transport>,
    backup: Arc<dyn Reporter>,
    stack_capture: Arc<dyn StackCapture>,
}

impl WireReporter {
    pub fn new(
        api_key: impl Into<String>,
        release_stage: impl Into<String>,
        transport: Arc<dyn Transport>,
        backup: Arc<dyn Reporter>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            release_stage: release_stage.into(),
            notifier: NotifierConfig::default(),
            transport,
            backup,
            stack_capture: Arc::new(BacktraceCapture::default()),
        }
    }

    pub fn from_config(
        config: &ReporterConfig,
        transport: Arc<dyn Transport>,
        backup: Arc<dyn Reporter>,
    ) -> Self {
        Self::new(&config.api_key, &config.release_stage, transport, backup)
            .with_notifier(config.notifier.clone())
    }

    pub fn with_notifier(mut self, notifier: NotifierConfig) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn with_stack_capture(mut self, capture: Arc<dyn StackCapture>) -> Self {
        self.stack_capture = capture;
        self
    }

    pub fn notifier(&self) -> &NotifierConfig {
        &self.notifier
    }

    /// Build the payload that `report` would send for `err`.
    pub fn payload(&self, err: &SharedError, metadata: Option<ReportMetadata>) -> Payload {
        let err = TracedError::ensure(err, self.stack_capture.as_ref());
        let mut metadata = metadata.unwrap_or_default();
        metadata.populate(&err);

        let hostname = local_hostname();
        let source = PayloadSource {
            api_key: &self.api_key,
            release_stage: &self.release_stage,
            notifier: &self.notifier,
            hostname: &hostname,
        };
        Payload::new(source, &err, &metadata)
    }

    fn build_request(&self, body: Vec<u8>) -> Result<Request, DeliveryError> {
        let url = Url::parse(&self.notifier.endpoint).map_err(|e| {
            DeliveryError::Request(format!("invalid endpoint '{}': {}", self.notifier.endpoint, e))
        })?;

        let mut request = Request::new(Method::POST, url);
        request
            .headers_mut()
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        *request.body_mut() = Some(body.into());
        Ok(request)
    }

    /// Execute the request, bounded by the context's cancellation and deadline.
    async fn send(&self, ctx: &ReportContext, request: Request) -> Result<Response, TransportError> {
        within_context(ctx, self.transport.execute(request)).await
    }

    async fn fall_back(&self, ctx: &ReportContext, reason: DeliveryError) {
        tracing::warn!(
            endpoint = %self.notifier.endpoint,
            reason = %reason,
            "Bugsnag delivery failed, handing error to backup reporter"
        );
        let err = TracedError::new(reason).into_shared();
        self.backup.report(ctx, err, None).await;
    }
}

/// Run `fut` until it completes, the context is cancelled or its deadline
/// passes, whichever comes first. Cancellation wins ties.
async fn within_context<T, E, F>(ctx: &ReportContext, fut: F) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
    E: From<TransportError>,
{
    let bounded = async {
        match ctx.deadline() {
            Some(deadline) => match tokio::time::timeout_at(deadline, fut).await {
                Ok(result) => result,
                Err(_) => Err(E::from(TransportError::Timeout)),
            },
            None => fut.await,
        }
    };

    tokio::select! {
        biased;
        _ = ctx.cancellation().cancelled() => Err(E::from(TransportError::Cancelled)),
        result = bounded => result,
    }
}

/// Read at most `limit` bytes of the body, then release the response.
async fn drain(mut response: Response, limit: usize) -> Result<(), DeliveryError> {
    let mut read = 0;
    while read < limit {
        match response.chunk().await.map_err(DeliveryError::Drain)? {
            Some(chunk) => read += chunk.len(),
            None => break,
        }
    }
    Ok(())
}

#[async_trait]
impl Reporter for WireReporter {
    async fn report(&self, ctx: &ReportContext, err: SharedError, metadata: Option<ReportMetadata>) {
        let payload = self.payload(&err, metadata);

        let body = match payload.to_json() {
            Ok(body) => body,
            Err(e) => return self.fall_back(ctx, e.into()).await,
        };

        let request = match self.build_request(body) {
            Ok(request) => request,
            Err(e) => return self.fall_back(ctx, e).await,
        };

        let response = match self.send(ctx, request).await {
            Ok(response) => response,
            Err(e) => return self.fall_back(ctx, e.into()).await,
        };

        let status = response.status();
        let drained = within_context(ctx, drain(response, self.notifier.drain_limit_bytes)).await;
        if let Err(e) = drained {
            self.fall_back(ctx, e).await;
        }

        if status != StatusCode::OK {
            return self.fall_back(ctx, DeliveryError::Status(status.as_u16())).await;
        }

        tracing::debug!(status = %status, "Error report delivered");
    }
}

impl fmt::Debug for WireReporter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WireReporter")
            .field("endpoint", &self.notifier.endpoint)
            .field("release_stage", &self.release_stage)
            .finish()
    }
}
