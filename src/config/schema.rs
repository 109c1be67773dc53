//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files and
//! default every field, so an empty file is a valid (if unusable) config.

use serde::{Deserialize, Serialize};

/// Bugsnag ingestion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://notify.bugsnag.com";

/// Notifier identity sent with every payload.
pub const NOTIFIER_NAME: &str = "Bugsnack/Bugsnag";
pub const NOTIFIER_URL: &str = "https://github.com/fromatob/bugsnack";
pub const CLIENT_VERSION: &str = "0.0.3";

/// Event schema version understood by the sink.
pub const PAYLOAD_VERSION: &str = "2";

/// Bytes of response body read before the response is released.
pub const DEFAULT_DRAIN_LIMIT_BYTES: usize = 1024;

/// Root configuration for a Bugsnag reporter.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReporterConfig {
    /// Project API key.
    pub api_key: String,

    /// Release stage reported in the `app` block (e.g. "production").
    pub release_stage: String,

    /// Wire-level constants.
    pub notifier: NotifierConfig,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            release_stage: "production".to_string(),
            notifier: NotifierConfig::default(),
        }
    }
}

/// Endpoint and notifier descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct NotifierConfig {
    /// URL the payload is POSTed to.
    pub endpoint: String,

    /// Notifier name reported to the sink.
    pub name: String,

    /// Notifier repository URL.
    pub url: String,

    /// Notifier version.
    pub version: String,

    /// Value of the event `PayloadVersion` field.
    pub payload_version: String,

    /// Upper bound on response bytes drained before release.
    pub drain_limit_bytes: usize,
}

impl Default for NotifierConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            name: NOTIFIER_NAME.to_string(),
            url: NOTIFIER_URL.to_string(),
            version: CLIENT_VERSION.to_string(),
            payload_version: PAYLOAD_VERSION.to_string(),
            drain_limit_bytes: DEFAULT_DRAIN_LIMIT_BYTES,
        }
    }
}
