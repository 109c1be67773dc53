//! Bugsnag notify payload.
//!
//! Field names follow the ingestion schema exactly; optional event fields
//! are omitted rather than sent empty.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::config::NotifierConfig;
use crate::report::{Frame, ReportMetadata, TracedError};

/// One outgoing request body.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload {
    pub api_key: String,
    pub notifier: Notifier,
    pub events: Vec<Event>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notifier {
    pub name: String,
    pub url: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "PayloadVersion")]
    pub payload_version: String,
    pub exceptions: Vec<Exception>,
    pub severity: String,
    pub app: App,
    pub device: Device,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grouping_hash: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_data: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Exception {
    pub error_class: String,
    pub message: String,
    pub stacktrace: Vec<StackFrame>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StackFrame {
    pub method: String,
    pub file: String,
    pub line_number: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct App {
    pub release_stage: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Device {
    pub hostname: String,
}

/// Inputs of a single payload that come from the reporter, not the error.
#[derive(Debug, Clone, Copy)]
pub struct PayloadSource<'a> {
    pub api_key: &'a str,
    pub release_stage: &'a str,
    pub notifier: &'a NotifierConfig,
    pub hostname: &'a str,
}

impl Payload {
    /// Build the payload for one error. `metadata` must already be populated.
    pub fn new(source: PayloadSource<'_>, err: &TracedError, metadata: &ReportMetadata) -> Self {
        let event = Event {
            payload_version: source.notifier.payload_version.clone(),
            exceptions: vec![Exception {
                error_class: metadata.error_class.clone(),
                message: err.to_string(),
                stacktrace: format_stack(err.frames()),
            }],
            severity: metadata.severity.clone(),
            app: App {
                release_stage: source.release_stage.to_string(),
            },
            device: Device {
                hostname: source.hostname.to_string(),
            },
            grouping_hash: non_empty(&metadata.grouping_hash),
            context: non_empty(&metadata.context),
            meta_data: metadata.non_empty_event_metadata().cloned(),
        };

        Self {
            api_key: source.api_key.to_string(),
            notifier: Notifier {
                name: source.notifier.name.clone(),
                url: source.notifier.url.clone(),
                version: source.notifier.version.clone(),
            },
            events: vec![event],
        }
    }

    pub fn to_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

fn non_empty(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_string())
}

/// Format captured frames, dropping the innermost (capture-site) frame.
pub fn format_stack(frames: &[Frame]) -> Vec<StackFrame> {
    frames
        .iter()
        .skip(1)
        .map(|frame| StackFrame {
            method: frame.method.clone(),
            file: frame.file.clone(),
            line_number: frame.line,
        })
        .collect()
}

/// Best-effort local hostname; empty when it cannot be resolved.
pub fn local_hostname() -> String {
    sysinfo::System::host_name().unwrap_or_default()
}
