//! Per-report metadata.

use std::error::Error;

use serde_json::{Map, Value};

use crate::report::error::TracedError;

/// Severity used when none is supplied.
pub const DEFAULT_SEVERITY: &str = "error";
pub const SEVERITY_WARNING: &str = "warning";
pub const SEVERITY_INFO: &str = "info";

/// Class used when the error carries no classification label.
pub const UNKNOWN_ERROR_CLASS: &str = "unknown";

/// Descriptor attached to a single report call.
///
/// Empty strings mean "not set". See [`ReportMetadata::populate`] for the
/// defaults applied before delivery.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportMetadata {
    /// Classification label.
    pub error_class: String,
    /// Free-form location hint.
    pub context: String,
    /// Key the sink uses to cluster related events.
    pub grouping_hash: String,
    pub severity: String,
    /// Structured data attached verbatim to the event.
    pub event_metadata: Option<Map<String, Value>>,
}

impl ReportMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_error_class(mut self, class: impl Into<String>) -> Self {
        self.error_class = class.into();
        self
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = context.into();
        self
    }

    pub fn with_grouping_hash(mut self, hash: impl Into<String>) -> Self {
        self.grouping_hash = hash.into();
        self
    }

    pub fn with_severity(mut self, severity: impl Into<String>) -> Self {
        self.severity = severity.into();
        self
    }

    pub fn with_event_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.event_metadata = Some(metadata);
        self
    }

    /// Add one key to the event metadata, creating the map when absent.
    pub fn insert_metadata(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.event_metadata
            .get_or_insert_with(Map::new)
            .insert(key.into(), value.into());
        self
    }

    /// Apply defaults: the error's class label and the `"error"` severity.
    pub fn populate(&mut self, err: &(dyn Error + 'static)) {
        if self.error_class.is_empty() {
            self.error_class = err
                .downcast_ref::<TracedError>()
                .and_then(TracedError::class)
                .unwrap_or(UNKNOWN_ERROR_CLASS)
                .to_string();
        }
        if self.severity.is_empty() {
            self.severity = DEFAULT_SEVERITY.to_string();
        }
    }

    /// Event metadata worth sending: present and not empty.
    pub fn non_empty_event_metadata(&self) -> Option<&Map<String, Value>> {
        self.event_metadata.as_ref().filter(|map| !map.is_empty())
    }
}
