//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate the endpoint URL and value ranges
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ReporterConfig → Result<(), Vec<ValidationError>>

use thiserror::Error;
use url::Url;

use crate::config::schema::ReporterConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("api_key must not be empty")]
    MissingApiKey,

    #[error("release_stage must not be empty")]
    MissingReleaseStage,

    #[error("notifier.endpoint '{endpoint}' is invalid: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("notifier.drain_limit_bytes must be greater than zero")]
    ZeroDrainLimit,
}

/// Check a configuration, collecting every problem found.
pub fn validate_config(config: &ReporterConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.api_key.trim().is_empty() {
        errors.push(ValidationError::MissingApiKey);
    }

    if config.release_stage.trim().is_empty() {
        errors.push(ValidationError::MissingReleaseStage);
    }

    let endpoint = &config.notifier.endpoint;
    match Url::parse(endpoint) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(url) => errors.push(ValidationError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        }),
        Err(e) => errors.push(ValidationError::InvalidEndpoint {
            endpoint: endpoint.clone(),
            reason: e.to_string(),
        }),
    }

    if config.notifier.drain_limit_bytes == 0 {
        errors.push(ValidationError::ZeroDrainLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
