//! Pluggable HTTP transport.
//!
//! The wire reporter needs a single capability: execute one request and
//! hand back the response. `reqwest::Client` provides it directly; tests
//! substitute their own implementations.

use async_trait::async_trait;
use reqwest::{Request, Response};

use crate::wire::error::TransportError;

#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: Request) -> Result<Response, TransportError>;
}

#[async_trait]
impl Transport for reqwest::Client {
    async fn execute(&self, request: Request) -> Result<Response, TransportError> {
        reqwest::Client::execute(self, request)
            .await
            .map_err(TransportError::Http)
    }
}
