//! Network egress
//!
//! The client talks to the backend only through [`Transport`], so the retry protocol can
//! be driven by a scripted transport in tests and by `gloo-net` in the browser.

use super::request::{Method, OutgoingRequest, RawResponse};

/// Transport error types
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Failed to build request: {0}")]
    Build(String),

    #[error("Request failed: {0}")]
    Send(String),

    #[error("Failed to read response body: {0}")]
    Body(String),
}

/// Delivers one request and returns whatever status the server answered with.
///
/// Implementations report only transport-level failures as errors; HTTP error
/// statuses come back as ordinary responses.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError>;
}

/// Browser `fetch` transport
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooTransport;

impl Transport for GlooTransport {
    async fn send(&self, request: OutgoingRequest) -> Result<RawResponse, TransportError> {
        use gloo_net::http::Request;

        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
        };

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| TransportError::Build(e.to_string()))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| TransportError::Send(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Body(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
