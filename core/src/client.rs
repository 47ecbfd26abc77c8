//! Uniform execution of endpoint descriptors.
//!
//! # Design
//! `execute` is the only place that combines request building, I/O, and
//! response parsing. It performs exactly one `Transport::send` per call and
//! holds no state between calls: no retry, no caching. Failures propagate
//! immediately.

use tracing::{debug, warn};

use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::http::HttpRequest;
use crate::transport::Transport;
use crate::types::ApiResponse;

/// Build the endpoint's request, send it, and decode the response envelope.
pub fn execute<E, T>(endpoint: &E, transport: &T) -> Result<ApiResponse<E::Model>>
where
    E: Endpoint + ?Sized,
    T: Transport + ?Sized,
{
    let request = endpoint.build_request()?;
    log_request(&request, endpoint);
    let response = transport
        .send(&request, endpoint.environment().timeout)
        .inspect_err(|e| warn!(url = %request.url, error = %e, "request failed"))?;
    endpoint.parse_response(response)
}

/// Like [`execute`], but decode the body directly as `E::Model`.
pub fn execute_model<E, T>(endpoint: &E, transport: &T) -> Result<E::Model>
where
    E: Endpoint + ?Sized,
    T: Transport + ?Sized,
{
    let request = endpoint.build_request()?;
    log_request(&request, endpoint);
    let response = transport
        .send(&request, endpoint.environment().timeout)
        .inspect_err(|e| warn!(url = %request.url, error = %e, "request failed"))?;
    endpoint.parse_model(response)
}

fn log_request<E: Endpoint + ?Sized>(request: &HttpRequest, endpoint: &E) {
    debug!(
        method = %request.method,
        url = %request.url,
        headers = ?request.headers,
        params = ?endpoint.params(),
        body = request.body.as_deref().unwrap_or(""),
        "sending request"
    );
}
