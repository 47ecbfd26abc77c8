//! Executes `HttpRequest` values over the network.
//!
//! `Transport` is the seam between request building and I/O: the core ships
//! a `ureq`-backed implementation, tests substitute canned responses, and
//! FFI hosts may skip it entirely and do their own I/O.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use tracing::debug;

use crate::error::{
    ApiError, Result, CANNOT_CONNECT_CODE, NO_INTERNET_CONNECTION_CODE, TIMED_OUT_CODE,
    UNKNOWN_NETWORK_CODE,
};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Performs exactly one HTTP round trip per call.
///
/// Non-2xx responses are returned as data; only failures that produce no
/// response at all become errors (`ApiError::Network`).
pub trait Transport {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse> {
        (**self).send(request, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Arc<T> {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse> {
        (**self).send(request, timeout)
    }
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse> {
        (**self).send(request, timeout)
    }
}

/// Blocking transport backed by a `ureq` agent.
#[derive(Debug, Clone, Default)]
pub struct UreqTransport;

impl UreqTransport {
    pub fn new() -> Self {
        Self
    }

    fn agent(timeout: Duration) -> ureq::Agent {
        ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent()
    }
}

impl Transport for UreqTransport {
    fn send(&self, request: &HttpRequest, timeout: Duration) -> Result<HttpResponse> {
        let agent = Self::agent(timeout);
        let url = request.url.as_str();
        let headers = request.headers.as_slice();
        let body = request.body.as_deref();

        let result = match request.method {
            HttpMethod::Get => with_headers(agent.get(url), headers).call(),
            HttpMethod::Delete => with_headers(agent.delete(url), headers).call(),
            HttpMethod::Post => send_body(with_headers(agent.post(url), headers), body),
            HttpMethod::Put => send_body(with_headers(agent.put(url), headers), body),
            HttpMethod::Patch => send_body(with_headers(agent.patch(url), headers), body),
        };
        let mut response = result.map_err(network_error)?;

        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(k, v)| (k.as_str().to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response.body_mut().read_to_string().map_err(network_error)?;
        debug!(status, bytes = body.len(), "received response");

        Ok(HttpResponse { status, headers, body })
    }
}

fn with_headers<B>(mut builder: ureq::RequestBuilder<B>, headers: &[(String, String)]) -> ureq::RequestBuilder<B> {
    for (key, value) in headers {
        builder = builder.header(key.as_str(), value.as_str());
    }
    builder
}

fn send_body(
    builder: ureq::RequestBuilder<ureq::typestate::WithBody>,
    body: Option<&str>,
) -> std::result::Result<ureq::http::Response<ureq::Body>, ureq::Error> {
    match body {
        Some(body) => builder.send(body.as_bytes()),
        None => builder.send_empty(),
    }
}

/// Classify a transport failure into a network error code.
fn network_error(err: ureq::Error) -> ApiError {
    let code = match &err {
        ureq::Error::Timeout(_) => TIMED_OUT_CODE,
        ureq::Error::HostNotFound => NO_INTERNET_CONNECTION_CODE,
        ureq::Error::ConnectionFailed => CANNOT_CONNECT_CODE,
        ureq::Error::BadUri(uri) => return ApiError::Configuration(format!("bad uri: {uri}")),
        ureq::Error::Io(io_err) => io_error_code(io_err),
        _ => UNKNOWN_NETWORK_CODE,
    };
    ApiError::Network {
        code,
        message: err.to_string(),
    }
}

fn io_error_code(err: &io::Error) -> i32 {
    match err.kind() {
        io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock => TIMED_OUT_CODE,
        io::ErrorKind::ConnectionRefused | io::ErrorKind::ConnectionReset | io::ErrorKind::ConnectionAborted => {
            CANNOT_CONNECT_CODE
        }
        io::ErrorKind::NotConnected | io::ErrorKind::AddrNotAvailable => NO_INTERNET_CONNECTION_CODE,
        _ => UNKNOWN_NETWORK_CODE,
    }
}
