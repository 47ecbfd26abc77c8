//! Declarative endpoint descriptors.
//!
//! # Design
//! An endpoint names its environment, path, method, headers, and
//! parameters; the provided methods turn that description into an
//! `HttpRequest` and turn an `HttpResponse` back into the endpoint's
//! `Model`. Nothing here performs I/O, so descriptors can be built and
//! checked without a network, and the FFI layer can hand the request to a
//! host that does its own I/O.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{ApiError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::ApiResponse;

/// Base URL of the production challenge API.
pub const PRODUCTION_BASE_URL: &str = "https://inhouse-api.dktechgroup.com/api/ardraw";

/// Timeout applied to a whole call unless the environment overrides it.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Request parameters. Keys are unique; iteration order is sorted, which
/// keeps generated query strings deterministic.
pub type Params = BTreeMap<String, Value>;

/// Where an endpoint lives and what every request to it carries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub base_url: String,
    pub timeout: Duration,
    pub headers: Vec<(String, String)>,
}

impl Environment {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
        }
    }

    /// Declare JSON as the content type of every request.
    pub fn with_json_content_type(self) -> Self {
        self.with_header("Content-Type", "application/json")
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }
}

/// Description of one HTTP operation and the type its payload decodes to.
pub trait Endpoint {
    /// Payload type carried in the envelope's `data` field.
    type Model: DeserializeOwned;

    fn environment(&self) -> &Environment;

    /// Path relative to the environment's base URL.
    fn path(&self) -> &str;

    fn method(&self) -> HttpMethod;

    fn headers(&self) -> Vec<(String, String)> {
        self.environment().headers.clone()
    }

    fn params(&self) -> Params {
        Params::new()
    }

    /// Base URL with `path` appended as a path component.
    fn full_url(&self) -> Result<Url> {
        join_url(&self.environment().base_url, self.path())
    }

    /// Build the request: query-encoded params for GET/DELETE, a JSON
    /// object body for POST/PUT/PATCH.
    fn build_request(&self) -> Result<HttpRequest> {
        let mut url = self.full_url()?;
        let method = self.method();
        let params = self.params();

        let body = if method.carries_body() {
            let body = serde_json::to_string(&params).map_err(|e| ApiError::Serialization(e.to_string()))?;
            Some(body)
        } else {
            if !params.is_empty() {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in &params {
                    pairs.append_pair(key, &param_text(value));
                }
            }
            None
        };

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers: self.headers(),
            body,
        })
    }

    /// Check the status and decode the body as an `ApiResponse<Model>`.
    fn parse_response(&self, response: HttpResponse) -> Result<ApiResponse<Self::Model>> {
        check_status(&response)?;
        decode(&response.body)
    }

    /// Check the status and decode the body directly as `Model`, without an
    /// envelope.
    fn parse_model(&self, response: HttpResponse) -> Result<Self::Model> {
        check_status(&response)?;
        decode(&response.body)
    }
}

/// Append `path` to `base` so that exactly one `/` separates them.
pub fn join_url(base: &str, path: &str) -> Result<Url> {
    let mut url = Url::parse(base).map_err(|e| ApiError::Configuration(format!("{base:?}: {e}")))?;
    if !matches!(url.scheme(), "http" | "https") || url.cannot_be_a_base() {
        return Err(ApiError::Configuration(format!("{base:?}: not an http(s) base URL")));
    }

    let path = path.trim_matches('/');
    if path.is_empty() {
        return Ok(url);
    }
    let joined = format!("{}/{path}", url.path().trim_end_matches('/'));
    url.set_path(&joined);
    Ok(url)
}

/// Strings go into the query verbatim; other values as their JSON text.
fn param_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Map non-success status codes to `ApiError::HttpStatus`.
fn check_status(response: &HttpResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }
    Err(ApiError::HttpStatus {
        status: response.status,
        body: response.body.clone(),
    })
}

fn decode<T: DeserializeOwned>(body: &str) -> Result<T> {
    serde_json::from_str(body).map_err(|e| ApiError::Decoding(e.to_string()))
}
