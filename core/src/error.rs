//! Error types for the challenge API client.
//!
//! # Design
//! Every failure below the service layer collapses into `ApiError`. Each
//! variant keeps its own payload (status, body, transport message) and also
//! exposes a stable integer through [`ApiError::code`], which is what the
//! host app keys its user-facing messages on.

use thiserror::Error;

/// Code used when no more specific code applies.
pub const DEFAULT_ERROR_CODE: i32 = 9999;
/// Code reported for bodies that do not match the expected shape.
pub const PARSE_DATA_ERROR_CODE: i32 = 6666;
/// Transport timed out.
pub const TIMED_OUT_CODE: i32 = -1001;
/// Host refused the connection or could not be reached.
pub const CANNOT_CONNECT_CODE: i32 = -1004;
/// No network path to the host (DNS failure, offline).
pub const NO_INTERNET_CONNECTION_CODE: i32 = -1009;
/// Any other transport failure.
pub const UNKNOWN_NETWORK_CODE: i32 = -1;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors returned by endpoint execution and the challenge service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint descriptor could not produce a valid request URL.
    #[error("invalid endpoint configuration: {0}")]
    Configuration(String),

    /// The request never produced an HTTP response.
    #[error("network error ({code}): {message}")]
    Network { code: i32, message: String },

    /// The server answered with a non-2xx status.
    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("decoding failed: {0}")]
    Decoding(String),

    /// The envelope decoded but carried no `data`.
    #[error("response contained no data")]
    NoData,

    /// The request parameters could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl ApiError {
    /// Stable integer code for this error.
    ///
    /// HTTP failures report their status, transport failures their
    /// transport code, decoding failures `6666`, everything else `9999`.
    pub fn code(&self) -> i32 {
        match self {
            ApiError::HttpStatus { status, .. } => i32::from(*status),
            ApiError::Network { code, .. } => *code,
            ApiError::Decoding(_) => PARSE_DATA_ERROR_CODE,
            ApiError::Configuration(_) | ApiError::NoData | ApiError::Serialization(_) => {
                DEFAULT_ERROR_CODE
            }
        }
    }

    /// User-facing description keyed on [`ApiError::code`].
    pub fn description(&self) -> &'static str {
        describe_code(self.code())
    }

    /// The HTTP status carried by this error, if any.
    pub fn http_status(&self) -> Option<u16> {
        match self {
            ApiError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Map an error code to the message shown to users.
pub fn describe_code(code: i32) -> &'static str {
    match code {
        PARSE_DATA_ERROR_CODE => "Parse Data Error",
        401 => "Unauthorized",
        403 => "Forbidden error",
        404 => "Not found",
        500 => "Internal Server Error",
        503 => "Service Temporarily Unavailable",
        _ => "Something went wrong, please check your connection",
    }
}
