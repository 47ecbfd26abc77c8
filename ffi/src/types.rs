//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` instead of `String`, raw pointers instead of `Vec`, and
//! enums with explicit discriminants. Conversion functions live here to keep
//! `lib.rs` focused on the `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use challenge_core::{ApiError, ApiService, ChallengeEntity, HttpMethod, HttpRequest};

/// Opaque handle to an `ApiService`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiClient {
    pub(crate) inner: ApiService,
}

/// Copy `s` into a heap C string owned by the caller. Interior NULs, which
/// C cannot represent, are dropped.
pub(crate) fn to_c_string(s: impl Into<String>) -> *mut c_char {
    let mut s: String = s.into();
    s.retain(|c| c != '\0');
    CString::new(s).unwrap_or_default().into_raw()
}

fn to_nullable_c_string(s: Option<String>) -> *mut c_char {
    s.map_or(std::ptr::null_mut(), to_c_string)
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// HTTP method as a C enum.
#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Patch = 3,
    Delete = 4,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Patch => FfiHttpMethod::Patch,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as C-compatible plain data.
///
/// Built by `sc_build_fetch_challenges`. The host executes the request and
/// passes the response back through `sc_parse_fetch_challenges`.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub url: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
    /// Timeout the host should apply, in milliseconds.
    pub timeout_ms: u64,
}

impl FfiHttpRequest {
    /// Convert a core `HttpRequest` into a heap-allocated `FfiHttpRequest`.
    pub(crate) fn from_core(req: HttpRequest, timeout_ms: u64) -> *mut Self {
        let url = to_c_string(req.url);
        let body = to_nullable_c_string(req.body);

        let headers_len = req.headers.len() as u32;
        let headers = if req.headers.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi_headers: Vec<FfiHeader> = req
                .headers
                .into_iter()
                .map(|(k, v)| FfiHeader {
                    key: to_c_string(k),
                    value: to_c_string(v),
                })
                .collect();
            Box::into_raw(ffi_headers.into_boxed_slice()) as *mut FfiHeader
        };

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            url,
            headers,
            headers_len,
            body,
            timeout_ms,
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// An HTTP response described as C-compatible plain data.
///
/// The host constructs this on the stack after executing the request, then
/// passes a pointer to `sc_parse_fetch_challenges`. The FFI layer reads but
/// does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Error category in `FfiChallengeResult`.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorKind {
    Ok = 0,
    Configuration = 1,
    Network = 2,
    HttpStatus = 3,
    Decoding = 4,
    NoData = 5,
    Serialization = 6,
    Panic = 7,
    NullArg = 8,
}

/// One challenge exposed to C. Nullable strings are null when absent.
#[repr(C)]
pub struct FfiChallenge {
    pub id: i64,
    pub name: *mut c_char,
    pub category: *mut c_char,
    pub thump_url: *mut c_char,
    pub thump_filter: *mut c_char,
}

impl FfiChallenge {
    fn from_core(c: ChallengeEntity) -> Self {
        FfiChallenge {
            id: c.id,
            name: to_c_string(c.name),
            category: to_c_string(c.category),
            thump_url: to_nullable_c_string(c.thump_url),
            thump_filter: to_nullable_c_string(c.thump_filter),
        }
    }
}

/// A list of challenges exposed to C.
#[repr(C)]
pub struct FfiChallengeList {
    pub items: *mut FfiChallenge,
    pub len: u32,
}

/// Result envelope for parse and fetch operations.
///
/// On success `error_kind` is `Ok`, `error_message` is null, and
/// `challenges` points to the list (possibly empty).
/// On failure `error_kind` is the category, `error_code` the domain code the
/// app keys its messages on, `error_message` a human-readable C string, and
/// `challenges` is null.
#[repr(C)]
pub struct FfiChallengeResult {
    pub error_kind: FfiErrorKind,
    pub error_code: i32,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub challenges: *mut FfiChallengeList,
}

impl FfiChallengeResult {
    pub(crate) fn from_core(result: challenge_core::Result<Vec<ChallengeEntity>>) -> *mut Self {
        match result {
            Ok(challenges) => Self::ok(challenges),
            Err(e) => Self::from_error(e),
        }
    }

    /// Build a success result carrying the challenge list.
    pub(crate) fn ok(challenges: Vec<ChallengeEntity>) -> *mut Self {
        let len = challenges.len() as u32;
        let items = if challenges.is_empty() {
            std::ptr::null_mut()
        } else {
            let ffi: Vec<FfiChallenge> = challenges.into_iter().map(FfiChallenge::from_core).collect();
            Box::into_raw(ffi.into_boxed_slice()) as *mut FfiChallenge
        };

        let list = Box::new(FfiChallengeList { items, len });
        Box::into_raw(Box::new(FfiChallengeResult {
            error_kind: FfiErrorKind::Ok,
            error_code: 0,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            challenges: Box::into_raw(list),
        }))
    }

    /// Build an error result from an `ApiError`.
    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let error_kind = match &err {
            ApiError::Configuration(_) => FfiErrorKind::Configuration,
            ApiError::Network { .. } => FfiErrorKind::Network,
            ApiError::HttpStatus { .. } => FfiErrorKind::HttpStatus,
            ApiError::Decoding(_) => FfiErrorKind::Decoding,
            ApiError::NoData => FfiErrorKind::NoData,
            ApiError::Serialization(_) => FfiErrorKind::Serialization,
        };
        Self::failure(error_kind, err.code(), err.http_status().unwrap_or(0), err.to_string())
    }

    /// Build an error result for a null argument.
    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorKind::NullArg, 0, 0, format!("null argument: {name}"))
    }

    /// Build an error result for a caught panic.
    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorKind::Panic, 0, 0, msg.to_string())
    }

    fn failure(error_kind: FfiErrorKind, error_code: i32, http_status: u16, msg: String) -> *mut Self {
        Box::into_raw(Box::new(FfiChallengeResult {
            error_kind,
            error_code,
            error_message: to_c_string(msg),
            http_status,
            challenges: std::ptr::null_mut(),
        }))
    }
}
