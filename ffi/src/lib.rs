//! C-ABI wrapper around `challenge-core`.
//!
//! # Overview
//! Exposes the challenge-filter fetch through `extern "C"` functions so the
//! host app can either let the library do the HTTP round trip
//! (`sc_fetch_challenges`) or do its own I/O between
//! `sc_build_fetch_challenges` and `sc_parse_fetch_challenges`.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - A single `FfiChallengeResult` envelope carries either the challenge list
//!   or the error kind, domain code, HTTP status, and message.
//! - The C caller owns all returned pointers and must call the matching
//!   `sc_free_*` function to release them.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::catch_unwind;
use std::time::Duration;

use challenge_core::{ApiService, ClientConfig, HttpResponse};
use tracing::warn;

use types::*;

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Read an optional C string argument. Null and invalid UTF-8 give `None`.
fn opt_str(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok().map(str::to_string)
}

/// Create a client for the API at `base_url`.
///
/// `sign` may be null to use the built-in signing token. `timeout_secs` of 0
/// keeps the default 30 second timeout. Returns null if `base_url` is null,
/// if `base_url` or a non-null `sign` is not valid UTF-8, or if an internal
/// panic occurs.
/// The caller must free the returned pointer with `sc_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn sc_client_new(
    base_url: *const c_char,
    sign: *const c_char,
    timeout_secs: u32,
) -> *mut FfiClient {
    catch_unwind(|| {
        let Some(base_url) = opt_str(base_url) else {
            return std::ptr::null_mut();
        };
        let mut config = ClientConfig {
            base_url,
            ..ClientConfig::default()
        };
        if !sign.is_null() {
            let Some(sign) = opt_str(sign) else {
                return std::ptr::null_mut();
            };
            config.sign = sign;
        }
        if timeout_secs > 0 {
            config.timeout = Duration::from_secs(u64::from(timeout_secs));
        }
        Box::into_raw(Box::new(FfiClient {
            inner: ApiService::new(config),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `sc_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn sc_client_free(client: *mut FfiClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Host-does-IO path
// ---------------------------------------------------------------------------

/// Build the HTTP request for fetching challenge filters.
///
/// Returns null if `client` is null or its base URL is malformed.
/// The caller must free the returned pointer with `sc_free_request`.
#[unsafe(no_mangle)]
pub extern "C" fn sc_build_fetch_challenges(client: *const FfiClient) -> *mut FfiHttpRequest {
    catch_unwind(|| {
        if client.is_null() {
            return std::ptr::null_mut();
        }
        let client = unsafe { &*client };
        let timeout_ms = client.inner.config().timeout.as_millis() as u64;
        match client.inner.build_fetch_challenges() {
            Ok(req) => FfiHttpRequest::from_core(req, timeout_ms),
            Err(e) => {
                warn!(error = %e, "could not build challenge request");
                std::ptr::null_mut()
            }
        }
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Convert an `FfiHttpResponse` to a core `HttpResponse`. A null body is
/// read as empty.
fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let body = if resp.body.is_null() {
        String::new()
    } else {
        unsafe { CStr::from_ptr(resp.body) }.to_string_lossy().into_owned()
    };
    HttpResponse {
        status: resp.status,
        headers: Vec::new(),
        body,
    }
}

/// Parse the host's response to a `sc_build_fetch_challenges` request.
#[unsafe(no_mangle)]
pub extern "C" fn sc_parse_fetch_challenges(
    client: *const FfiClient,
    response: *const FfiHttpResponse,
) -> *mut FfiChallengeResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiChallengeResult::null_arg("client");
        }
        if response.is_null() {
            return FfiChallengeResult::null_arg("response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        FfiChallengeResult::from_core(client.inner.parse_fetch_challenges(ffi_response_to_core(resp)))
    })
    .unwrap_or_else(|_| FfiChallengeResult::panic("panic in sc_parse_fetch_challenges"))
}

// ---------------------------------------------------------------------------
// Library-does-IO path
// ---------------------------------------------------------------------------

/// Fetch challenge filters over the network, blocking the calling thread
/// for at most the client's timeout.
#[unsafe(no_mangle)]
pub extern "C" fn sc_fetch_challenges(client: *const FfiClient) -> *mut FfiChallengeResult {
    catch_unwind(|| {
        if client.is_null() {
            return FfiChallengeResult::null_arg("client");
        }
        let client = unsafe { &*client };
        FfiChallengeResult::from_core(client.inner.fetch_challenges())
    })
    .unwrap_or_else(|_| FfiChallengeResult::panic("panic in sc_fetch_challenges"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free an `FfiHttpRequest` returned by `sc_build_fetch_challenges`.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn sc_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.url);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(req.headers, req.headers_len as usize))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free an `FfiChallengeResult` returned by any parse or fetch function.
/// Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn sc_free_result(result: *mut FfiChallengeResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.challenges.is_null() {
            return;
        }
        let list = unsafe { Box::from_raw(result.challenges) };
        if !list.items.is_null() && list.len > 0 {
            let items = unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(list.items, list.len as usize)) };
            for item in items.iter() {
                free_c_string(item.name);
                free_c_string(item.category);
                free_c_string(item.thump_url);
                free_c_string(item.thump_filter);
            }
        }
    });
}

/// Free a C string allocated by this library. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn sc_free_string(s: *mut c_char) {
    if !s.is_null() {
        let _ = catch_unwind(|| free_c_string(s));
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
