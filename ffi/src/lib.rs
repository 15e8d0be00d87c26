//! C-ABI wrapper around `webapi-core` for game engines that own their
//! networking.
//!
//! # Overview
//! The engine creates a client once, asks it to build each request, sends
//! the request with its own web stack, then hands the status and body back
//! for classification. No async runtime or socket is used on this side.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - The C caller owns all returned pointers and must release them with the
//!   matching `webapi_*_free` / `webapi_free_*` function.

pub mod types;

use std::ffi::CStr;
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use webapi_core::{ClientConfig, HttpMethod, HttpResponse, RequestClient, RequestSpec};

use types::*;

/// Borrow a C string as `&str`. `None` for null or non-UTF-8 input.
fn str_arg<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client bound to `base_domain`.
///
/// `auth_key` / `auth_value` are read only when `use_auth_header` is true.
/// Returns null if `base_domain` is null, if auth is enabled with a null
/// or empty key or a null value, or if an internal panic occurs. Free with
/// `webapi_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn webapi_client_new(
    base_domain: *const c_char,
    use_auth_header: bool,
    auth_key: *const c_char,
    auth_value: *const c_char,
) -> *mut FfiRequestClient {
    catch_unwind(|| {
        let Some(domain) = str_arg(base_domain) else {
            return std::ptr::null_mut();
        };
        let mut config = ClientConfig::new(domain);
        if use_auth_header {
            match (str_arg(auth_key), str_arg(auth_value)) {
                (Some(key), Some(value)) => config = config.with_auth_header(key, value),
                _ => return std::ptr::null_mut(),
            }
        }
        if config.validate().is_err() {
            return std::ptr::null_mut();
        }
        let client = RequestClient::detached(config);
        Box::into_raw(Box::new(FfiRequestClient { inner: client }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `webapi_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn webapi_client_free(client: *mut FfiRequestClient) {
    if !client.is_null() {
        let _ = catch_unwind(AssertUnwindSafe(|| {
            drop(unsafe { Box::from_raw(client) });
        }));
    }
}

// ---------------------------------------------------------------------------
// Build / classify
// ---------------------------------------------------------------------------

/// Build the request for `method_name` (e.g. "GET", "POST") on `endpoint`.
///
/// `body_json` may be null. On success `*out_request` receives a request to
/// free with `webapi_free_request` and the returned result has
/// `error_code = Ok`; on failure `*out_request` is set to null. The result
/// itself must always be freed with `webapi_free_result`.
#[unsafe(no_mangle)]
pub extern "C" fn webapi_build_request(
    client: *const FfiRequestClient,
    endpoint: *const c_char,
    method_name: *const c_char,
    body_json: *const c_char,
    out_request: *mut *mut FfiHttpRequest,
) -> *mut FfiWebResult {
    catch_unwind(AssertUnwindSafe(|| {
        if out_request.is_null() {
            return FfiWebResult::failure(FfiErrorCode::NullArg, "null argument: out_request");
        }
        unsafe { *out_request = std::ptr::null_mut() };
        if client.is_null() {
            return FfiWebResult::failure(FfiErrorCode::NullArg, "null argument: client");
        }
        let Some(endpoint) = str_arg(endpoint) else {
            return FfiWebResult::failure(FfiErrorCode::NullArg, "null argument: endpoint");
        };
        let Some(method_name) = str_arg(method_name) else {
            return FfiWebResult::failure(FfiErrorCode::NullArg, "null argument: method_name");
        };
        let method: HttpMethod = match method_name.parse() {
            Ok(m) => m,
            Err(e) => return FfiWebResult::from_error(e),
        };

        let mut spec = RequestSpec::new(endpoint, method);
        if !body_json.is_null() {
            let body = str_arg(body_json).and_then(|s| serde_json::from_str(s).ok());
            match body {
                Some(value) => spec = spec.with_body(value),
                None => {
                    return FfiWebResult::failure(FfiErrorCode::InvalidArg, "body_json is not valid JSON")
                }
            }
        }

        let client = unsafe { &*client };
        match client.inner.build_request(&spec) {
            Ok(req) => {
                unsafe { *out_request = FfiHttpRequest::from_core(req) };
                FfiWebResult::built()
            }
            Err(e) => FfiWebResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiWebResult::failure(FfiErrorCode::Panic, "panic in webapi_build_request"))
}

/// Classify a response the host received.
///
/// `error_code = Ok` for 200/201/202; `Http` with the status name and body
/// for everything else.
#[unsafe(no_mangle)]
pub extern "C" fn webapi_classify_response(
    client: *const FfiRequestClient,
    response: *const FfiHttpResponse,
) -> *mut FfiWebResult {
    catch_unwind(AssertUnwindSafe(|| {
        if client.is_null() {
            return FfiWebResult::failure(FfiErrorCode::NullArg, "null argument: client");
        }
        if response.is_null() {
            return FfiWebResult::failure(FfiErrorCode::NullArg, "null argument: response");
        }
        let client = unsafe { &*client };
        let resp = unsafe { &*response };
        let body = if resp.body.is_null() {
            String::new()
        } else {
            unsafe { CStr::from_ptr(resp.body) }.to_string_lossy().into_owned()
        };
        let core_resp = HttpResponse {
            status: resp.status,
            headers: Vec::new(),
            body,
        };
        match client.inner.classify(core_resp) {
            Ok(result) => FfiWebResult::ok(result),
            Err(e) => FfiWebResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| FfiWebResult::failure(FfiErrorCode::Panic, "panic in webapi_classify_response"))
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request produced by `webapi_build_request`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn webapi_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| FfiHttpRequest::free(unsafe { Box::from_raw(req) })));
}

/// Free a result returned by any `webapi_*` call. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn webapi_free_result(result: *mut FfiWebResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(AssertUnwindSafe(|| FfiWebResult::free(unsafe { Box::from_raw(result) })));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
