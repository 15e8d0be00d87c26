//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible fields: `*mut c_char`
//! instead of `String`, a pointer plus length instead of `Vec`, and enums
//! with explicit discriminants. Conversions live here so `lib.rs` stays the
//! `extern "C"` surface.

use std::ffi::CString;
use std::os::raw::c_char;

use webapi_core::{ApiError, HttpRequest, ResponseResult};

/// Opaque handle to a `RequestClient`. C callers receive a pointer to this
/// and pass it back into every FFI function.
pub struct FfiRequestClient {
    pub(crate) inner: webapi_core::RequestClient,
}

/// Build a C string, dropping interior NULs rather than failing.
pub(crate) fn c_string(s: impl Into<Vec<u8>>) -> *mut c_char {
    let mut bytes = s.into();
    bytes.retain(|b| *b != 0);
    CString::new(bytes).unwrap_or_default().into_raw()
}

/// Free a C string produced by `c_string`. Null is ignored.
pub(crate) fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// A request for the host engine to send.
///
/// `body` is null for methods that carry no body, and an empty string for
/// body-carrying methods called without one.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: *mut c_char,
    pub uri: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: HttpRequest) -> *mut Self {
        let headers_len = req.headers.len() as u32;
        let headers: Box<[FfiHeader]> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: c_string(k),
                value: c_string(v),
            })
            .collect();

        Box::into_raw(Box::new(FfiHttpRequest {
            method: c_string(req.method.as_str()),
            uri: c_string(req.uri),
            headers: Box::into_raw(headers) as *mut FfiHeader,
            headers_len,
            body: req.body.map_or(std::ptr::null_mut(), c_string),
        }))
    }

    /// Release every owned field. Consumes the boxed request.
    pub(crate) fn free(req: Box<Self>) {
        free_c_string(req.method);
        free_c_string(req.uri);
        free_c_string(req.body);
        if !req.headers.is_null() {
            let headers = unsafe {
                Box::from_raw(std::ptr::slice_from_raw_parts_mut(
                    req.headers,
                    req.headers_len as usize,
                ))
            };
            for h in headers.iter() {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-provided, not heap-allocated by us)
// ---------------------------------------------------------------------------

/// The response the host engine received.
///
/// Constructed by the caller and passed to `webapi_classify_response`. The
/// FFI layer reads but does not free these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    UnsupportedMethod = 1,
    Http = 2,
    Serialization = 3,
    InvalidArg = 4,
    NullArg = 5,
    Panic = 6,
    Other = 7,
    Config = 8,
}

/// Result envelope for classification and request building errors.
///
/// On success `error_code` is `Ok`, `error_message` is null and the status
/// fields describe the positive response. On an `Http` error the status
/// fields describe the negative response. String fields are null when not
/// applicable.
#[repr(C)]
pub struct FfiWebResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub status_code: u16,
    pub status_name: *mut c_char,
    pub body: *mut c_char,
}

impl FfiWebResult {
    pub(crate) fn ok(result: ResponseResult) -> *mut Self {
        Box::into_raw(Box::new(FfiWebResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            status_code: result.status_code,
            status_name: c_string(result.status_name),
            body: c_string(result.body_text),
        }))
    }

    /// Success with no response attached, used by `webapi_build_request`.
    pub(crate) fn built() -> *mut Self {
        Box::into_raw(Box::new(FfiWebResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            status_code: 0,
            status_name: std::ptr::null_mut(),
            body: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let message = c_string(err.to_string());
        let (error_code, status_code, status_name, body) = match err {
            ApiError::UnsupportedMethod { .. } => {
                (FfiErrorCode::UnsupportedMethod, 0, std::ptr::null_mut(), std::ptr::null_mut())
            }
            ApiError::Http {
                status,
                status_name,
                body,
            } => (FfiErrorCode::Http, status, c_string(status_name), c_string(body)),
            ApiError::Serialization(_) => {
                (FfiErrorCode::Serialization, 0, std::ptr::null_mut(), std::ptr::null_mut())
            }
            ApiError::Config(_) => {
                (FfiErrorCode::Config, 0, std::ptr::null_mut(), std::ptr::null_mut())
            }
            _ => (FfiErrorCode::Other, 0, std::ptr::null_mut(), std::ptr::null_mut()),
        };

        Box::into_raw(Box::new(FfiWebResult {
            error_code,
            error_message: message,
            status_code,
            status_name,
            body,
        }))
    }

    pub(crate) fn failure(error_code: FfiErrorCode, msg: &str) -> *mut Self {
        Box::into_raw(Box::new(FfiWebResult {
            error_code,
            error_message: c_string(msg),
            status_code: 0,
            status_name: std::ptr::null_mut(),
            body: std::ptr::null_mut(),
        }))
    }

    pub(crate) fn free(result: Box<Self>) {
        free_c_string(result.error_message);
        free_c_string(result.status_name);
        free_c_string(result.body);
    }
}
