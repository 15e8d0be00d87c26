//! HTTP wire types shared by the client and its transports.
//!
//! # Design
//! Requests and responses are plain data. `RequestClient` builds an
//! `HttpRequest` and classifies an `HttpResponse`; a `Transport` (or a host
//! engine on the other side of the FFI) performs the actual round-trip.
//!
//! All fields use owned types so values can cross the FFI boundary without
//! lifetime concerns.

use std::fmt;
use std::str::FromStr;

use crate::error::ApiError;

/// Every method name a `RequestSpec` can carry.
///
/// Being representable here does not make a method sendable; the client's
/// `MethodTable` decides which of these are allowed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    #[default]
    Get,
    Post,
    Put,
    Patch,
    Delete,
    Copy,
    Head,
    Options,
    Link,
    Unlink,
    Purge,
    Lock,
    Unlock,
    Propfind,
    View,
}

impl HttpMethod {
    pub const ALL: [HttpMethod; 15] = [
        HttpMethod::Get,
        HttpMethod::Post,
        HttpMethod::Put,
        HttpMethod::Patch,
        HttpMethod::Delete,
        HttpMethod::Copy,
        HttpMethod::Head,
        HttpMethod::Options,
        HttpMethod::Link,
        HttpMethod::Unlink,
        HttpMethod::Purge,
        HttpMethod::Lock,
        HttpMethod::Unlock,
        HttpMethod::Propfind,
        HttpMethod::View,
    ];

    /// Canonical upper-case name as sent on the request line.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Copy => "COPY",
            HttpMethod::Head => "HEAD",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Link => "LINK",
            HttpMethod::Unlink => "UNLINK",
            HttpMethod::Purge => "PURGE",
            HttpMethod::Lock => "LOCK",
            HttpMethod::Unlock => "UNLOCK",
            HttpMethod::Propfind => "PROPFIND",
            HttpMethod::View => "VIEW",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = ApiError;

    /// Case-insensitive. Names outside the enumerated set are reported as
    /// unsupported so callers see the same error the client would raise.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpMethod::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ApiError::UnsupportedMethod {
                method: s.to_string(),
            })
    }
}

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub uri: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Vec<u8>>,
}

impl HttpRequest {
    /// First header value whose name matches `name` case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}
