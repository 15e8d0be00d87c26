//! The seam between the client and the network.
//!
//! `RequestClient` only ever talks to a `Transport`. `UreqTransport` is the
//! real one; tests plug in stubs that record what they were asked to send.

use std::io::Read;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one round-trip. Any HTTP status is a successful return;
    /// `Err` means no response was obtained.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Blocking `ureq` agent driven from tokio's blocking pool.
///
/// Status codes are returned as data so the client can classify them, and
/// non-standard methods (PURGE, PROPFIND, ...) are passed through.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .allow_non_standard_methods(true)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for UreqTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, request))
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?
    }
}

fn execute_blocking(agent: &ureq::Agent, request: HttpRequest) -> Result<HttpResponse> {
    debug!(method = %request.method, uri = %request.uri, "dispatching request");

    let mut builder = ureq::http::Request::builder()
        .method(request.method.as_str())
        .uri(&request.uri);
    for (key, value) in &request.headers {
        builder = builder.header(key, value);
    }

    let sent = match request.body {
        Some(body) => builder.body(body).map(|req| agent.run(req)),
        None => builder.body(()).map(|req| agent.run(req)),
    };
    let mut response = sent
        .map_err(|e| ApiError::Transport(e.to_string()))?
        .map_err(|e| ApiError::Transport(e.to_string()))?;

    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(k, v)| Some((k.as_str().to_string(), v.to_str().ok()?.to_string())))
        .collect();
    // The status has arrived, so from here on the call is a response, not a
    // transport failure. A body cut short keeps the bytes that were read.
    let mut bytes = Vec::new();
    if let Err(e) = response.body_mut().as_reader().read_to_end(&mut bytes) {
        warn!(status, error = %e, read = bytes.len(), "response body truncated");
    }

    Ok(HttpResponse {
        status,
        headers,
        body: String::from_utf8_lossy(&bytes).into_owned(),
    })
}

/// Transport for clients that never send on their own.
///
/// Hosts that do their own networking only call `build_request` and
/// `classify`; anything that reaches `execute` fails without I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct DetachedTransport;

#[async_trait]
impl Transport for DetachedTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        Err(ApiError::Transport(format!(
            "no transport attached; {} {} was not sent",
            request.method, request.uri
        )))
    }
}
