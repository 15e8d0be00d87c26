//! The request client.
//!
//! # Design
//! `RequestClient` holds read-only configuration behind `Arc`s and carries
//! no mutable state between calls, so clones can run any number of `send`
//! calls concurrently. A call is split into `build_request` (pure),
//! the transport round-trip (the only await point), and `classify` (pure).
//! The pure halves are public so a host that does its own I/O can use them
//! without a transport.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::error::{ApiError, Result};
use crate::http::{HttpRequest, HttpResponse};
use crate::policy::{BodyPolicy, MethodTable, StatusTable};
use crate::transport::{DetachedTransport, Transport, UreqTransport};
use crate::types::{RequestSpec, ResponseResult};

pub const CONTENT_TYPE: &str = "Content-Type";
pub const APPLICATION_JSON: &str = "application/json";

#[derive(Clone)]
pub struct RequestClient {
    config: Arc<ClientConfig>,
    methods: Arc<MethodTable>,
    statuses: Arc<StatusTable>,
    transport: Arc<dyn Transport>,
}

impl RequestClient {
    /// Client with the default tables and a `ureq` transport.
    pub fn new(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(UreqTransport::new()))
    }

    /// Client for hosts that do their own I/O. `build_request` and
    /// `classify` work as usual; `send` and `fetch` fail with `Transport`.
    pub fn detached(config: ClientConfig) -> Self {
        Self::with_transport(config, Arc::new(DetachedTransport))
    }

    pub fn with_transport(config: ClientConfig, transport: Arc<dyn Transport>) -> Self {
        Self {
            config: Arc::new(config),
            methods: Arc::new(MethodTable::default()),
            statuses: Arc::new(StatusTable::default()),
            transport,
        }
    }

    pub fn with_methods(mut self, methods: MethodTable) -> Self {
        self.methods = Arc::new(methods);
        self
    }

    pub fn with_statuses(mut self, statuses: StatusTable) -> Self {
        self.statuses = Arc::new(statuses);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Send `spec` and hand the positive result to `on_complete`.
    ///
    /// `on_complete` runs exactly once on success and never on failure;
    /// failures come back as `Err`.
    pub async fn send<F>(&self, spec: RequestSpec, on_complete: F) -> Result<()>
    where
        F: FnOnce(ResponseResult),
    {
        let result = self.fetch(spec).await?;
        on_complete(result);
        Ok(())
    }

    /// Send `spec` and return the positive result directly.
    pub async fn fetch(&self, spec: RequestSpec) -> Result<ResponseResult> {
        let request = self.build_request(&spec)?;
        let response = self.transport.execute(request).await.inspect_err(|e| {
            warn!(method = %spec.method, endpoint = %spec.endpoint, error = %e, "transport failed");
        })?;
        self.classify(response)
    }

    /// Turn a spec into the wire request without touching the network.
    pub fn build_request(&self, spec: &RequestSpec) -> Result<HttpRequest> {
        self.config.validate()?;
        let policy = self
            .methods
            .policy(spec.method)
            .ok_or_else(|| ApiError::UnsupportedMethod {
                method: spec.method.to_string(),
            })?;

        let body = match (policy, &spec.body) {
            (BodyPolicy::Empty, _) => None,
            (BodyPolicy::Json, Some(value)) => Some(
                serde_json::to_vec(value).map_err(|e| ApiError::Serialization(e.to_string()))?,
            ),
            (BodyPolicy::Json, None) => Some(Vec::new()),
        };

        let mut headers = Vec::with_capacity(2);
        if let Some((key, value)) = self.config.auth_header() {
            headers.push((key.to_string(), value.to_string()));
        }
        headers.push((CONTENT_TYPE.to_string(), APPLICATION_JSON.to_string()));

        let uri = format!("{}{}", self.config.base_domain, spec.endpoint);
        debug!(method = %spec.method, %uri, body_len = body.as_ref().map_or(0, Vec::len), "built request");

        Ok(HttpRequest {
            method: spec.method,
            uri,
            headers,
            body,
        })
    }

    /// Split a response into a positive `ResponseResult` or an `Http` error.
    pub fn classify(&self, response: HttpResponse) -> Result<ResponseResult> {
        let status_name = self.statuses.name_of(response.status).into_owned();
        if !self.statuses.is_positive(response.status) {
            warn!(status = response.status, %status_name, "negative response");
            return Err(ApiError::Http {
                status: response.status,
                status_name,
                body: response.body,
            });
        }
        Ok(ResponseResult {
            status_code: response.status,
            status_name,
            body_text: response.body,
        })
    }
}

impl std::fmt::Debug for RequestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestClient")
            .field("config", &self.config)
            .field("methods", &self.methods)
            .field("statuses", &self.statuses)
            .finish_non_exhaustive()
    }
}
