//! JSON request client with a static auth header.
//!
//! # Overview
//! `RequestClient` turns a `RequestSpec` (endpoint, method, optional JSON
//! body) into a request against a fixed base domain, sends it through a
//! `Transport`, and classifies the status: 200, 201 and 202 are positive and
//! are handed to the caller's completion handler, everything else is an
//! error.
//!
//! # Design
//! - The client is stateless per call; configuration and tables are shared
//!   read-only, so one client can serve many concurrent tasks.
//! - Method allowlist and status names are injectable tables
//!   (`MethodTable`, `StatusTable`).
//! - Building and classifying are pure, so hosts that do their own I/O
//!   (see the `webapi-ffi` crate) reuse them without a transport.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod policy;
pub mod transport;
pub mod types;

pub use client::RequestClient;
pub use config::ClientConfig;
pub use error::{ApiError, Result};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use policy::{BodyPolicy, MethodTable, StatusTable};
pub use transport::{DetachedTransport, Transport, UreqTransport};
pub use types::{RequestSpec, ResponseResult};
