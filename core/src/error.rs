//! Error types for the request client.
//!
//! # Design
//! A call either yields one `ResponseResult` or one `ApiError`. Nothing is
//! retried internally; the variant tells the caller where the call stopped:
//! before the network (`UnsupportedMethod`, `Serialization`), in the
//! transport (`Transport`), or after a negative response (`Http`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// The method is not in the client's allowlist. No request was sent.
    #[error("{method} not supported; allow it in the client's method table to send it")]
    UnsupportedMethod { method: String },

    /// No response was obtained from the server.
    #[error("transport failed: {0}")]
    Transport(String),

    /// A response arrived but its status was classified negative.
    #[error("web request returned negative response: {status} {status_name} '{body}'")]
    Http {
        status: u16,
        status_name: String,
        body: String,
    },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// Client configuration could not be read or parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ApiError>;
