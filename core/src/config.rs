//! Client configuration.
//!
//! Set once when the client is built and only read afterwards. Can be
//! written in code or loaded from TOML:
//!
//! ```toml
//! base_domain = "https://api.example.com"
//! use_auth_header = true
//! auth_header_key = "x-api-key"
//! auth_header_value = "secret"
//! ```

use std::fmt;
use std::path::Path;

use serde::Deserialize;

use crate::error::{ApiError, Result};

#[derive(Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ClientConfig {
    /// Prefix for every endpoint. Concatenated as-is, so it must agree with
    /// the endpoints on where the `/` goes.
    pub base_domain: String,
    pub use_auth_header: bool,
    pub auth_header_key: String,
    pub auth_header_value: String,
}

impl ClientConfig {
    pub fn new(base_domain: impl Into<String>) -> Self {
        Self {
            base_domain: base_domain.into(),
            ..Self::default()
        }
    }

    /// Enable the static auth header sent with every request.
    pub fn with_auth_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.use_auth_header = true;
        self.auth_header_key = key.into();
        self.auth_header_value = value.into();
        self
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        let config: ClientConfig =
            toml::from_str(contents).map_err(|e| ApiError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ApiError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    /// The auth header pair, if enabled.
    pub fn auth_header(&self) -> Option<(&str, &str)> {
        self.use_auth_header
            .then(|| (self.auth_header_key.as_str(), self.auth_header_value.as_str()))
    }

    /// An enabled auth header needs a name.
    pub fn validate(&self) -> Result<()> {
        if self.use_auth_header && self.auth_header_key.is_empty() {
            return Err(ApiError::Config(
                "use_auth_header is set but auth_header_key is empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_domain", &self.base_domain)
            .field("use_auth_header", &self.use_auth_header)
            .field("auth_header_key", &self.auth_header_key)
            .field("auth_header_value", &"<redacted>")
            .finish()
    }
}
