//! Per-call request description and the delivered result.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, Result};
use crate::http::HttpMethod;

/// What to send. Built per call and consumed by `RequestClient::send`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestSpec {
    /// Appended verbatim to the client's base domain.
    pub endpoint: String,
    pub method: HttpMethod,
    pub body: Option<Value>,
}

impl RequestSpec {
    pub fn new(endpoint: impl Into<String>, method: HttpMethod) -> Self {
        Self {
            endpoint: endpoint.into(),
            method,
            body: None,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(endpoint, HttpMethod::Get)
    }

    pub fn post<T: Serialize>(endpoint: impl Into<String>, body: &T) -> Result<Self> {
        Self::new(endpoint, HttpMethod::Post).with_json(body)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_json<T: Serialize>(self, body: &T) -> Result<Self> {
        let value = serde_json::to_value(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(self.with_body(value))
    }
}

/// A positive response, handed to the completion handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseResult {
    pub status_code: u16,
    pub status_name: String,
    pub body_text: String,
}

impl ResponseResult {
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_str(&self.body_text).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Serialize)]
    struct NewUser<'a> {
        name: &'a str,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct User {
        name: String,
    }

    #[test]
    fn post_captures_serialized_body() {
        let spec = RequestSpec::post("/users", &NewUser { name: "a" }).unwrap();
        assert_eq!(spec.method, HttpMethod::Post);
        assert_eq!(spec.body, Some(json!({ "name": "a" })));
    }

    #[test]
    fn get_has_no_body() {
        let spec = RequestSpec::get("/users");
        assert_eq!(spec.method, HttpMethod::Get);
        assert!(spec.body.is_none());
    }

    #[test]
    fn default_method_is_get() {
        assert_eq!(RequestSpec::default().method, HttpMethod::Get);
    }

    #[test]
    fn result_body_decodes() {
        let result = ResponseResult {
            status_code: 200,
            status_name: "Ok".to_string(),
            body_text: r#"[{"name":"a"}]"#.to_string(),
        };
        let users: Vec<User> = result.json().unwrap();
        assert_eq!(users, vec![User { name: "a".to_string() }]);
    }

    #[test]
    fn result_bad_json() {
        let result = ResponseResult {
            status_code: 200,
            status_name: "Ok".to_string(),
            body_text: "not json".to_string(),
        };
        let err = result.json::<Vec<User>>().unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
