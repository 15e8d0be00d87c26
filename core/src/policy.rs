//! Injectable method and status tables.
//!
//! `MethodTable` is the allowlist of methods the client will send and how
//! each treats the request body. `StatusTable` names status codes for
//! diagnostics and holds the set of positive codes.

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};

use crate::http::HttpMethod;

/// How a method carries the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyPolicy {
    /// Never serialize or attach a body, even if one was supplied.
    Empty,
    /// Serialize the body to UTF-8 JSON and attach it.
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodTable {
    policies: HashMap<HttpMethod, BodyPolicy>,
}

impl MethodTable {
    /// An empty allowlist; every method is rejected until allowed.
    pub fn empty() -> Self {
        Self {
            policies: HashMap::new(),
        }
    }

    /// Only GET (no body) and POST (JSON body).
    pub fn get_post_only() -> Self {
        Self::empty()
            .allow(HttpMethod::Get, BodyPolicy::Empty)
            .allow(HttpMethod::Post, BodyPolicy::Json)
    }

    pub fn allow(mut self, method: HttpMethod, policy: BodyPolicy) -> Self {
        self.policies.insert(method, policy);
        self
    }

    pub fn deny(mut self, method: HttpMethod) -> Self {
        self.policies.remove(&method);
        self
    }

    /// `None` means the method is not allowed.
    pub fn policy(&self, method: HttpMethod) -> Option<BodyPolicy> {
        self.policies.get(&method).copied()
    }
}

impl Default for MethodTable {
    fn default() -> Self {
        Self::get_post_only()
            .allow(HttpMethod::Head, BodyPolicy::Empty)
            .allow(HttpMethod::Delete, BodyPolicy::Empty)
            .allow(HttpMethod::Options, BodyPolicy::Empty)
            .allow(HttpMethod::Put, BodyPolicy::Json)
            .allow(HttpMethod::Patch, BodyPolicy::Json)
    }
}

/// Status code names for diagnostics, plus which codes count as positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusTable {
    names: HashMap<u16, String>,
    positive: HashSet<u16>,
}

impl StatusTable {
    /// No names, positive codes 200, 201 and 202.
    pub fn empty() -> Self {
        Self {
            names: HashMap::new(),
            positive: HashSet::from([200, 201, 202]),
        }
    }

    /// Replace the positive set. Every code outside it is negative.
    pub fn with_positive_codes(mut self, codes: impl IntoIterator<Item = u16>) -> Self {
        self.positive = codes.into_iter().collect();
        self
    }

    pub fn with_name(mut self, code: u16, name: impl Into<String>) -> Self {
        self.names.insert(code, name.into());
        self
    }

    /// By default only 200, 201 and 202; 204 is negative.
    pub fn is_positive(&self, code: u16) -> bool {
        self.positive.contains(&code)
    }

    pub fn name_of(&self, code: u16) -> Cow<'_, str> {
        match self.names.get(&code) {
            Some(name) => Cow::Borrowed(name.as_str()),
            None => Cow::Owned(format!("Unexpected (code {code})")),
        }
    }
}

impl Default for StatusTable {
    fn default() -> Self {
        Self::empty()
            .with_name(200, "Ok")
            .with_name(201, "Created")
            .with_name(202, "Accepted")
            .with_name(204, "No Content")
            .with_name(400, "Bad Request")
            .with_name(401, "Unauthorized")
            .with_name(404, "Not Found")
            .with_name(500, "Internal Server Error")
            .with_name(501, "Not Implemented")
    }
}
