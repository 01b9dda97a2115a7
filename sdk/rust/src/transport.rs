//! Transport contract used by the Herald client.

use std::fmt;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::Result;

/// HTTP verb of a transport request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    /// Upper-case verb name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Description of a single request against a versioned service.
///
/// The transport owns turning this into a URL: the service name and version
/// form the base route, `account_id` (when set) scopes it to an account, and
/// `path` is appended verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub service_name: String,
    pub version: String,
    pub account_id: Option<String>,
    pub path: String,
    /// Query parameters, passed through unmodified.
    pub params: Option<Map<String, Value>>,
    /// JSON request body.
    pub data: Option<Value>,
}

impl Request {
    /// Create a request for `path` on the given service.
    pub fn new(
        service_name: impl Into<String>,
        version: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            service_name: service_name.into(),
            version: version.into(),
            account_id: None,
            path: path.into(),
            params: None,
            data: None,
        }
    }

    /// Scope the request to an account.
    pub fn account(mut self, account_id: impl Into<String>) -> Self {
        self.account_id = Some(account_id.into());
        self
    }

    /// Attach query parameters.
    pub fn params(mut self, params: Map<String, Value>) -> Self {
        self.params = Some(params);
        self
    }

    /// Attach a JSON body.
    pub fn data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Route relative to the host: `/{service}/{version}[/{account}]{path}`.
    pub fn route(&self) -> String {
        match &self.account_id {
            Some(account) => format!(
                "/{}/{}/{}{}",
                self.service_name, self.version, account, self.path
            ),
            None => format!("/{}/{}{}", self.service_name, self.version, self.path),
        }
    }
}

/// Something that can execute Herald requests.
///
/// Implementors own base-URL resolution, authentication, timeouts and status
/// interpretation. Only [`Transport::request`] is required; the verb helpers
/// forward to it.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Execute `request` with `method` and return the decoded response body.
    async fn request(&self, method: Method, request: Request) -> Result<Value>;

    async fn get(&self, request: Request) -> Result<Value> {
        self.request(Method::Get, request).await
    }

    async fn post(&self, request: Request) -> Result<Value> {
        self.request(Method::Post, request).await
    }

    async fn put(&self, request: Request) -> Result<Value> {
        self.request(Method::Put, request).await
    }

    async fn delete(&self, request: Request) -> Result<Value> {
        self.request(Method::Delete, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_without_account() {
        let request = Request::new("herald", "v1", "/subscription_keys");
        assert_eq!(request.route(), "/herald/v1/subscription_keys");
    }

    #[test]
    fn route_with_account() {
        let request = Request::new("herald", "v1", "/subscriptions/incidents").account("12345678");
        assert_eq!(request.route(), "/herald/v1/12345678/subscriptions/incidents");
    }

    #[test]
    fn method_display() {
        assert_eq!(Method::Delete.to_string(), "DELETE");
        assert_eq!(Method::Get.as_str(), "GET");
    }
}
