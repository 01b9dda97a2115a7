//! Default `reqwest` transport and the shared process-wide instance.

use std::env;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use serde_json::{Map, Value};
use url::Url;

use crate::error::{HeraldError, Result};
use crate::transport::{Method, Request, Transport};

const DEFAULT_BASE_URL: &str = "https://api.global-services.global.alertlogic.com";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_USER_AGENT: &str = concat!("herald-sdk/", env!("CARGO_PKG_VERSION"));
const ENV_BASE_URL: &str = "HERALD_API_URL";
const ENV_TOKEN: &str = "HERALD_API_TOKEN";
const ENV_TIMEOUT: &str = "HERALD_TIMEOUT_SECS";

/// Longest response body excerpt written to logs.
const MAX_LOG_BODY_LENGTH: usize = 200;

static DEFAULT_TRANSPORT: OnceLock<Arc<dyn Transport>> = OnceLock::new();

/// Shared transport used by clients built without one.
///
/// Created from the environment (see [`HttpTransport::from_env`]) on first
/// use, unless one was installed with [`set_default_transport`]. Every call
/// returns the same instance.
pub fn default_transport() -> Result<Arc<dyn Transport>> {
    if let Some(transport) = DEFAULT_TRANSPORT.get() {
        return Ok(transport.clone());
    }

    let transport: Arc<dyn Transport> = Arc::new(HttpTransport::from_env()?);
    Ok(DEFAULT_TRANSPORT.get_or_init(|| transport).clone())
}

/// Install the shared default transport.
///
/// Fails if the default was already installed or initialized.
pub fn set_default_transport(transport: Arc<dyn Transport>) -> Result<()> {
    DEFAULT_TRANSPORT
        .set(transport)
        .map_err(|_| HeraldError::config("default transport is already initialized"))
}

/// Builder for an [`HttpTransport`] with custom options.
#[derive(Debug, Clone)]
pub struct HttpTransportBuilder {
    base_url: String,
    token: Option<String>,
    timeout: Duration,
    user_agent: String,
}

impl Default for HttpTransportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpTransportBuilder {
    /// Create a builder pointing at the default API endpoint.
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            token: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    /// Set the API base URL.
    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the bearer token sent with every request.
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Build the transport.
    pub fn build(self) -> Result<HttpTransport> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        Url::parse(&base_url)?;

        let http_client = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(self.user_agent)
            .build()
            .map_err(|e| HeraldError::connection(e.to_string()))?;

        Ok(HttpTransport {
            base_url,
            token: self.token,
            http_client,
        })
    }
}

/// [`Transport`] implementation over `reqwest`.
#[derive(Clone)]
pub struct HttpTransport {
    base_url: String,
    token: Option<String>,
    http_client: HttpClient,
}

impl HttpTransport {
    /// Create a new builder.
    pub fn builder() -> HttpTransportBuilder {
        HttpTransportBuilder::new()
    }

    /// Create a transport from environment variables.
    ///
    /// Reads `HERALD_API_URL`, `HERALD_API_TOKEN` and `HERALD_TIMEOUT_SECS`;
    /// all are optional.
    pub fn from_env() -> Result<Self> {
        let mut builder = HttpTransportBuilder::new();

        if let Ok(base_url) = env::var(ENV_BASE_URL) {
            builder = builder.base_url(base_url);
        }
        if let Ok(token) = env::var(ENV_TOKEN) {
            builder = builder.token(token);
        }
        if let Ok(timeout) = env::var(ENV_TIMEOUT) {
            let secs = timeout.parse::<u64>().map_err(|_| {
                HeraldError::config(format!("{} must be a number of seconds", ENV_TIMEOUT))
            })?;
            builder = builder.timeout(Duration::from_secs(secs));
        }

        builder.build()
    }

    /// Get the configured base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url_for(&self, request: &Request) -> Result<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, request.route()))?)
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn request(&self, method: Method, request: Request) -> Result<Value> {
        let url = self.url_for(&request)?;
        tracing::debug!(%method, %url, "herald request");

        let mut builder = match method {
            Method::Get => self.http_client.get(url),
            Method::Post => self.http_client.post(url),
            Method::Put => self.http_client.put(url),
            Method::Delete => self.http_client.delete(url),
        };

        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        if let Some(params) = &request.params {
            builder = builder.query(&query_pairs(params));
        }
        if let Some(data) = &request.data {
            builder = builder.json(data);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::warn!(
                %method,
                status = status.as_u16(),
                body = %truncate_for_log(&body),
                "herald request failed"
            );
            return Err(match status.as_u16() {
                401 | 403 => HeraldError::auth(body),
                code => HeraldError::api(code, body),
            });
        }

        if body.trim().is_empty() {
            return Ok(match method {
                Method::Delete => Value::from(status.as_u16()),
                _ => Value::Null,
            });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

/// Flatten a query object into key/value pairs.
///
/// Strings are sent verbatim, other scalars as their JSON text, arrays as a
/// repeated key. Nulls are dropped.
fn query_pairs(params: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        pairs.push((key.clone(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

fn truncate_for_log(body: &str) -> String {
    if body.chars().count() > MAX_LOG_BODY_LENGTH {
        let head: String = body.chars().take(MAX_LOG_BODY_LENGTH).collect();
        format!("{}... [truncated, {} bytes total]", head, body.len())
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn query_pairs_flattens_values() {
        let params = json!({
            "limit": 25,
            "status": "sent",
            "feature": ["incidents", "search"],
            "skip": null,
            "archived": false
        });
        let pairs = query_pairs(params.as_object().unwrap());

        assert!(pairs.contains(&("limit".to_string(), "25".to_string())));
        assert!(pairs.contains(&("status".to_string(), "sent".to_string())));
        assert!(pairs.contains(&("feature".to_string(), "incidents".to_string())));
        assert!(pairs.contains(&("feature".to_string(), "search".to_string())));
        assert!(pairs.contains(&("archived".to_string(), "false".to_string())));
        assert!(!pairs.iter().any(|(k, _)| k == "skip"));
        assert_eq!(pairs.len(), 5);
    }

    #[test]
    fn builder_trims_trailing_slash() {
        let transport = HttpTransport::builder()
            .base_url("http://localhost:8080/")
            .build()
            .unwrap();
        assert_eq!(transport.base_url(), "http://localhost:8080");
    }

    #[test]
    fn builder_rejects_invalid_url() {
        let result = HttpTransport::builder().base_url("not a url").build();
        assert!(matches!(result, Err(HeraldError::Url(_))));
    }

    #[test]
    fn url_includes_account_scope() {
        let transport = HttpTransport::builder()
            .base_url("http://localhost:8080")
            .build()
            .unwrap();
        let request = Request::new("herald", "v1", "/integrations").account("2");
        let url = transport.url_for(&request).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/herald/v1/2/integrations");
    }

    #[test]
    fn long_bodies_are_truncated_for_logs() {
        let body = "x".repeat(500);
        let logged = truncate_for_log(&body);
        assert!(logged.starts_with(&"x".repeat(MAX_LOG_BODY_LENGTH)));
        assert!(logged.ends_with("[truncated, 500 bytes total]"));
        assert_eq!(truncate_for_log("short"), "short");
    }
}
