//! Error types for the Herald SDK.

use thiserror::Error;

/// Result type alias using HeraldError.
pub type Result<T> = std::result::Result<T, HeraldError>;

/// Errors that can occur when talking to Herald.
///
/// The client itself never produces a new kind of error: everything here is
/// raised by the transport, or by decoding a response into its declared type.
#[derive(Error, Debug)]
pub enum HeraldError {
    /// Authentication error (rejected or missing credentials).
    #[error("authentication error: {0}")]
    Auth(String),

    /// API error with HTTP status code.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Connection error raised by a transport.
    #[error("connection error: {0}")]
    Connection(String),

    /// Invalid transport configuration.
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl HeraldError {
    /// Create an authentication error.
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create an API error with status code.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// HTTP status code carried by the error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_status() {
        let err = HeraldError::api(404, "no such integration");
        assert_eq!(err.to_string(), "API error (404): no such integration");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn non_http_errors_have_no_status() {
        assert_eq!(HeraldError::connection("reset").status(), None);
        assert_eq!(HeraldError::auth("bad token").status(), None);
    }
}
