use async_trait::async_trait;

pub use reqwest::Method;

use crate::error::MailupError;

impl std::fmt::Debug for dyn HttpTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpTransport").finish()
    }
}

/// An outgoing HTTP request with a fully encoded body.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.push((name.to_string(), value.into()));
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Look up a header value, case-insensitively.
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    /// Deserialize the body as JSON.
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, MailupError> {
        serde_json::from_str(&self.body)
            .map_err(|e| MailupError::DecodeError(format!("Failed to decode response body: {e}")))
    }
}

/// The wire underneath a [`crate::RequestContext`].
///
/// Implementations only move bytes: status handling, authentication and
/// decoding all happen in the context and the resource bindings.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send a request and return whatever the server answered, whatever the status.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, MailupError>;
}
