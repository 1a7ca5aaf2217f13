use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use crate::error::MailupError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport};

/// [`HttpTransport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Result<Self, MailupError> {
        Self::build(None)
    }

    /// Create a transport whose requests fail once `timeout` elapses.
    pub fn with_timeout(timeout: Duration) -> Result<Self, MailupError> {
        Self::build(Some(timeout))
    }

    /// Wrap an already configured client (proxies, TLS settings, ...).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    fn build(timeout: Option<Duration>) -> Result<Self, MailupError> {
        let mut header_map = HeaderMap::new();
        header_map.insert(
            reqwest::header::ACCEPT,
            HeaderValue::from_static("application/json"),
        );

        let mut builder = reqwest::Client::builder().default_headers(header_map);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| MailupError::TransportError(Box::new(e)))?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, MailupError> {
        let mut headers = HeaderMap::new();
        for (key, value) in &request.headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|e| {
                MailupError::TransportError(format!("Invalid header name '{key}': {e}").into())
            })?;
            let val = HeaderValue::from_str(value).map_err(|e| {
                MailupError::TransportError(format!("Invalid header value for '{key}': {e}").into())
            })?;
            headers.insert(name, val);
        }

        let mut http_req = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(headers);
        if let Some(body) = request.body {
            http_req = http_req.body(body);
        }

        tracing::trace!(method = %request.method, url = %request.url, "sending request");
        let response = http_req
            .send()
            .await
            .map_err(|e| MailupError::TransportError(Box::new(e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| MailupError::TransportError(Box::new(e)))?;

        Ok(HttpResponse { status, body })
    }
}
