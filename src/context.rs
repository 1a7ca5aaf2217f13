use std::path::{Path, PathBuf};
use std::sync::Arc;

use reqwest::Url;

use crate::auth::{basic_auth_header, Grant, HeldToken, Token, TokenCache, TokenStatus};
use crate::config::ContextOptions;
use crate::error::MailupError;
use crate::transport::{HttpRequest, HttpResponse, HttpTransport, Method};
use crate::transports::ReqwestTransport;

pub const AUTH_TOKEN_URI: &str = "https://services.mailup.com/Authorization/OAuth/Token";
pub const BASE_URI: &str = "https://services.mailup.com/API/v1.1/Rest";
pub const HTTP_AUTH_TOKEN_URI: &str = "http://services.mailup.com/Authorization/OAuth/Token";
pub const HTTP_BASE_URI: &str = "http://services.mailup.com/API/v1.1/Rest";

/// Authorization endpoint and API base a context talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub auth_uri: String,
    pub base_uri: String,
}

impl Endpoints {
    pub fn https() -> Self {
        Self {
            auth_uri: AUTH_TOKEN_URI.to_string(),
            base_uri: BASE_URI.to_string(),
        }
    }

    pub fn http() -> Self {
        Self {
            auth_uri: HTTP_AUTH_TOKEN_URI.to_string(),
            base_uri: HTTP_BASE_URI.to_string(),
        }
    }
}

/// Authenticated session against the MailUp API.
///
/// The context owns the OAuth token and makes sure every API call carries a
/// non-expired bearer token: it reuses a cached token when one is on disk,
/// runs a password grant when it has no valid token, and a refresh grant
/// when the token is about to expire. At most one grant is issued per call.
///
/// Calls take `&mut self`; wrap the context in a mutex to share it between
/// tasks.
pub struct RequestContext {
    token: HeldToken,
    transport: Arc<dyn HttpTransport>,
    client_id: String,
    client_secret: String,
    username: String,
    password: String,
    cache: Option<TokenCache>,
    endpoints: Endpoints,
}

impl std::fmt::Debug for RequestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestContext")
            .field("token", &self.token.status())
            .field("client_id", &self.client_id)
            .field("username", &self.username)
            .field("cache", &self.cache)
            .field("endpoints", &self.endpoints)
            .finish_non_exhaustive()
    }
}

impl RequestContext {
    /// Create a context using the default `reqwest` transport.
    pub fn new(options: ContextOptions) -> Result<Self, MailupError> {
        let transport = ReqwestTransport::new()?;
        Self::with_transport(options, Arc::new(transport))
    }

    /// Create a context on top of a custom transport.
    pub fn with_transport(
        options: ContextOptions,
        transport: Arc<dyn HttpTransport>,
    ) -> Result<Self, MailupError> {
        options.validate()?;
        let endpoints = options.resolved_endpoints();

        let mut context = Self {
            token: HeldToken::Missing,
            transport,
            client_id: options.client_id,
            client_secret: options.client_secret,
            username: options.username,
            password: options.password,
            cache: None,
            endpoints,
        };
        context.set_cache_dir(options.cache_dir);
        Ok(context)
    }

    /// Set (or with `None`, disable) the token cache directory.
    ///
    /// A usable token found in the directory replaces the held one; anything
    /// else leaves the held token as it was.
    pub fn set_cache_dir(&mut self, dir: Option<PathBuf>) {
        self.cache = dir.map(TokenCache::new);
        if let Some(token) = self.cache.as_ref().and_then(TokenCache::load) {
            self.token = HeldToken::Issued(token);
        }
    }

    pub fn cache_dir(&self) -> Option<&Path> {
        self.cache.as_ref().map(TokenCache::dir)
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    pub fn token_status(&self) -> TokenStatus {
        self.token.status()
    }

    /// Perform an authenticated API call and return the 200 response.
    ///
    /// `path` is relative to the API base. Any other status is returned as
    /// [`MailupError::InvalidResponse`]; nothing is retried.
    pub async fn request(
        &mut self,
        path: &str,
        method: Method,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, MailupError> {
        self.request_with_query(path, &[], method, body).await
    }

    /// [`RequestContext::request`] with `query` appended to the URL.
    pub async fn request_with_query(
        &mut self,
        path: &str,
        query: &[(&str, &str)],
        method: Method,
        body: Option<serde_json::Value>,
    ) -> Result<HttpResponse, MailupError> {
        let mut url = Url::parse(&format!("{}{}", self.endpoints.base_uri, path)).map_err(|e| {
            MailupError::InvalidArgument(format!("invalid URL for {path}: {e}"))
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        self.ensure_valid_token().await?;

        let mut request = HttpRequest::new(method, url.as_str())
            .header("Content-Type", "application/json")
            .header(
                "Authorization",
                format!("Bearer {}", self.token.access_token()),
            );
        if let Some(body) = body {
            request = request.body(body.to_string());
        }

        let response = self.transport.send(request).await?;
        if response.status != 200 {
            return Err(MailupError::invalid_response(
                response,
                &format!("requesting {path}"),
            ));
        }
        Ok(response)
    }

    /// Make sure the held token is valid, running a password or refresh
    /// grant if needed. On failure the held token is left untouched.
    pub async fn ensure_valid_token(&mut self) -> Result<(), MailupError> {
        if self.token.is_valid() && !self.token.should_be_refreshed() {
            return Ok(());
        }

        let token = if !self.token.is_valid() {
            tracing::debug!(username = %self.username, "requesting access token with password grant");
            self.request_token(Grant::Password {
                username: &self.username,
                password: &self.password,
            })
            .await?
        } else {
            tracing::debug!("access token close to expiry, using refresh grant");
            self.request_token(Grant::RefreshToken(self.token.refresh_token()))
                .await?
        };

        tracing::info!(valid_until = %token.valid_until(), "obtained access token");
        self.save_token(&token);
        self.token = HeldToken::Issued(token);
        Ok(())
    }

    async fn request_token(&self, grant: Grant<'_>) -> Result<Token, MailupError> {
        let request = HttpRequest::new(Method::POST, self.endpoints.auth_uri.as_str())
            .header("Content-Type", "application/x-www-form-urlencoded")
            .header(
                "Authorization",
                basic_auth_header(&self.client_id, &self.client_secret),
            )
            .body(grant.form_body(&self.client_id, &self.client_secret)?);

        let response = self.transport.send(request).await?;
        if response.status != 200 {
            return Err(MailupError::invalid_response(
                response,
                "requesting an access token",
            ));
        }
        Token::from_response(&response)
    }

    fn save_token(&self, token: &Token) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(e) = cache.save(token) {
            tracing::warn!(path = %cache.path().display(), "failed to cache access token: {e}");
        }
    }
}
