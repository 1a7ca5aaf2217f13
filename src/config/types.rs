use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::context::Endpoints;
use crate::error::MailupError;

/// Options recognized when building a [`crate::RequestContext`].
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextOptions {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    /// Directory holding `access_token.json`. `None` disables caching.
    #[serde(default)]
    pub cache_dir: Option<PathBuf>,
    #[serde(default = "default_use_https")]
    pub use_https: bool,
    /// Overrides the authorization endpoint picked by `use_https`.
    #[serde(default)]
    pub auth_uri: Option<String>,
    /// Overrides the API base picked by `use_https`.
    #[serde(default)]
    pub base_uri: Option<String>,
}

fn default_use_https() -> bool {
    true
}

impl Default for ContextOptions {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: String::new(),
            username: String::new(),
            password: String::new(),
            cache_dir: None,
            use_https: true,
            auth_uri: None,
            base_uri: None,
        }
    }
}

impl std::fmt::Debug for ContextOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextOptions")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[REDACTED]")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .field("cache_dir", &self.cache_dir)
            .field("use_https", &self.use_https)
            .field("auth_uri", &self.auth_uri)
            .field("base_uri", &self.base_uri)
            .finish()
    }
}

impl ContextOptions {
    pub fn new(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            username: username.into(),
            password: password.into(),
            ..Self::default()
        }
    }

    pub fn cache_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = Some(dir.into());
        self
    }

    pub fn use_https(mut self, use_https: bool) -> Self {
        self.use_https = use_https;
        self
    }

    /// Point both endpoints somewhere else, e.g. a staging host.
    pub fn endpoints(mut self, auth_uri: impl Into<String>, base_uri: impl Into<String>) -> Self {
        self.auth_uri = Some(auth_uri.into());
        self.base_uri = Some(base_uri.into());
        self
    }

    /// Check that every required credential is present.
    pub fn validate(&self) -> Result<(), MailupError> {
        let required = [
            ("client_id", &self.client_id),
            ("client_secret", &self.client_secret),
            ("username", &self.username),
            ("password", &self.password),
        ];
        for (name, value) in required {
            if value.is_empty() {
                return Err(MailupError::MissingOption(name));
            }
        }
        Ok(())
    }

    /// Resolve the auth and API endpoints these options select.
    pub fn resolved_endpoints(&self) -> Endpoints {
        let defaults = if self.use_https {
            Endpoints::https()
        } else {
            Endpoints::http()
        };
        Endpoints {
            auth_uri: self.auth_uri.clone().unwrap_or(defaults.auth_uri),
            base_uri: self.base_uri.clone().unwrap_or(defaults.base_uri),
        }
    }
}
