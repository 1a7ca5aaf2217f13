use base64::Engine;
use serde::Serialize;

use crate::error::MailupError;

/// OAuth2 grant sent to the authorization endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Grant<'a> {
    Password { username: &'a str, password: &'a str },
    RefreshToken(&'a str),
}

impl Grant<'_> {
    pub fn grant_type(&self) -> &'static str {
        match self {
            Grant::Password { .. } => "password",
            Grant::RefreshToken(_) => "refresh_token",
        }
    }

    /// Form-encoded request body for this grant.
    pub fn form_body(&self, client_id: &str, client_secret: &str) -> Result<String, MailupError> {
        let (username, password, refresh_token) = match self {
            Grant::Password { username, password } => (Some(*username), Some(*password), None),
            Grant::RefreshToken(refresh) => (None, None, Some(*refresh)),
        };
        let form = GrantForm {
            grant_type: self.grant_type(),
            client_id,
            client_secret,
            username,
            password,
            refresh_token,
        };
        serde_urlencoded::to_string(&form)
            .map_err(|e| MailupError::DecodeError(format!("Failed to encode grant: {e}")))
    }
}

#[derive(Serialize)]
struct GrantForm<'a> {
    grant_type: &'a str,
    client_id: &'a str,
    client_secret: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    username: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    password: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    refresh_token: Option<&'a str>,
}

/// `Authorization` header value carrying the client credentials.
pub fn basic_auth_header(client_id: &str, client_secret: &str) -> String {
    let encoded =
        base64::engine::general_purpose::STANDARD.encode(format!("{client_id}:{client_secret}"));
    format!("Basic {encoded}")
}
