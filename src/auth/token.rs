use chrono::{DateTime, Duration, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

use crate::error::MailupError;
use crate::transport::HttpResponse;

/// A token is usable while its expiry is more than this far away.
pub const VALIDITY_MARGIN_SECS: i64 = 30;

/// A token is renewed proactively once its expiry is closer than this.
pub const REFRESH_WINDOW_SECS: i64 = 180;

/// OAuth access/refresh token pair.
///
/// Serializes to the cache file schema:
/// `{"accessToken": .., "validUntil": <epoch seconds>, "refreshToken": ..}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Token {
    access_token: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    valid_until: DateTime<Utc>,
    refresh_token: String,
}

/// Raw token response from the authorization endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    refresh_token: String,
}

impl Token {
    pub fn new(
        access_token: impl Into<String>,
        valid_until: DateTime<Utc>,
        refresh_token: impl Into<String>,
    ) -> Self {
        Self {
            access_token: access_token.into(),
            valid_until: valid_until.trunc_subsecs(0),
            refresh_token: refresh_token.into(),
        }
    }

    /// Parse a cached token, rejecting malformed or no longer valid ones.
    pub fn from_json(json: &str) -> Result<Self, MailupError> {
        let token: Token = serde_json::from_str(json)
            .map_err(|e| MailupError::InvalidToken(format!("malformed token JSON: {e}")))?;
        if !token.is_valid() {
            return Err(MailupError::InvalidToken(format!(
                "token expired at {}",
                token.valid_until
            )));
        }
        Ok(token)
    }

    /// Build a token from a successful authorization endpoint response.
    ///
    /// A lifetime that does not outlast the validity margin is rejected.
    pub fn from_response(response: &HttpResponse) -> Result<Self, MailupError> {
        let raw: TokenResponse = serde_json::from_str(&response.body)
            .map_err(|e| MailupError::InvalidToken(format!("invalid token response: {e}")))?;
        let valid_until = Duration::try_seconds(raw.expires_in)
            .and_then(|lifetime| Utc::now().checked_add_signed(lifetime))
            .ok_or_else(|| {
                MailupError::InvalidToken(format!("expires_in out of range: {}", raw.expires_in))
            })?;

        let token = Self::new(raw.access_token, valid_until, raw.refresh_token);
        if !token.is_valid() {
            return Err(MailupError::InvalidToken(format!(
                "issued token expires in {}s",
                raw.expires_in
            )));
        }
        Ok(token)
    }

    pub fn to_json(&self) -> Result<String, MailupError> {
        serde_json::to_string(self)
            .map_err(|e| MailupError::InvalidToken(format!("failed to serialize token: {e}")))
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    pub fn refresh_token(&self) -> &str {
        &self.refresh_token
    }

    pub fn valid_until(&self) -> DateTime<Utc> {
        self.valid_until
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid_at(Utc::now())
    }

    pub fn should_be_refreshed(&self) -> bool {
        self.should_be_refreshed_at(Utc::now())
    }

    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until > now + Duration::seconds(VALIDITY_MARGIN_SECS)
    }

    pub fn should_be_refreshed_at(&self, now: DateTime<Utc>) -> bool {
        self.valid_until < now + Duration::seconds(REFRESH_WINDOW_SECS)
    }
}

/// The token slot of a request context: nothing yet, or an issued pair.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HeldToken {
    #[default]
    Missing,
    Issued(Token),
}

impl HeldToken {
    pub fn is_valid(&self) -> bool {
        match self {
            HeldToken::Missing => false,
            HeldToken::Issued(token) => token.is_valid(),
        }
    }

    pub fn should_be_refreshed(&self) -> bool {
        match self {
            HeldToken::Missing => true,
            HeldToken::Issued(token) => token.should_be_refreshed(),
        }
    }

    /// Access token of the issued pair.
    ///
    /// # Panics
    ///
    /// When no token has been issued. The context always authenticates
    /// before reading it.
    pub fn access_token(&self) -> &str {
        match self {
            HeldToken::Issued(token) => token.access_token(),
            HeldToken::Missing => unreachable!("access token read before authentication"),
        }
    }

    /// Refresh token of the issued pair.
    ///
    /// # Panics
    ///
    /// When no token has been issued.
    pub fn refresh_token(&self) -> &str {
        match self {
            HeldToken::Issued(token) => token.refresh_token(),
            HeldToken::Missing => unreachable!("refresh token read before authentication"),
        }
    }

    pub fn status(&self) -> TokenStatus {
        match self {
            HeldToken::Missing => TokenStatus::Missing,
            HeldToken::Issued(token) if !token.is_valid() => TokenStatus::Expired,
            HeldToken::Issued(token) if token.should_be_refreshed() => TokenStatus::RefreshDue,
            HeldToken::Issued(_) => TokenStatus::Fresh,
        }
    }
}

/// Summary of the held token, without exposing its secrets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenStatus {
    Missing,
    Fresh,
    RefreshDue,
    Expired,
}
