use std::path::PathBuf;

use crate::transport::HttpResponse;

#[derive(Debug, thiserror::Error)]
pub enum MailupError {
    /// Non-200 answer from either the auth endpoint or the API.
    #[error("{message}")]
    InvalidResponse {
        response: HttpResponse,
        message: String,
    },

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Cannot delete: {0}")]
    CannotDelete(String),

    #[error("Missing required option '{0}'")]
    MissingOption(&'static str),

    #[error("Error in config {}: {detail}", path.display())]
    ConfigError { path: PathBuf, detail: String },

    #[error("Transport error: {0}")]
    TransportError(Box<dyn std::error::Error + Send + Sync>),

    #[error("Decode error: {0}")]
    DecodeError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

impl From<std::convert::Infallible> for MailupError {
    fn from(never: std::convert::Infallible) -> Self {
        match never {}
    }
}

impl MailupError {
    pub(crate) fn invalid_response(response: HttpResponse, context: &str) -> Self {
        let message = format!(
            "Response not OK when {context}. Status: {}. Response body: {}",
            response.status, response.body
        );
        MailupError::InvalidResponse { response, message }
    }

    /// Error code string for structured JSON output.
    pub fn code(&self) -> &'static str {
        match self {
            MailupError::InvalidResponse { .. } => "invalid_response",
            MailupError::InvalidToken(_) => "invalid_token",
            MailupError::InvalidArgument(_) => "invalid_argument",
            MailupError::CannotDelete(_) => "cannot_delete",
            MailupError::MissingOption(_) => "missing_option",
            MailupError::ConfigError { .. } => "config_error",
            MailupError::TransportError(_) => "transport_error",
            MailupError::DecodeError(_) => "decode_error",
            MailupError::IoError(_) => "io_error",
        }
    }

    /// HTTP status of the offending response, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            MailupError::InvalidResponse { response, .. } => Some(response.status),
            _ => None,
        }
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut obj = serde_json::Map::new();
        if let Some(status) = self.status() {
            obj.insert("status".into(), serde_json::Value::from(status));
        }
        obj.insert("message".into(), serde_json::Value::String(self.to_string()));
        obj.insert("code".into(), serde_json::Value::String(self.code().to_string()));
        serde_json::json!({ "error": obj })
    }
}
