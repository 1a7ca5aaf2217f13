use serde::{Deserialize, Serialize};

use crate::context::RequestContext;
use crate::error::MailupError;
use crate::transport::Method;

use super::CONSOLE;

/// Status of an asynchronous recipients import.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Import {
    #[serde(rename = "idImport")]
    pub id: i64,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub created_recipients: i64,
    #[serde(default)]
    pub imported_recipients: i64,
    #[serde(default)]
    pub not_valid_recipients: i64,
    #[serde(default)]
    pub updated_recipients: i64,
    #[serde(default)]
    pub valid_recipients: i64,
}

impl Import {
    /// Fetch the status of the import with the given id.
    pub async fn retrieve(ctx: &mut RequestContext, import_id: i64) -> Result<Import, MailupError> {
        let response = ctx
            .request(&format!("{CONSOLE}/Import/{import_id}"), Method::GET, None)
            .await?;
        response.json()
    }
}
