use serde::{Deserialize, Serialize};

use crate::context::RequestContext;
use crate::error::MailupError;
use crate::transport::Method;

use super::{null_to_default, Page, CONSOLE};

/// A custom recipient attribute ("dynamic field") and, when attached to a
/// recipient, its value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicField {
    #[serde(rename = "Description", default, deserialize_with = "null_to_default")]
    pub field_name: String,
    #[serde(rename = "Id")]
    pub id: i64,
    #[serde(rename = "Value", default, deserialize_with = "null_to_default")]
    pub value: String,
}

impl DynamicField {
    pub fn new(field_name: impl Into<String>, value: impl Into<String>, id: i64) -> Self {
        Self {
            field_name: field_name.into(),
            value: value.into(),
            id,
        }
    }

    /// Fetch the dynamic fields defined on the account. Values are empty.
    pub async fn all(ctx: &mut RequestContext) -> Result<Vec<DynamicField>, MailupError> {
        let response = ctx
            .request(&format!("{CONSOLE}/Recipient/DynamicFields"), Method::GET, None)
            .await?;
        let page: Page<DynamicField> = response.json()?;
        Ok(page.items)
    }
}
