use serde::{Deserialize, Serialize};

use crate::context::RequestContext;
use crate::error::MailupError;
use crate::transport::Method;

use super::{null_to_default, to_body, Page, Recipient, CONSOLE};

/// A group of recipients inside a mailing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListGroup {
    #[serde(rename = "idGroup")]
    pub id: i64,
    #[serde(rename = "idList", default)]
    pub list_id: i64,
    #[serde(rename = "Name", default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(rename = "Notes", default, deserialize_with = "null_to_default")]
    pub notes: String,
    #[serde(rename = "Deletable", default)]
    pub deletable: bool,
}

impl ListGroup {
    pub fn new(list_id: i64, id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            list_id,
            name: name.into(),
            notes: String::new(),
            deletable: false,
        }
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    pub fn with_deletable(mut self, deletable: bool) -> Self {
        self.deletable = deletable;
        self
    }

    /// Delete the group from its list.
    ///
    /// Groups flagged as not deletable fail with
    /// [`MailupError::CannotDelete`] without contacting the service.
    pub async fn delete(&self, ctx: &mut RequestContext) -> Result<(), MailupError> {
        if !self.deletable {
            return Err(MailupError::CannotDelete(format!(
                "{} group is not deletable",
                self.name
            )));
        }

        ctx.request(
            &format!("{CONSOLE}/List/{}/Group/{}", self.list_id, self.id),
            Method::DELETE,
            None,
        )
        .await?;
        Ok(())
    }

    /// Subscribe a recipient to this group and record the id the service
    /// assigned to it.
    pub async fn add_recipient(
        &self,
        ctx: &mut RequestContext,
        recipient: &mut Recipient,
    ) -> Result<i64, MailupError> {
        let response = ctx
            .request(
                &format!("{CONSOLE}/Group/{}/Recipient", self.id),
                Method::POST,
                Some(to_body(&*recipient)?),
            )
            .await?;
        let id: i64 = response.json()?;
        recipient.id = Some(id);
        Ok(id)
    }

    pub async fn remove_recipient(
        &self,
        ctx: &mut RequestContext,
        recipient: &Recipient,
    ) -> Result<(), MailupError> {
        let recipient_id = recipient.require_id()?;
        ctx.request(
            &format!("{CONSOLE}/Group/{}/Unsubscribe/{recipient_id}", self.id),
            Method::DELETE,
            None,
        )
        .await?;
        Ok(())
    }

    /// Recipients belonging to this group; empty when there are none.
    pub async fn recipients(&self, ctx: &mut RequestContext) -> Result<Vec<Recipient>, MailupError> {
        let response = ctx
            .request(
                &format!("{CONSOLE}/Group/{}/Recipients", self.id),
                Method::GET,
                None,
            )
            .await?;
        let page: Page<Recipient> = response.json()?;
        Ok(page.items)
    }
}
