//! Typed bindings for the MailUp console resources.
//!
//! Resources are plain data; every operation borrows the
//! [`RequestContext`](crate::RequestContext) that authenticates the call.

pub mod dynamic_field;
pub mod group;
pub mod import;
pub mod mailing_list;
pub mod recipient;
pub mod result_set;

pub use dynamic_field::DynamicField;
pub use group::ListGroup;
pub use import::Import;
pub use mailing_list::{CreateListOptions, ListScope, MailingList, OptoutType};
pub use recipient::{Recipient, SubscriptionStatus};
pub use result_set::{RecipientResult, ResultSet};

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::MailupError;

/// Root of every console resource path.
pub(crate) const CONSOLE: &str = "/ConsoleService.svc/Console";

/// Envelope of every collection endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct Page<T> {
    #[serde(rename = "Items", default = "Vec::new")]
    pub items: Vec<T>,
    #[serde(rename = "TotalElementsCount", default)]
    pub total_elements_count: Option<i64>,
}

pub(crate) fn to_body<T: Serialize + ?Sized>(value: &T) -> Result<serde_json::Value, MailupError> {
    serde_json::to_value(value)
        .map_err(|e| MailupError::DecodeError(format!("Failed to encode request body: {e}")))
}

/// Treat an explicit JSON `null` like a missing field.
pub(crate) fn null_to_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
