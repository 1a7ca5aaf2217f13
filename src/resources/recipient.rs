use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::MailupError;

use super::{null_to_default, DynamicField};

/// A MailUp recipient. `id` is assigned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipient {
    #[serde(rename = "idRecipient", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Name", default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(rename = "Email")]
    pub email: String,
    #[serde(rename = "MobileNumber", default, deserialize_with = "null_to_default")]
    pub mobile_number: String,
    #[serde(rename = "MobilePrefix", default, deserialize_with = "null_to_default")]
    pub mobile_prefix: String,
    #[serde(rename = "Fields", default, deserialize_with = "null_to_default")]
    pub fields: Vec<DynamicField>,
}

impl Recipient {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        mobile_number: impl Into<String>,
        mobile_prefix: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            name: name.into(),
            email: email.into(),
            mobile_number: mobile_number.into(),
            mobile_prefix: mobile_prefix.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_fields(mut self, fields: Vec<DynamicField>) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    /// The remote id, or `InvalidArgument` for a recipient never saved.
    pub(crate) fn require_id(&self) -> Result<i64, MailupError> {
        self.id.ok_or_else(|| {
            MailupError::InvalidArgument(format!("recipient <{}> has no id yet", self.email))
        })
    }
}

/// Subscription state used to filter list recipients.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SubscriptionStatus {
    #[default]
    Subscribed,
    Unsubscribed,
    Pending,
}

impl SubscriptionStatus {
    pub const ALL: [SubscriptionStatus; 3] = [
        SubscriptionStatus::Subscribed,
        SubscriptionStatus::Unsubscribed,
        SubscriptionStatus::Pending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubscriptionStatus::Subscribed => "Subscribed",
            SubscriptionStatus::Unsubscribed => "Unsubscribed",
            SubscriptionStatus::Pending => "Pending",
        }
    }
}

impl fmt::Display for SubscriptionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for SubscriptionStatus {
    type Error = MailupError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == value)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|s| s.as_str()).collect();
                MailupError::InvalidArgument(format!(
                    "Subscription status can be only one of [{}]!",
                    allowed.join(", ")
                ))
            })
    }
}

impl FromStr for SubscriptionStatus {
    type Err = MailupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_from(s)
    }
}
