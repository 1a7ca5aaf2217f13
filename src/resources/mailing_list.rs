use serde::{Deserialize, Serialize, Serializer};

use crate::context::RequestContext;
use crate::error::MailupError;
use crate::transport::Method;

use super::{
    null_to_default, to_body, ListGroup, Page, Recipient, ResultSet, SubscriptionStatus, CONSOLE,
};

/// A MailUp mailing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MailingList {
    #[serde(rename = "idList")]
    pub id: i64,
    #[serde(rename = "Name", default, deserialize_with = "null_to_default")]
    pub name: String,
    #[serde(rename = "Company", default, deserialize_with = "null_to_default")]
    pub company_name: String,
    #[serde(rename = "Description", default, deserialize_with = "null_to_default")]
    pub description: String,
}

/// How recipients unsubscribe from a list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OptoutType {
    #[default]
    OneClick,
    Confirmed,
}

impl Serialize for OptoutType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(match self {
            OptoutType::OneClick => 0,
            OptoutType::Confirmed => 1,
        })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum ListScope {
    #[default]
    #[serde(rename = "newsletters")]
    Newsletter,
    #[serde(rename = "Direct_Advertising")]
    Marketing,
    #[serde(rename = "Transactional")]
    Transactional,
}

/// Settings of a list created with [`MailingList::create`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateListOptions {
    pub bounced_emails_addr: Option<String>,
    pub charset: String,
    pub phone_default_intl_prefix: Option<String>,
    pub description: Option<String>,
    pub disclaimer: Option<String>,
    pub custom_to: Option<String>,
    pub format: String,
    pub hosted_subscription_form: bool,
    pub list_unsubscribe_header: String,
    pub abuse_report_notice: String,
    pub auto_generate_text_part: bool,
    pub sender_name: Option<String>,
    pub unsubscribe_notification_email: Option<String>,
    pub optout_type: OptoutType,
    pub reply_to_addr: Option<String>,
    pub sms_on_subscription: bool,
    pub email_on_subscription: bool,
    pub send_goodbye_mail: bool,
    pub enable_tracking: bool,
    pub is_customers_list: bool,
    pub is_business_list: bool,
    pub scope: ListScope,
}

impl Default for CreateListOptions {
    fn default() -> Self {
        Self {
            bounced_emails_addr: None,
            charset: "UTF-8".to_string(),
            phone_default_intl_prefix: None,
            description: None,
            disclaimer: None,
            custom_to: None,
            format: "html".to_string(),
            hosted_subscription_form: false,
            list_unsubscribe_header: "<[listunsubscribe]>,<[mailto_uns]>".to_string(),
            abuse_report_notice: "Please report abuse here: http://[host]/p".to_string(),
            auto_generate_text_part: true,
            sender_name: None,
            unsubscribe_notification_email: None,
            optout_type: OptoutType::OneClick,
            reply_to_addr: None,
            sms_on_subscription: false,
            email_on_subscription: false,
            send_goodbye_mail: false,
            enable_tracking: true,
            is_customers_list: true,
            is_business_list: false,
            scope: ListScope::Newsletter,
        }
    }
}

/// Wire shape of the list creation request. Unset options are omitted.
#[derive(Debug, Serialize)]
struct CreateListBody<'a> {
    #[serde(rename = "bouncedemail", skip_serializing_if = "Option::is_none")]
    bounced_email: Option<&'a str>,
    charset: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    default_prefix: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    disclaimer: Option<&'a str>,
    #[serde(rename = "displayas", skip_serializing_if = "Option::is_none")]
    display_as: Option<&'a str>,
    format: &'a str,
    #[serde(rename = "frontendform")]
    frontend_form: bool,
    #[serde(rename = "headerlistunsubscriber")]
    header_list_unsubscriber: &'a str,
    #[serde(rename = "headerxabuse")]
    header_x_abuse: &'a str,
    #[serde(rename = "kbmax")]
    kb_max: u32,
    multipart_text: bool,
    #[serde(rename = "nl_sendername", skip_serializing_if = "Option::is_none")]
    sender_name: Option<&'a str>,
    #[serde(rename = "notifyemail", skip_serializing_if = "Option::is_none")]
    notify_email: Option<&'a str>,
    optout_type: OptoutType,
    #[serde(rename = "owneremail")]
    owner_email: &'a str,
    public: bool,
    #[serde(rename = "replyto", skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(rename = "sendconfirmsms")]
    send_confirm_sms: bool,
    #[serde(rename = "subscribedemail")]
    subscribed_email: bool,
    #[serde(rename = "sendemailoptout")]
    send_email_optout: bool,
    tracking: bool,
    #[serde(rename = "Customer")]
    customer: bool,
    business: bool,
    #[serde(rename = "Name")]
    name: &'a str,
    #[serde(rename = "copyTemplate")]
    copy_template: bool,
    #[serde(rename = "copyWebhooks")]
    copy_webhooks: bool,
    #[serde(rename = "idSettings")]
    id_settings: &'a str,
    scope: ListScope,
    #[serde(rename = "useDefaultSettings")]
    use_default_settings: bool,
}

impl<'a> CreateListBody<'a> {
    fn new(name: &'a str, owner_email: &'a str, options: &'a CreateListOptions) -> Self {
        Self {
            bounced_email: options.bounced_emails_addr.as_deref(),
            charset: &options.charset,
            default_prefix: options.phone_default_intl_prefix.as_deref(),
            description: options.description.as_deref(),
            disclaimer: options.disclaimer.as_deref(),
            display_as: options.custom_to.as_deref(),
            format: &options.format,
            frontend_form: options.hosted_subscription_form,
            header_list_unsubscriber: &options.list_unsubscribe_header,
            header_x_abuse: &options.abuse_report_notice,
            kb_max: 100,
            multipart_text: options.auto_generate_text_part,
            sender_name: options.sender_name.as_deref(),
            notify_email: options.unsubscribe_notification_email.as_deref(),
            optout_type: options.optout_type,
            owner_email,
            public: false,
            reply_to: options.reply_to_addr.as_deref(),
            send_confirm_sms: options.sms_on_subscription,
            subscribed_email: options.email_on_subscription,
            send_email_optout: options.send_goodbye_mail,
            tracking: options.enable_tracking,
            customer: options.is_customers_list,
            business: options.is_business_list,
            name,
            copy_template: false,
            copy_webhooks: false,
            id_settings: "",
            scope: options.scope,
            use_default_settings: true,
        }
    }
}

impl MailingList {
    /// A handle on an existing list, for when only its id is known.
    pub fn with_id(id: i64) -> Self {
        Self {
            id,
            name: String::new(),
            company_name: String::new(),
            description: String::new(),
        }
    }

    /// All mailing lists of the account.
    pub async fn all(ctx: &mut RequestContext) -> Result<Vec<MailingList>, MailupError> {
        let response = ctx
            .request(&format!("{CONSOLE}/User/Lists"), Method::GET, None)
            .await?;
        let page: Page<MailingList> = response.json()?;
        Ok(page.items)
    }

    /// Create a list owned by `owner_email` and return it with its new id.
    pub async fn create(
        ctx: &mut RequestContext,
        name: &str,
        owner_email: &str,
        options: &CreateListOptions,
    ) -> Result<MailingList, MailupError> {
        let body = CreateListBody::new(name, owner_email, options);
        let response = ctx
            .request(&format!("{CONSOLE}/User/Lists"), Method::POST, Some(to_body(&body)?))
            .await?;
        let id: i64 = response.json()?;
        tracing::debug!(id, name, "created mailing list");

        Ok(MailingList {
            id,
            name: name.to_string(),
            company_name: String::new(),
            description: options.description.clone().unwrap_or_default(),
        })
    }

    /// Start an asynchronous import of `recipients` and return the import id.
    ///
    /// With `unsubscribe` the recipients are imported as opted out; with
    /// `ignore_mobile` their mobile numbers are skipped.
    pub async fn import(
        &self,
        ctx: &mut RequestContext,
        recipients: &[Recipient],
        unsubscribe: bool,
        ignore_mobile: bool,
    ) -> Result<i64, MailupError> {
        let mut params = Vec::new();
        if unsubscribe {
            params.push(("importType", "asOptout"));
        }
        if ignore_mobile {
            params.push(("ignoreMobile", "true"));
        }

        let response = ctx
            .request_with_query(
                &format!("{CONSOLE}/List/{}/Recipients", self.id),
                &params,
                Method::POST,
                Some(to_body(recipients)?),
            )
            .await?;
        response.json()
    }

    /// Add and subscribe a recipient, recording the id the service assigned.
    pub async fn add_recipient(
        &self,
        ctx: &mut RequestContext,
        recipient: &mut Recipient,
    ) -> Result<i64, MailupError> {
        let response = ctx
            .request(
                &format!("{CONSOLE}/List/{}/Recipient", self.id),
                Method::POST,
                Some(to_body(&*recipient)?),
            )
            .await?;
        let id: i64 = response.json()?;
        recipient.id = Some(id);
        Ok(id)
    }

    pub async fn unsubscribe_recipient(
        &self,
        ctx: &mut RequestContext,
        recipient: &Recipient,
    ) -> Result<(), MailupError> {
        let recipient_id = recipient.require_id()?;
        ctx.request(
            &format!("{CONSOLE}/List/{}/Unsubscribe/{recipient_id}", self.id),
            Method::DELETE,
            None,
        )
        .await?;
        Ok(())
    }

    /// Overwrite the remote recipient's details with `recipient`.
    pub async fn update_recipient(
        &self,
        ctx: &mut RequestContext,
        recipient: &Recipient,
    ) -> Result<(), MailupError> {
        ctx.request(
            &format!("{CONSOLE}/Recipient/Detail"),
            Method::PUT,
            Some(to_body(recipient)?),
        )
        .await?;
        Ok(())
    }

    /// First subscribed recipient whose email contains `email`.
    pub async fn find_recipient(
        &self,
        ctx: &mut RequestContext,
        email: &str,
    ) -> Result<Option<Recipient>, MailupError> {
        let filter = format!("\"Email.Contains('{email}')\"");
        let response = ctx
            .request_with_query(
                &format!("{CONSOLE}/List/{}/Recipients/Subscribed", self.id),
                &[("filterby", filter.as_str())],
                Method::GET,
                None,
            )
            .await?;
        let page: Page<Recipient> = response.json()?;
        Ok(page.items.into_iter().next())
    }

    pub async fn groups(&self, ctx: &mut RequestContext) -> Result<Vec<ListGroup>, MailupError> {
        let response = ctx
            .request(&format!("{CONSOLE}/List/{}/Groups", self.id), Method::GET, None)
            .await?;
        let page: Page<ListGroup> = response.json()?;
        Ok(page
            .items
            .into_iter()
            .map(|mut group| {
                group.list_id = self.id;
                group
            })
            .collect())
    }

    /// Number of recipients of the list in the given subscription state.
    pub async fn count_recipients<S>(
        &self,
        ctx: &mut RequestContext,
        status: S,
    ) -> Result<i64, MailupError>
    where
        S: TryInto<SubscriptionStatus>,
        S::Error: Into<MailupError>,
    {
        let status = status.try_into().map_err(Into::into)?;
        let response = ctx
            .request(
                &format!("{CONSOLE}/List/{}/Recipients/{status}", self.id),
                Method::GET,
                None,
            )
            .await?;
        let page: Page<serde_json::Value> = response.json()?;
        Ok(page.total_elements_count.unwrap_or(0))
    }

    /// One page (1-based) of recipients in the given subscription state.
    ///
    /// Fails as a whole if any item cannot be decoded.
    pub async fn recipients_paginated<S>(
        &self,
        ctx: &mut RequestContext,
        page_number: u32,
        page_size: u32,
        status: S,
    ) -> Result<Vec<Recipient>, MailupError>
    where
        S: TryInto<SubscriptionStatus>,
        S::Error: Into<MailupError>,
    {
        let results = self
            .recipients_paginated_managed(ctx, page_number, page_size, status, false)
            .await?;
        Ok(results.into_iter().filter_map(Result::ok).collect())
    }

    /// Like [`MailingList::recipients_paginated`], but with `catch_errors`
    /// an item that fails to decode is kept as an error entry instead of
    /// failing the whole page.
    pub async fn recipients_paginated_managed<S>(
        &self,
        ctx: &mut RequestContext,
        page_number: u32,
        page_size: u32,
        status: S,
        catch_errors: bool,
    ) -> Result<ResultSet, MailupError>
    where
        S: TryInto<SubscriptionStatus>,
        S::Error: Into<MailupError>,
    {
        let status = status.try_into().map_err(Into::into)?;
        let page_number = page_number.to_string();
        let page_size = page_size.to_string();
        let response = ctx
            .request_with_query(
                &format!("{CONSOLE}/List/{}/Recipients/{status}", self.id),
                &[("PageNumber", page_number.as_str()), ("PageSize", page_size.as_str())],
                Method::GET,
                None,
            )
            .await?;

        let page: Page<serde_json::Value> = response.json()?;
        let mut results = ResultSet::new();
        for item in page.items {
            match serde_json::from_value::<Recipient>(item) {
                Ok(recipient) => results.push(Ok(recipient)),
                Err(e) if catch_errors => results.push(Err(e.to_string())),
                Err(e) => {
                    return Err(MailupError::DecodeError(format!(
                        "Failed to decode recipient: {e}"
                    )))
                }
            }
        }
        Ok(results)
    }
}
