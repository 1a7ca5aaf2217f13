//! Client for the MailUp REST API.
//!
//! A [`RequestContext`] holds the OAuth2 credentials, obtains and refreshes
//! access tokens on demand, and optionally caches them on disk. The
//! [`resources`] module binds the console endpoints (lists, groups,
//! recipients, imports, dynamic fields) on top of it.

pub mod auth;
pub mod cli;
pub mod config;
pub mod context;
pub mod error;
pub mod resources;
pub mod transport;
pub mod transports;

pub use auth::{Token, TokenStatus};
pub use config::{load_options, ContextOptions};
pub use context::{Endpoints, RequestContext};
pub use error::MailupError;
pub use resources::{
    CreateListOptions, DynamicField, Import, ListGroup, ListScope, MailingList, OptoutType,
    Recipient, RecipientResult, ResultSet, SubscriptionStatus,
};
pub use transport::{HttpRequest, HttpResponse, HttpTransport};
pub use transports::ReqwestTransport;
