pub mod cache;
pub mod grant;
pub mod token;

pub use cache::{TokenCache, CACHE_FILE_NAME};
pub use grant::{basic_auth_header, Grant};
pub use token::{HeldToken, Token, TokenStatus};
