use std::path::{Path, PathBuf};

use crate::auth::token::Token;
use crate::error::MailupError;

pub const CACHE_FILE_NAME: &str = "access_token.json";

/// Single-file token store inside a cache directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenCache {
    dir: PathBuf,
}

impl TokenCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE_NAME)
    }

    /// Load the cached token. Missing, unreadable, malformed or expired
    /// files all yield `None`.
    pub fn load(&self) -> Option<Token> {
        let path = self.path();
        let data = match std::fs::read_to_string(&path) {
            Ok(data) => data,
            Err(e) => {
                tracing::debug!(path = %path.display(), "no cached token: {e}");
                return None;
            }
        };
        match Token::from_json(&data) {
            Ok(token) => {
                tracing::debug!(path = %path.display(), valid_until = %token.valid_until(), "loaded cached token");
                Some(token)
            }
            Err(e) => {
                tracing::debug!(path = %path.display(), "ignoring cached token: {e}");
                None
            }
        }
    }

    pub fn save(&self, token: &Token) -> Result<(), MailupError> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path(), token.to_json()?)?;
        Ok(())
    }
}
