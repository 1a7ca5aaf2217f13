use std::path::{Path, PathBuf};

use crate::error::MailupError;

use super::env::expand_options;
use super::types::ContextOptions;

/// Find the options file to use, highest precedence first:
///
/// 1. `--config` CLI flag
/// 2. `MAILUP_CONFIG` env var
/// 3. `~/.mailup/config.json`
pub fn discover_config_file(cli_config: Option<&str>) -> Option<PathBuf> {
    if let Some(path) = cli_config {
        return Some(PathBuf::from(path));
    }

    if let Ok(env_path) = std::env::var("MAILUP_CONFIG") {
        if !env_path.is_empty() {
            return Some(PathBuf::from(env_path));
        }
    }

    dirs::home_dir()
        .map(|home| home.join(".mailup").join("config.json"))
        .filter(|p| p.exists())
}

/// Read an options file and expand environment references.
///
/// Credentials may still be missing; callers that layer command-line
/// values on top validate afterwards.
pub fn read_options(path: &Path) -> Result<ContextOptions, MailupError> {
    let content = std::fs::read_to_string(path).map_err(|e| MailupError::ConfigError {
        path: path.to_path_buf(),
        detail: format!("Cannot read file: {e}"),
    })?;

    let mut options: ContextOptions =
        serde_json::from_str(&content).map_err(|e| MailupError::ConfigError {
            path: path.to_path_buf(),
            detail: format!("Invalid JSON: {e}"),
        })?;

    expand_options(&mut options).map_err(|e| match e {
        MailupError::ConfigError { detail, .. } => MailupError::ConfigError {
            path: path.to_path_buf(),
            detail,
        },
        other => other,
    })?;

    tracing::debug!(path = %path.display(), "loaded context options");
    Ok(options)
}

/// [`read_options`] followed by [`ContextOptions::validate`].
pub fn load_options(path: &Path) -> Result<ContextOptions, MailupError> {
    let options = read_options(path)?;
    options.validate()?;
    Ok(options)
}
