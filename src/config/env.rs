use std::path::PathBuf;

use crate::error::MailupError;

use super::types::ContextOptions;

/// Expand environment variable references in a string.
///
/// Supported syntaxes:
/// - `${VAR}` - replaced with env var value; error if unset
/// - `${VAR:-fallback}` - replaced with env var value, or fallback if unset or empty
/// - `$env:VAR` - same as `${VAR}`
pub fn expand_env_vars(input: &str) -> Result<String, MailupError> {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('$') {
        result.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];

        if let Some(expr) = after.strip_prefix('{') {
            let close = expr.find('}').ok_or_else(|| {
                env_error(&format!("Unclosed variable reference: ${{{expr}"))
            })?;
            let var_expr = &expr[..close];
            match var_expr.split_once(":-") {
                Some((name, fallback)) => match std::env::var(name) {
                    Ok(val) if !val.is_empty() => result.push_str(&val),
                    _ => result.push_str(fallback),
                },
                None => result.push_str(&lookup(var_expr)?),
            }
            rest = &expr[close + 1..];
        } else if let Some(tail) = after.strip_prefix("env:") {
            let end = tail
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(tail.len());
            if end == 0 {
                return Err(env_error("Empty variable name in $env: reference"));
            }
            result.push_str(&lookup(&tail[..end])?);
            rest = &tail[end..];
        } else {
            result.push('$');
            rest = after;
        }
    }
    result.push_str(rest);

    Ok(result)
}

/// Expand environment variables in every string field of the options.
pub fn expand_options(options: &mut ContextOptions) -> Result<(), MailupError> {
    for field in [
        &mut options.client_id,
        &mut options.client_secret,
        &mut options.username,
        &mut options.password,
    ] {
        *field = expand_env_vars(field)?;
    }
    for uri in [&mut options.auth_uri, &mut options.base_uri].into_iter().flatten() {
        *uri = expand_env_vars(uri)?;
    }
    if let Some(dir) = options.cache_dir.take() {
        let expanded = expand_env_vars(&dir.to_string_lossy())?;
        options.cache_dir = Some(PathBuf::from(expanded));
    }
    Ok(())
}

fn lookup(name: &str) -> Result<String, MailupError> {
    std::env::var(name)
        .map_err(|_| env_error(&format!("Environment variable '{name}' is not set")))
}

fn env_error(detail: &str) -> MailupError {
    MailupError::ConfigError {
        path: PathBuf::from("<env>"),
        detail: detail.to_string(),
    }
}
