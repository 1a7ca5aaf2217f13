use std::path::PathBuf;

use clap::Args;

use crate::config::{discover_config_file, read_options, ContextOptions};
use crate::context::RequestContext;
use crate::error::MailupError;

/// Credentials and endpoint selection shared by every subcommand.
#[derive(Debug, Clone, Default, Args)]
pub struct ConnectionArgs {
    /// JSON options file
    #[arg(long, global = true, env = "MAILUP_CONFIG")]
    pub config: Option<String>,

    /// OAuth client id
    #[arg(long, global = true, env = "MAILUP_CLIENT_ID")]
    pub client_id: Option<String>,

    /// OAuth client secret
    #[arg(long, global = true, env = "MAILUP_CLIENT_SECRET", hide_env_values = true)]
    pub client_secret: Option<String>,

    /// MailUp console username
    #[arg(long, global = true, env = "MAILUP_USERNAME")]
    pub username: Option<String>,

    /// MailUp console password
    #[arg(long, global = true, env = "MAILUP_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Token cache directory (default: ~/.mailup)
    #[arg(long, global = true, env = "MAILUP_CACHE_DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Do not read or write the token cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Use the plain-HTTP endpoints
    #[arg(long, global = true)]
    pub insecure_http: bool,

    #[arg(long, global = true, env = "MAILUP_AUTH_URI", hide = true)]
    pub auth_uri: Option<String>,

    #[arg(long, global = true, env = "MAILUP_BASE_URI", hide = true)]
    pub base_uri: Option<String>,
}

fn default_cache_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".mailup"))
}

/// Merge the options file (if any) with command-line values; flags win.
pub fn resolve_options(args: &ConnectionArgs) -> Result<ContextOptions, MailupError> {
    let mut options = match discover_config_file(args.config.as_deref()) {
        Some(path) => read_options(&path)?,
        None => ContextOptions::default(),
    };

    let overrides = [
        (&mut options.client_id, &args.client_id),
        (&mut options.client_secret, &args.client_secret),
        (&mut options.username, &args.username),
        (&mut options.password, &args.password),
    ];
    for (field, value) in overrides {
        if let Some(value) = value {
            *field = value.clone();
        }
    }

    if args.insecure_http {
        options.use_https = false;
    }
    if args.auth_uri.is_some() {
        options.auth_uri = args.auth_uri.clone();
    }
    if args.base_uri.is_some() {
        options.base_uri = args.base_uri.clone();
    }

    options.cache_dir = if args.no_cache {
        None
    } else {
        args.cache_dir
            .clone()
            .or(options.cache_dir)
            .or_else(default_cache_dir)
    };

    options.validate()?;
    Ok(options)
}

/// Build an authenticated-on-demand context from command-line arguments.
pub fn connect(args: &ConnectionArgs) -> Result<RequestContext, MailupError> {
    let options = resolve_options(args)?;
    RequestContext::new(options)
}
