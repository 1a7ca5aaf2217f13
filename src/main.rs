use clap::{Parser, Subcommand};

use mailup_client::cli::commands;
use mailup_client::cli::connection::{connect, ConnectionArgs};
use mailup_client::cli::output::{print_error, OutputMode};
use mailup_client::MailupError;

#[derive(Parser)]
#[command(name = "mailup", version, about = "Command-line client for the MailUp REST API")]
struct Cli {
    #[command(flatten)]
    connection: ConnectionArgs,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the account's mailing lists
    Lists,

    /// Count the recipients of a list
    Count {
        list_id: i64,

        /// Subscribed, Unsubscribed or Pending
        #[arg(long, default_value = "Subscribed")]
        status: String,
    },

    /// Show one page of a list's recipients
    Recipients {
        list_id: i64,

        /// Page number, starting at 1
        #[arg(long, default_value_t = 1)]
        page: u32,

        #[arg(long, default_value_t = 20)]
        size: u32,

        /// Subscribed, Unsubscribed or Pending
        #[arg(long, default_value = "Subscribed")]
        status: String,

        /// Report malformed recipients instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Find a subscribed recipient by email
    Find { list_id: i64, email: String },

    /// List the groups of a list
    Groups { list_id: i64 },

    /// Show the progress of a recipients import
    #[command(name = "import-status")]
    ImportStatus { import_id: i64 },

    /// List the account's dynamic fields
    Fields,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("MAILUP_LOG_LEVEL")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli).await {
        print_error(&e, json);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), MailupError> {
    let mode = OutputMode::from_flag(cli.json);
    let mut ctx = connect(&cli.connection)?;

    match cli.command {
        Commands::Lists => commands::run_lists(&mut ctx, mode).await,
        Commands::Count { list_id, status } => {
            commands::run_count(&mut ctx, list_id, &status, mode).await
        }
        Commands::Recipients {
            list_id,
            page,
            size,
            status,
            lenient,
        } => commands::run_recipients(&mut ctx, list_id, page, size, &status, lenient, mode).await,
        Commands::Find { list_id, email } => {
            commands::run_find(&mut ctx, list_id, &email, mode).await
        }
        Commands::Groups { list_id } => commands::run_groups(&mut ctx, list_id, mode).await,
        Commands::ImportStatus { import_id } => {
            commands::run_import_status(&mut ctx, import_id, mode).await
        }
        Commands::Fields => commands::run_fields(&mut ctx, mode).await,
    }
}
