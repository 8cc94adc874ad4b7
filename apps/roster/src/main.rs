//! Roster binary: web console and CLI console.

use clap::{Parser, Subcommand};
use roster::api::{self, AppState};
use roster::cli::{self, EditFields};
use roster::config::RemoteConfig;
use roster::store::{DEFAULT_TOKEN_FILE, FileTokenStore};
use roster::AppError;
use roster_core::{Credentials, UserId};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "roster", version, about = "User-management console for a reqres-style directory")]
struct Cli {
    #[command(flatten)]
    remote: RemoteConfig,

    /// File holding the CLI session token
    #[arg(long, env = "ROSTER_TOKEN_FILE", default_value = DEFAULT_TOKEN_FILE, global = true)]
    token_file: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Serve the web console
    Serve {
        #[arg(long, env = "ROSTER_BIND", default_value = "127.0.0.1:3000")]
        bind: SocketAddr,
    },
    /// Log in and store a session token
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session token
    Logout,
    /// Show whether a session token is stored
    Whoami,
    /// List one page of users
    Users {
        /// Case-insensitive search on first and last name
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = 1)]
        page: usize,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Edit a user's name or email
    Edit {
        id: u64,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
    },
    /// Delete a user
    Delete { id: u64 },
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "command failed");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let store = FileTokenStore::new(cli.token_file);
    let client = cli.remote.client()?;

    match cli.command {
        Commands::Serve { bind } => api::serve(AppState::from_config(&cli.remote)?, bind).await,
        Commands::Login { email, password } => {
            let credentials = Credentials::new(email, password);
            cli::cmd_login(&client, cli.remote.login_mode(), &store, &credentials)
                .await
                .map(|_| ())
        }
        Commands::Logout => cli::cmd_logout(&store),
        Commands::Whoami => cli::cmd_whoami(&store).map(|_| ()),
        Commands::Users { search, page, json } => {
            cli::cmd_users(&client, &store, search.as_deref(), page, json)
                .await
                .map(|_| ())
        }
        Commands::Edit {
            id,
            first_name,
            last_name,
            email,
        } => {
            let fields = EditFields {
                first_name,
                last_name,
                email,
            };
            cli::cmd_edit(&client, &store, UserId(id), fields)
                .await
                .map(|_| ())
        }
        Commands::Delete { id } => cli::cmd_delete(&client, &store, UserId(id))
            .await
            .map(|_| ()),
    }
}
