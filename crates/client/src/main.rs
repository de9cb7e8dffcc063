//! `retailinv-admin`: command-line shell over the admin client.

use std::sync::Arc;

use anyhow::{Context, Result, anyhow};
use clap::{Parser, Subcommand};
use serde::Serialize;

use retailinv_auth::{RegistrationRequest, Role};
use retailinv_client::{
    ApiClient, AuthorizationGuard, ClientConfig, FileTokenStore, Navigator, Route, SessionClient,
    SessionError, TokenStore,
};
use retailinv_core::StoreId;
use retailinv_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "retailinv-admin", about = "Administrative client for the retail inventory services")]
struct Cli {
    /// Human-readable logs instead of JSON.
    #[arg(long, global = true)]
    pretty_logs: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Sign in and persist the issued token.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "RETAILINV_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Create an account.
    Register {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "RETAILINV_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        phone: String,
        #[arg(long, default_value = "EMPLOYEE", value_parser = parse_role)]
        role: Role,
    },
    /// Forget the stored token.
    Logout,
    /// Confirm the stored token with the server and show the account.
    Status,
    /// Evaluate navigation to a client route (e.g. `/admin/stores`).
    Open { path: String },
    /// List stores.
    Stores,
    /// List products.
    Products,
    /// List user accounts (admin).
    Users,
    /// List inventory movements (admin).
    Movements {
        #[arg(long)]
        store: Option<StoreId>,
    },
    /// Movement counts per type (admin).
    Metrics,
}

fn parse_role(s: &str) -> Result<Role, String> {
    s.parse::<Role>().map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    retailinv_observability::init_with(if cli.pretty_logs {
        LogFormat::Pretty
    } else {
        LogFormat::Json
    });

    if let Err(err) = run(cli.command).await {
        let message = match err.downcast_ref::<SessionError>() {
            Some(session_err) => session_err.user_message(),
            None => format!("{err:#}"),
        };
        tracing::debug!("command failed: {err:#}");
        eprintln!("error: {message}");
        std::process::exit(1);
    }
}

async fn run(command: Command) -> Result<()> {
    let config = ClientConfig::from_env();
    let file_store = FileTokenStore::open_default();
    tracing::debug!(path = %file_store.path().display(), "using token file");
    let store: Arc<dyn TokenStore> = Arc::new(file_store);
    let session = Arc::new(
        SessionClient::new(config.clone(), store.clone()).context("create session client")?,
    );

    match command {
        Command::Login { email, password } => {
            let login = session.login(&email, &password).await?;
            store.save(&login.token);
            let role = login.role();
            print_json(&serde_json::json!({
                "role": role,
                "landing": Route::landing_for(role).path(),
            }))
        }
        Command::Register {
            first_name,
            last_name,
            email,
            password,
            phone,
            role,
        } => {
            let request = RegistrationRequest {
                first_name,
                last_name,
                email,
                password,
                phone_number: phone,
                role,
            };
            print_json(&session.register(&request).await?)
        }
        Command::Logout => {
            session.logout();
            Ok(())
        }
        Command::Status => {
            if !session.validate_token().await {
                return Err(SessionError::Unauthenticated.into());
            }
            print_json(&session.profile().await?)
        }
        Command::Open { path } => {
            let route = Route::parse(&path).ok_or_else(|| anyhow!("unknown route '{path}'"))?;
            let navigator = Navigator::new(AuthorizationGuard::new(store.clone(), session.clone()));
            let outcome = navigator
                .navigate(route)
                .await
                .context("navigation superseded")?;
            print_json(&serde_json::json!({
                "requested": outcome.requested.path(),
                "decision": outcome.decision,
                "target": outcome.target().path(),
            }))
        }
        Command::Stores => print_json(&api(config, store)?.list_stores().await?),
        Command::Products => print_json(&api(config, store)?.list_products().await?),
        Command::Users => print_json(&api(config, store)?.list_users().await?),
        Command::Movements { store: Some(id) } => {
            print_json(&api(config, store)?.movements_by_store(id).await?)
        }
        Command::Movements { store: None } => print_json(&api(config, store)?.list_movements().await?),
        Command::Metrics => print_json(&api(config, store)?.movement_metrics().await?),
    }
}

fn api(config: ClientConfig, store: Arc<dyn TokenStore>) -> Result<ApiClient> {
    ApiClient::new(config, store).context("create api client")
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let out = serde_json::to_string_pretty(value).context("serialize output")?;
    println!("{out}");
    Ok(())
}
