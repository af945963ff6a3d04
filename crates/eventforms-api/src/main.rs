//! Event Forms API server
//!
//! ```bash
//! EVENTFORMS_JWT_SECRET=... eventforms-api serve
//! eventforms-api issue-token --admin-id lead-1 --email lead@ecell.org
//! ```

use clap::{Parser, Subcommand};
use eventforms_api::{build_router, AppState, Authenticator, ServerConfig};
use eventforms_core::EntityId;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "eventforms-api")]
#[command(version)]
#[command(about = "Event registration forms API", long_about = None)]
struct Cli {
    /// Path to the JSON config file
    #[arg(long, env = "EVENTFORMS_CONFIG", default_value = eventforms_api::config::DEFAULT_CONFIG_PATH)]
    config: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP server (default)
    Serve,
    /// Mint an administrator token signed with the configured secret
    IssueToken {
        #[arg(long)]
        admin_id: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value_t = 12)]
        ttl_hours: i64,
    },
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = ServerConfig::from_path(&cli.config)?;

    match cli.command.unwrap_or(Commands::Serve) {
        Commands::Serve => serve(config).await,
        Commands::IssueToken { admin_id, email, ttl_hours } => {
            let auth = Authenticator::new(&config.jwt_secret)?;
            let token = auth.issue_token(
                &EntityId::from_string(admin_id),
                &email,
                chrono::Duration::hours(ttl_hours),
            )?;
            println!("{token}");
            Ok(())
        }
    }
}

async fn serve(config: ServerConfig) -> Result<(), Box<dyn std::error::Error>> {
    let addr = config.socket_addr()?;
    let state = AppState::in_memory(&config)?;
    let app = build_router(state, config.cors_permissive);

    tracing::info!("Event Forms API listening on {}", addr);
    tracing::info!("Form links point at {}", config.public_base_url);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
