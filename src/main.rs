use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use timetracker::{auth, config, router, AppState, Database};

#[derive(Parser)]
#[command(version, about = "Track time spent on client projects")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending migrations and serve the web application (default)
    Serve {
        /// Address to listen on, overrides BIND_ADDR
        #[arg(long)]
        bind: Option<String>,
    },
    /// Apply pending migrations and exit
    Migrate,
    /// Create a user who can log in
    CreateUser {
        username: String,
        #[arg(long, env = "TIMETRACKER_PASSWORD", hide_env_values = true)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("timetracker=info")),
        )
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = config::init().context("failed to load configuration")?;

    // Initialize database connection
    let db = Database::new(&config)
        .await
        .context("failed to open database")?;
    db.migrate().await.context("failed to apply migrations")?;

    match cli.command.unwrap_or(Command::Serve { bind: None }) {
        Command::Serve { bind } => serve(db, config, bind).await,
        Command::Migrate => {
            tracing::info!("migrations applied");
            Ok(())
        }
        Command::CreateUser { username, password } => create_user(&db, &username, &password).await,
    }
}

async fn serve(db: Database, config: config::Config, bind: Option<String>) -> Result<()> {
    let addr = bind.unwrap_or_else(|| config.bind_addr.clone());
    let app = router(AppState::new(db, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn create_user(db: &Database, username: &str, password: &str) -> Result<()> {
    let username = username.trim();
    if username.is_empty() {
        bail!("username must not be empty");
    }
    if password.is_empty() {
        bail!("password must not be empty");
    }

    let hash = auth::hash_password(password)?;
    let user = db.create_user(username, &hash).await?;
    tracing::info!(user_id = user.id, username = %user.username, "user created");
    Ok(())
}
