use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ruua::cli::{Cli, Commands};
use ruua::config::AppConfig;
use ruua::database::{connection, PgStore};
use ruua::services::admin_auth;
use ruua::state::AppState;
use ruua::{build_router, migrate};

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing()?;

    let cli = Cli::parse();
    let mut config = AppConfig::from_env().context("Failed to load configuration")?;

    match cli.command.unwrap_or(Commands::Serve {
        host: None,
        port: None,
    }) {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            serve(config).await
        }
        Commands::SetupDb => setup_db(config).await,
    }
}

fn init_tracing() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ruua=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {}", e))
}

async fn serve(config: AppConfig) -> Result<()> {
    let store = connection::open_store(&config)
        .await
        .context("Failed to open record store")?;
    tracing::info!("✅ Record store ready ({})", store.backend());

    admin_auth::seed_admin(store.as_ref(), &config)
        .await
        .context("Failed to seed admin user")?;

    let addr = config.bind_address();
    let app = build_router(AppState::new(store, config));

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;

    tracing::info!("🚀 Server starting on http://{}", addr);
    tracing::info!("  Offers:    POST http://{}/api/offer", addr);
    tracing::info!("  Dashboard: GET  http://{}/dashboard", addr);

    axum::serve(listener, app).await?;
    Ok(())
}

async fn setup_db(config: AppConfig) -> Result<()> {
    tracing::info!("🗄️ Setting up database...");

    let pool = connection::connect_pool(&config).await?;
    migrate::run(&pool).await?;

    let store = PgStore::new(pool);
    admin_auth::seed_admin(&store, &config).await?;

    tracing::info!("Database setup complete!");
    Ok(())
}
