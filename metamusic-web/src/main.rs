//! metamusic-web: music metadata browsing and administration
//!
//! Resolves the root folder, opens `metamusic.db` (creating the schema on
//! first run) and serves the HTTP API until Ctrl+C or SIGTERM.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use metamusic_common::config::{
    CompiledDefaults, RootFolderInitializer, RootFolderResolver, TomlConfig,
};
use metamusic_common::db::{init_database, ROLE_ADMIN};
use metamusic_web::api::buildinfo::BuildInfo;
use metamusic_web::db::users;
use metamusic_web::{build_router, AppState, WebConfig};
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const MODULE_NAME: &str = "metamusic-web";

#[derive(Parser, Debug)]
#[command(name = "metamusic-web")]
#[command(about = "Music metadata browsing and admin service")]
#[command(version)]
struct Args {
    /// Folder holding metamusic.db
    #[arg(short, long, global = true)]
    root_folder: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, global = true, env = "METAMUSIC_PORT")]
    port: Option<u16>,

    /// Address to bind
    #[arg(short, long, global = true, env = "METAMUSIC_BIND")]
    bind: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Give an existing user the admin role
    GrantAdmin {
        #[arg(long)]
        email: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = TomlConfig::load_or_default(MODULE_NAME);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let build = BuildInfo::current();
    info!(
        "Starting metamusic-web v{} [{}] built {} ({})",
        build.version, build.git_hash, build.build_timestamp, build.build_profile
    );

    let root_folder = RootFolderResolver::new(MODULE_NAME)
        .with_cli_arg(args.root_folder.clone())
        .resolve();
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to create root folder")?;

    let db_path = initializer.database_path();
    info!("Database path: {}", db_path.display());
    let pool = init_database(&db_path)
        .await
        .context("Failed to initialize database")?;

    match args.command {
        Some(Command::GrantAdmin { email }) => {
            let email = email.trim().to_lowercase();
            if !users::set_role(&pool, &email, ROLE_ADMIN).await? {
                bail!("No user registered with email {}", email);
            }
            info!("Granted admin role to {}", email);
            Ok(())
        }
        Some(Command::Serve) | None => serve(pool, &config, args.bind, args.port).await,
    }
}

async fn serve(
    pool: sqlx::SqlitePool,
    config: &TomlConfig,
    bind: Option<String>,
    port: Option<u16>,
) -> Result<()> {
    let defaults = CompiledDefaults::for_current_platform();
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let port = port.unwrap_or(config.server.port);
    let base_url = if config.server.base_url.is_empty() {
        defaults.base_url
    } else {
        config.server.base_url.clone()
    };

    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", bind, port))?;

    let state = AppState::new(pool, WebConfig::new(base_url));
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("metamusic-web listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
