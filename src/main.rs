//! Product Hub server
//!
//! Main application entry point

use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tokio::net::TcpListener;
use tracing::{error, info};

use product_hub::{
    build_router,
    config::Settings,
    database::{create_pool, run_migrations, DatabaseConfig, DatabaseService},
    utils::logging,
    AppState, ServiceFactory,
};

/// How often idle rate limiter state is pruned
const CLEANUP_INTERVAL: Duration = Duration::from_secs(60);

/// Start the product management API server.
#[derive(Clone, Debug, Parser)]
#[command(version, about)]
struct Options {
    /// Configuration file; defaults to an optional `config.toml` in the working directory.
    #[arg(short, long, env = "PRODUCT_HUB_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind, overriding the configuration.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overriding the configuration.
    #[arg(short, long)]
    port: Option<u16>,

    /// Print the effective configuration as TOML and exit.
    #[arg(long)]
    print_config: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let opt = Options::parse();

    // Load configuration
    let mut settings = match &opt.config {
        Some(path) => Settings::from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?,
        None => Settings::new().context("failed to load configuration")?,
    };
    settings.apply_overrides(opt.host, opt.port);
    settings.validate()?;

    if opt.print_config {
        println!("{}", settings.to_toml()?);
        return Ok(());
    }

    // Initialize logging
    let _log_guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", product_hub::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&DatabaseConfig::from(&settings.database)).await?;
    run_migrations(&pool).await?;

    // Initialize services
    let services = ServiceFactory::new(&settings, DatabaseService::new(pool))?;
    services.auth.seed_admin().await?;

    let bind_addr = settings.bind_address();
    let state = AppState::new(settings, services)?;

    let cleanup_state = state.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(CLEANUP_INTERVAL);
        loop {
            interval.tick().await;
            cleanup_state.rate_limiter.cleanup_old_entries();
            cleanup_state.activity.cleanup_old_entries();
        }
    });

    let app = build_router(state);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!("Product Hub listening on {}", bind_addr);

    if let Err(e) = axum::serve(listener, app.into_make_service_with_connect_info::<SocketAddr>())
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await
    {
        error!(error = %e, "Server terminated with an error");
        return Err(e.into());
    }

    info!("Product Hub has been shut down.");
    Ok(())
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received, draining connections");
}
