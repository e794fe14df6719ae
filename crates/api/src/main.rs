use std::net::{IpAddr, SocketAddr};
use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use todo_api::config::{LogFormat, ServerConfig, StorageConfig};
use todo_api::router::build_app_router;
use todo_api::state::AppState;
use todo_core::store::{InMemoryTodoStore, TodoStore};
use todo_db::PgTodoStore;

const DEFAULT_LOG_FILTER: &str = "todo_api=debug,todo_core=debug,todo_db=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Configuration ---
    let config = ServerConfig::from_env().context("Invalid server configuration")?;

    // --- Tracing ---
    init_tracing(config.log_format);
    tracing::info!(host = %config.host, port = %config.port, "Loaded server configuration");

    // --- Storage ---
    let store = connect_store(&config.storage).await?;

    // --- App state + router ---
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    let app = build_app_router(state, &config);

    // --- Start server ---
    let host = config
        .host
        .parse::<IpAddr>()
        .with_context(|| format!("Invalid HOST address '{}'", config.host))?;
    let addr = SocketAddr::new(host, config.port);
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown complete");
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_LOG_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

/// Build the configured storage gateway, running migrations for PostgreSQL.
async fn connect_store(storage: &StorageConfig) -> anyhow::Result<Arc<dyn TodoStore>> {
    match storage {
        StorageConfig::Memory => {
            tracing::warn!("Using in-memory storage; todos will not survive a restart");
            Ok(Arc::new(InMemoryTodoStore::new()))
        }
        StorageConfig::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = todo_db::create_pool(database_url, *max_connections)
                .await
                .context("Failed to connect to database")?;
            tracing::info!(max_connections, "Database connection pool created");

            todo_db::health_check(&pool)
                .await
                .context("Database health check failed")?;
            tracing::info!("Database health check passed");

            todo_db::run_migrations(&pool)
                .await
                .context("Failed to run database migrations")?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(PgTodoStore::new(pool)))
        }
    }
}

/// Wait for a termination signal to initiate graceful shutdown.
///
/// Handles both SIGINT (Ctrl-C) and SIGTERM (on Unix).
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(error = %err, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            tracing::info!("Received SIGINT (Ctrl-C), starting graceful shutdown");
        }
        () = terminate => {
            tracing::info!("Received SIGTERM, starting graceful shutdown");
        }
    }
}
