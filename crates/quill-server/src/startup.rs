//! Server startup: logging, wiring and the serve loop.

use crate::di::{build_app_module, create_cache_pool};
use quill_config::{AppConfig, ObservabilityConfig, ServerConfig};
use quill_core::{QuillError, QuillResult};
use quill_repository::{DatabasePool, DatabasePoolInterface};
use quill_rest::{create_router, AppState};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Builds the log filter. `RUST_LOG` wins over the configured level.
pub fn log_filter(config: &ObservabilityConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "{level},quill={level},tower_http={level}",
            level = config.log_level
        ))
    })
}

/// Installs the global tracing subscriber.
pub fn init_logging(config: &ObservabilityConfig) -> QuillResult<()> {
    let registry = tracing_subscriber::registry().with(log_filter(config));

    let result = if config.is_json() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_target(true))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(true))
            .try_init()
    };

    result.map_err(|e| QuillError::Internal(format!("Failed to initialize logging: {e}")))
}

/// Connects every dependency and serves HTTP until a shutdown signal.
pub async fn run(config: AppConfig) -> QuillResult<()> {
    info!("Environment: {}", config.app.environment);

    let db_pool = DatabasePool::connect(&config.database).await?;
    if config.database.run_migrations {
        db_pool.run_migrations().await?;
    }

    let cache_pool = create_cache_pool(&config.redis)?;
    let module = build_app_module(db_pool.inner().clone(), cache_pool, &config);
    let state = AppState::from_module(module.as_ref());
    let database = state.database.clone();

    let router = create_router(state, &config.server);

    let addr = config.server.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| QuillError::Internal(format!("Failed to bind {addr}: {e}")))?;

    print_startup_info(&config.server);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| QuillError::Internal(format!("HTTP server error: {e}")))?;

    database.close().await;
    info!("Server shutdown complete");
    Ok(())
}

/// Prints where the server can be reached.
pub fn print_startup_info(config: &ServerConfig) {
    let separator = "=".repeat(60);
    info!("{}", separator);
    info!("REST API:  http://{}/api/v1", config.addr());
    info!("Health:    http://{}/health", config.addr());
    info!("API Docs:  http://{}/swagger-ui", config.addr());
    info!("{}", separator);
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        }
    }
}
