//! Service Bootstrap
//!
//! One service template shared by every binary: a binary only names the
//! operation key it serves.
//!
//! # Startup Sequence
//! 1. Initialize tracing subscriber for logging
//! 2. Load configuration from environment variables
//! 3. Resolve the operation key against the registry (fatal if unknown)
//! 4. Create the result cache and router
//! 5. Start HTTP server on configured address
//! 6. Handle graceful shutdown on SIGINT/SIGTERM

use std::future::Future;
use std::net::SocketAddr;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api::{create_router, AppState};
use crate::config::Config;
use crate::ops::OperationRegistry;

/// Runs the service computing `operation_key` until a shutdown signal.
pub async fn run(operation_key: &str) -> anyhow::Result<()> {
    init_tracing();

    info!("Starting {} service", operation_key);

    let config = Config::from_env_for(operation_key);
    info!(
        "Configuration loaded: bind_addr={}, port={}, cache_capacity={}, cache_max_text_bytes={}",
        config.bind_addr, config.server_port, config.cache_capacity, config.cache_max_text_bytes
    );

    let registry =
        OperationRegistry::with_builtins().context("failed to register built-in operations")?;
    let state = AppState::from_config(operation_key, &registry, &config).with_context(|| {
        format!(
            "operation '{}' is not registered (available: {})",
            operation_key,
            registry.keys().join(", ")
        )
    })?;
    info!("Operation '{}' resolved", operation_key);

    let addr = SocketAddr::new(config.bind_addr, config.server_port);
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    info!("Server listening on http://{}", addr);

    serve(listener, state, shutdown_signal()).await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Serves `state` on an already bound listener until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = create_router(state);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")
}

/// Installs the global tracing subscriber.
///
/// Defaults to "info" level, can be overridden with RUST_LOG env var.
/// Does nothing if a subscriber is already installed.
pub fn init_tracing() {
    let _ = tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "text_metrics=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }
}
