//! Beacon webhook notification service.
//!
//! Registers webhook subscribers over HTTP and periodically delivers signed
//! ping events to every registered endpoint from a background dispatch loop.

mod config;
mod health;
mod logging;
mod openapi;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, Router};
use tokio::signal;
use tracing::info;

use beacon_webhooks::{webhooks_router, AppState, Dispatcher, SubscriptionRegistry};
use config::Config;
use health::health_handler;
use openapi::openapi_handler;

#[tokio::main]
async fn main() {
    // Load configuration (fail-fast on invalid values)
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };

    logging::init_logging(&config.rust_log);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        host = %config.host,
        port = config.port,
        dispatch_interval_secs = config.dispatch_interval_secs,
        block_internal_hosts = config.block_internal_hosts,
        "Starting beacon API"
    );

    let registry = Arc::new(
        SubscriptionRegistry::new().with_block_internal(config.block_internal_hosts),
    );

    let dispatcher = match Dispatcher::new(registry.clone(), config.delivery_timeout()) {
        Ok(d) => Arc::new(d.with_interval(config.dispatch_interval())),
        Err(e) => {
            eprintln!("Failed to create dispatcher: {e}");
            std::process::exit(1);
        }
    };

    // Background dispatch loop. Stopped via its running flag on shutdown;
    // in-flight deliveries are dropped with the task.
    let dispatch_task = {
        let dispatcher = dispatcher.clone();
        tokio::spawn(async move { dispatcher.start().await })
    };

    let app = Router::new()
        .route("/health", get(health_handler))
        .route("/docs/openapi.json", get(openapi_handler))
        .merge(webhooks_router(AppState::new(registry)));

    let addr: SocketAddr = match format!("{}:{}", config.host, config.port).parse() {
        Ok(a) => a,
        Err(e) => {
            eprintln!("Invalid bind address {}:{}: {e}", config.host, config.port);
            std::process::exit(1);
        }
    };

    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(l) => l,
        Err(e) => {
            eprintln!("Failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    info!(%addr, "Listening");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!(error = %e, "Server error");
    }

    dispatcher.stop().await;
    dispatch_task.abort();

    info!("Shutdown complete");
}

/// Resolve when the process receives SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
