//! HTTP server initialization and runtime setup.
//!
//! Handles storage setup, schema creation and the connection accept loop,
//! including the keep-alive idle timeout and graceful shutdown on Ctrl-C or
//! SIGTERM.

use crate::api::middleware::auth::BasicCredentials;
use crate::config::Config;
use crate::infrastructure::persistence::{self, SqliteUrlRepository};
use crate::routes::app_service;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::Router;
use hyper_util::rt::{TokioExecutor, TokioIo, TokioTimer};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use hyper_util::server::graceful::GracefulShutdown;
use hyper_util::service::TowerToHyperService;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::normalize_path::NormalizePath;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - SQLite connection pool
/// - `url` table and alias index (idempotent)
/// - HTTP server with graceful shutdown
///
/// # Errors
///
/// Returns an error if:
/// - The storage cannot be opened or its schema created
/// - Server bind fails
pub async fn run(config: Config) -> Result<()> {
    let pool = persistence::connect(&config.storage_path, config.pool_settings())
        .await
        .context("failed to init storage")?;
    tracing::info!(path = %config.storage_path, "Connected to storage");

    let repository = Arc::new(SqliteUrlRepository::new(Arc::new(pool)));
    repository
        .ensure_schema()
        .await
        .context("failed to create storage schema")?;

    let state = AppState::new(
        repository,
        BasicCredentials::new(config.auth_user.clone(), config.auth_password.clone()),
        config.alias_length,
    );

    let app = app_service(state, config.request_timeout());

    let listener = TcpListener::bind(&config.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.listen_addr))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    serve(listener, app, config.idle_timeout(), shutdown_signal()).await;

    tracing::info!("Server stopped");

    Ok(())
}

/// Accepts connections until `shutdown` resolves, then waits for the open
/// ones to finish.
///
/// HTTP/1 connections that sit idle for `idle_timeout` between requests are
/// closed.
async fn serve(
    listener: TcpListener,
    app: NormalizePath<Router>,
    idle_timeout: Duration,
    shutdown: impl Future<Output = ()>,
) {
    let mut builder = ConnBuilder::new(TokioExecutor::new());
    builder
        .http1()
        .timer(TokioTimer::new())
        .header_read_timeout(idle_timeout);

    let graceful = GracefulShutdown::new();

    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;

            () = &mut shutdown => break,

            res = listener.accept() => {
                let (stream, peer) = match res {
                    Ok(v) => v,
                    Err(e) => {
                        tracing::error!(error = %e, "accept error");
                        continue;
                    }
                };

                let service = TowerToHyperService::new(app.clone());
                let conn = builder
                    .serve_connection(TokioIo::new(stream), service)
                    .into_owned();
                let conn = graceful.watch(conn);

                tokio::spawn(async move {
                    if let Err(e) = conn.await {
                        tracing::debug!(peer = %peer, error = %e, "connection closed with error");
                    }
                });
            }
        }
    }

    tracing::info!(in_flight = graceful.count(), "draining connections");
    graceful.shutdown().await;
}

/// Resolves on Ctrl-C or, on Unix, SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl-C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = sigterm => {}
    }

    tracing::info!("Shutdown signal received");
}
