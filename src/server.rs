//! HTTP server initialization and runtime setup.
//!
//! Wires the registry and account store together, starts the optional expiry
//! sweeper and runs the Axum server until a shutdown signal arrives.

use crate::application::services::{AuthService, LinkService};
use crate::config::Config;
use crate::domain::clock::{Clock, SystemClock};
use crate::domain::expiry_sweeper::run_expiry_sweeper;
use crate::infrastructure::persistence::{InMemoryLinkRepository, InMemoryUserRepository};
use crate::infrastructure::security::JwtKeys;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;

/// Builds the application state from configuration.
///
/// The link repository is returned alongside the state so the caller can
/// hand it to the expiry sweeper.
///
/// # Errors
///
/// Returns an error if the custom code pattern does not compile.
pub fn build_state(
    config: &Config,
    clock: Arc<dyn Clock>,
) -> Result<(AppState, Arc<InMemoryLinkRepository>)> {
    let link_repository = Arc::new(InMemoryLinkRepository::new(clock.clone()));
    let user_repository = Arc::new(InMemoryUserRepository::new(clock.clone()));

    let link_service = LinkService::new(link_repository.clone(), clock, config.link_settings()?);

    let keys = JwtKeys::new(
        &config.jwt_secret,
        chrono::Duration::hours(config.jwt_ttl_hours),
    );
    let auth_service = AuthService::new(user_repository, keys);

    let state = AppState::new(
        Arc::new(link_service),
        Arc::new(auth_service),
        config.public_base_url.clone(),
    );

    Ok((state, link_repository))
}

/// Runs the HTTP server with the given configuration.
///
/// # Errors
///
/// Returns an error if:
/// - The state cannot be built from the configuration
/// - The listen address is invalid or cannot be bound
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let (state, link_repository) = build_state(&config, Arc::new(SystemClock))?;

    if config.is_sweeper_enabled() {
        let every = Duration::from_secs(config.sweep_interval_seconds);
        tokio::spawn(run_expiry_sweeper(link_repository, every));
        tracing::info!("Expiry sweeper started");
    }

    let app = app_router(state, &config.static_dir);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Resolves on Ctrl+C, or SIGTERM on unix.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, draining connections");
}
