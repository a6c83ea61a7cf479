mod config;
mod http;
mod state;
mod views;

use std::sync::Arc;
use std::time::Duration;

use adapter::{HttpAuthService, LocalBackend, PresenceHub};
use anyhow::Context;
use dotenvy::dotenv;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::Settings;
use http::router::build_router;
use state::{AppState, SiteConfig};
use storage::Db;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let settings = Settings::new().context("Failed to load configuration")?;

    let db = Db::new(&settings.database.url).await?;

    let (tx_live, _rx_live) = broadcast::channel(100);

    let auth = Arc::new(HttpAuthService::new(settings.auth.base_url.clone()));
    info!("Using auth service at {}", settings.auth.base_url);

    let backend = Arc::new(LocalBackend::new(db, auth.clone(), tx_live.clone()));

    let presence = PresenceHub::new(
        Duration::from_secs(settings.presence.timeout_secs),
        tx_live.clone(),
    );

    let cancel_token = CancellationToken::new();
    let sweeper = tokio::spawn(presence.clone().run_sweeper(
        Duration::from_secs(settings.presence.heartbeat_interval_secs.max(1)),
        cancel_token.clone(),
    ));

    let state = AppState {
        backend,
        auth,
        presence: Arc::new(presence),
        tx_live,
        site: Arc::new(SiteConfig::from(&settings)),
    };

    let app = build_router(state, &settings.server.cors_origins);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to address: {}", addr))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    cancel_token.cancel();
    let _ = sweeper.await;
    info!("Shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down gracefully...");
        },
        _ = terminate => {
            info!("Received SIGTERM, shutting down gracefully...");
        },
    }
}
