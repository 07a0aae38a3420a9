//! LedgerSync server — application entry point.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use ledgersync_auth::config::AuthConfig;
use ledgersync_auth::provision::OnboardingService;
use ledgersync_auth::service::AuthService;
use ledgersync_core::store::memory::MemoryStore;
use ledgersync_http::{ApiState, RouteTable, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive("ledgersync=info".parse()?),
        )
        .json()
        .init();

    let session_secret = std::env::var("LEDGERSYNC_SESSION_SECRET")
        .context("LEDGERSYNC_SESSION_SECRET must be set")?;
    let bind_addr =
        std::env::var("LEDGERSYNC_BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());

    let config = AuthConfig {
        session_secret,
        ..Default::default()
    };

    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(ApiState {
        auth: AuthService::new(store.clone(), store.clone(), config.clone()),
        onboarding: OnboardingService::new(store),
        config,
        routes: RouteTable::default(),
    });

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    tracing::info!(%bind_addr, "LedgerSync server listening");

    axum::serve(listener, router(state)).await?;

    tracing::info!("LedgerSync server stopped");
    Ok(())
}
