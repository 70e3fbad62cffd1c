//! Inkwell HTTP server binary
//!
//! Configuration comes from the environment (`SECRET_KEY`, `DATABASE_URL`,
//! `ACCESS_TOKEN_EXPIRE_MINUTES`, `HOST`, `PORT`) and is read exactly once.

use anyhow::Context;
use inkwell_core::Store;
use inkwell_server::{router, AppState, Settings};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "inkwell_server=debug,inkwell_core=info,tower_http=debug".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            tracing::error!(error = %e, "Refusing to start");
            return Err(e).context("invalid configuration");
        }
    };

    tracing::info!(database = %settings.redacted_database_url(), "Opening store");
    let store = Store::connect(&settings.database_url)
        .await
        .context("failed to open store")?;

    let app = router(AppState::new(store.clone(), &settings.auth));

    let listener = tokio::net::TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", settings.bind_addr))?;
    tracing::info!(addr = %settings.bind_addr, "Inkwell listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    store.close().await;
    tracing::info!("Inkwell stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}
