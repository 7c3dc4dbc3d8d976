use anyhow::Context;

use user_api::config::AppConfig;
use user_api::state::AppState;
use user_api::{database, routes};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up USERAPI_* overrides.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "user_api=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::load().context("loading configuration")?;

    let pool = database::connect(&config.database)
        .await
        .context("opening database")?;
    database::migrate(&pool).await.context("migrating database")?;

    let addr = format!(
        "{}:{}",
        config.web_service.host, config.web_service.port
    );
    let state = AppState::new(config, pool).context("building application state")?;
    let app = routes::app(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    tracing::info!("listening on http://{addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving")?;

    tracing::info!("shut down cleanly");

    Ok(())
}

/// Resolves on SIGINT; axum then stops accepting and drains in-flight
/// requests before `serve` returns.
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("listening for shutdown signal: {e}");
        return;
    }

    tracing::info!("shutdown signal received, draining");
}
