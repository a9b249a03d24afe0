//! HTTP server: loads settings, opens the database, serves the API until Ctrl+C.

use pizza_api::{app, store, AppState, Settings};
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("pizza_api=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    let pool = store::connect(&settings.database_url, settings.max_connections).await?;
    let state = AppState { pool };
    let app = app(state, settings.body_limit);

    let listener = TcpListener::bind(settings.bind_address()).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
