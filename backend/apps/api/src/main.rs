//! API Server Entry Point
//!
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

use safetycard_api::{AppConfig, Server, StartupError};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

async fn start() -> Result<Server, StartupError> {
    let config = AppConfig::from_env()?;
    Server::build(config).await
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "safetycard_api=info,auth=info,safety=info,platform=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let server = start()
        .await
        .inspect_err(|e| tracing::error!(error = %e, "Startup failed"))?;

    server.run().await?;

    Ok(())
}
