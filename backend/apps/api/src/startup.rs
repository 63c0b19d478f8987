//! Startup sequence
//!
//! Connect the store, run migrations, then bind. Nothing is listening until
//! the store is ready, and any failure along the way is fatal.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use auth::{MemorySessionStore, spawn_session_sweeper};
use axum::Router;
use platform::docstore::{DocStoreError, DocumentStore};
use platform::password::prepare_dummy_hash;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::app::build_router;
use crate::config::{AppConfig, ConfigError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("document store unavailable: {0}")]
    Store(#[from] DocStoreError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// A bound listener with its router, ready to serve
pub struct Server {
    listener: TcpListener,
    router: Router,
    sessions: MemorySessionStore,
    sweep_period: Duration,
}

impl Server {
    pub async fn build(config: AppConfig) -> Result<Self, StartupError> {
        let store =
            DocumentStore::connect(&config.database_url, config.database_max_connections).await?;
        store.migrate().await?;

        tracing::info!(backend = store.backend_name(), "Database connection ready");

        if !prepare_dummy_hash() {
            tracing::warn!("Dummy password hash unavailable; unknown-account logins will be faster");
        }

        let sessions = MemorySessionStore::new();
        let router = build_router(
            store,
            sessions.clone(),
            config.auth,
            &config.frontend_origins,
        );

        let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| StartupError::Bind { addr, source })?;

        Ok(Self {
            listener,
            router,
            sessions,
            sweep_period: config.session_sweep_period,
        })
    }

    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Serve until Ctrl-C
    pub async fn run(self) -> std::io::Result<()> {
        let sweeper = spawn_session_sweeper(Arc::new(self.sessions), self.sweep_period);

        tracing::info!("Listening on {}", self.listener.local_addr()?);

        let result = axum::serve(
            self.listener,
            self.router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await;

        sweeper.abort();
        result
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(database_url: &str) -> AppConfig {
        let mut config = AppConfig::from_lookup(|name| match name {
            "DATABASE_URL" => Some(database_url.to_string()),
            "SESSION_SECRET" => Some(platform::crypto::to_base64(&[3u8; 32])),
            _ => None,
        })
        .unwrap();
        config.port = 0;
        config
    }

    #[tokio::test]
    async fn test_memory_store_starts() {
        let server = Server::build(config("memory://")).await.unwrap();
        assert_ne!(server.local_addr().unwrap().port(), 0);
    }

    #[tokio::test]
    async fn test_bad_database_url_fails_before_bind() {
        let err = Server::build(config("not a database url"))
            .await
            .err()
            .unwrap();
        assert!(matches!(err, StartupError::Store(_)));
    }

    #[tokio::test]
    async fn test_port_in_use_fails() {
        let taken = TcpListener::bind("0.0.0.0:0").await.unwrap();
        let mut config = config("memory://");
        config.port = taken.local_addr().unwrap().port();

        let err = Server::build(config).await.err().unwrap();
        assert!(matches!(err, StartupError::Bind { .. }));
    }
}
