//! Expired Session Sweeper

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::domain::repository::SessionRepository;

/// Periodically remove expired sessions from the store
///
/// The first sweep runs immediately. Failures are logged and the loop
/// keeps going.
pub fn spawn_session_sweeper<S>(session_repo: Arc<S>, period: Duration) -> JoinHandle<()>
where
    S: SessionRepository + Sync + 'static,
{
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            if let Err(e) = session_repo.cleanup_expired().await {
                tracing::warn!(error = %e, "Session cleanup failed, continuing anyway");
            }
        }
    })
}
