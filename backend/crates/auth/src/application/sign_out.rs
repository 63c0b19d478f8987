//! Sign Out Use Case
//!
//! Invalidates a user session.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_cookie;
use crate::domain::repository::SessionRepository;
use crate::error::AuthResult;

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: SessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: SessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Delete the session behind a cookie value
    ///
    /// Returns whether a session was actually removed.
    pub async fn execute(&self, session_cookie: &str) -> AuthResult<bool> {
        let session_id = session_cookie::verify(session_cookie, &self.config.session_secret)?;
        let deleted = self.session_repo.delete(&session_id).await?;

        if deleted {
            tracing::info!(session_id = %session_id, "User signed out");
        }
        Ok(deleted)
    }
}
