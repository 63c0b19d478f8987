//! Check Session Use Case
//!
//! Resolves a session cookie to the signed-in user.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::session_cookie;
use crate::application::session_serializer::SessionSerializer;
use crate::domain::entity::user::User;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Check session use case
pub struct CheckSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    serializer: SessionSerializer<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> CheckSessionUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            serializer: SessionSerializer::new(user_repo),
            session_repo,
            config,
        }
    }

    /// Verify the cookie, load the session and deserialize its user
    ///
    /// Expired sessions and sessions whose user no longer resolves are
    /// deleted on the way out.
    pub async fn execute(&self, session_cookie: &str) -> AuthResult<User> {
        let session_id = session_cookie::verify(session_cookie, &self.config.session_secret)?;

        let session = self
            .session_repo
            .find_by_id(&session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete(&session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        match self.serializer.deserialize(&session.token).await {
            Err(AuthError::SessionInvalid) => {
                tracing::info!(session_id = %session_id, "Dropping session of unknown user");
                self.session_repo.delete(&session_id).await?;
                Err(AuthError::SessionInvalid)
            }
            other => other,
        }
    }

    /// Just check if session is valid (returns bool)
    pub async fn is_valid(&self, session_cookie: &str) -> bool {
        self.execute(session_cookie).await.is_ok()
    }
}
