//! Sign In Use Case
//!
//! Authenticates a user and creates a session.

use std::sync::Arc;

use crate::application::authenticate::Authenticator;
use crate::application::config::AuthConfig;
use crate::application::session_cookie;
use crate::application::session_serializer::SessionSerializer;
use crate::domain::entity::session::Session;
use crate::domain::repository::{SessionRepository, UserRepository};
use crate::error::{AuthError, AuthResult};

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
}

/// Sign in output
#[derive(Debug)]
pub struct SignInOutput {
    /// Signed value for the session cookie
    pub session_cookie: String,
}

/// Sign in use case
pub struct SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    authenticator: Authenticator<U>,
    serializer: SessionSerializer<U>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<U, S> SignInUseCase<U, S>
where
    U: UserRepository,
    S: SessionRepository,
{
    pub fn new(user_repo: Arc<U>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            authenticator: Authenticator::new(user_repo.clone(), config.clone()),
            serializer: SessionSerializer::new(user_repo),
            session_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        let user = self
            .authenticator
            .authenticate(&input.email, input.password)
            .await?;

        let ttl = chrono::Duration::from_std(self.config.session_ttl)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;
        let session = Session::new(self.serializer.serialize(&user), ttl)?;

        self.session_repo.create(&session).await?;

        let session_cookie = session_cookie::sign(&session.session_id, &self.config.session_secret)?;

        tracing::info!(
            user_id = %user.user_id,
            session_id = %session.session_id,
            "User signed in"
        );

        Ok(SignInOutput { session_cookie })
    }
}
