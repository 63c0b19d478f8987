//! Request Context
//!
//! Attached to every request by `attach_request_context`.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use platform::docstore::DocumentStore;

use crate::domain::entity::user::User;
use crate::domain::value_object::{UserId, email::Email};
use crate::error::AuthError;
use crate::presentation::router::LOGIN_PATH;

/// The signed-in user, as resolved from the session cookie
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub email: Email,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            user_id: user.user_id,
            email: user.email.clone(),
        }
    }
}

/// Per-request view of the process-wide state
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub store: DocumentStore,
    pub identity: Option<CurrentUser>,
}

impl RequestContext {
    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

fn missing_context() -> Response {
    AuthError::Internal("request context not attached".to_string()).into_response()
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or_else(missing_context)
    }
}

/// Extracting a `CurrentUser` sends anonymous callers to the login page
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let context = parts
            .extensions
            .get::<RequestContext>()
            .ok_or_else(missing_context)?;

        context
            .identity
            .clone()
            .ok_or_else(|| Redirect::to(LOGIN_PATH).into_response())
    }
}
