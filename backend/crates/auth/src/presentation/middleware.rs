//! Auth Middleware
//!
//! `attach_request_context` runs on every request; `require_authentication`
//! guards protected routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use platform::cookie::extract_cookie;

use crate::application::CheckSessionUseCase;
use crate::domain::repository::SessionRepository;
use crate::error::AuthError;
use crate::presentation::context::{CurrentUser, RequestContext};
use crate::presentation::handlers::AuthAppState;
use crate::presentation::router::LOGIN_PATH;

/// Resolve the session cookie (if any) and attach a `RequestContext`
///
/// An invalid session just means anonymous; a store failure ends the
/// request with a server error.
pub async fn attach_request_context<S>(
    State(state): State<AuthAppState<S>>,
    mut req: Request,
    next: Next,
) -> Response
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let cookie = extract_cookie(req.headers(), &state.config.session_cookie_name);

    let identity = match cookie {
        None => None,
        Some(cookie) => {
            let use_case = CheckSessionUseCase::new(
                state.users.clone(),
                state.sessions.clone(),
                state.config.clone(),
            );
            match use_case.execute(&cookie).await {
                Ok(user) => Some(CurrentUser::from(&user)),
                Err(AuthError::SessionInvalid) => None,
                Err(e) => return e.into_response(),
            }
        }
    };

    req.extensions_mut().insert(RequestContext {
        store: state.store.clone(),
        identity,
    });

    next.run(req).await
}

/// Redirect anonymous requests to the login page
pub async fn require_authentication(req: Request, next: Next) -> Response {
    let authenticated = req
        .extensions()
        .get::<RequestContext>()
        .is_some_and(RequestContext::is_authenticated);

    if !authenticated {
        return Redirect::to(LOGIN_PATH).into_response();
    }

    next.run(req).await
}
