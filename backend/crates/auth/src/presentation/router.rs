//! Auth Router

use axum::{Router, routing::get};

use crate::domain::repository::SessionRepository;
use crate::presentation::handlers::{self, AuthAppState};

/// Where anonymous callers of protected routes are sent
pub const LOGIN_PATH: &str = "/api/auth/login";

/// Where a successful login lands
pub const DEFAULT_VIEW_PATH: &str = "/";

/// Registration, login and logout; mount under `/api/auth`
pub fn auth_router<S>(state: AuthAppState<S>) -> Router
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/register",
            get(handlers::register_form).post(handlers::register::<S>),
        )
        .route(
            "/login",
            get(handlers::login_form).post(handlers::login::<S>),
        )
        .route("/logout", get(handlers::logout::<S>))
        .with_state(state)
}

/// Account routes for the signed-in user; mount under `/api/user`
pub fn user_router() -> Router {
    Router::new().route("/details", get(handlers::user_details))
}
