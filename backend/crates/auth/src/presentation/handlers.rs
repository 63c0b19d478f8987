//! HTTP Handlers

use axum::Json;
use axum::extract::{Form, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{Html, IntoResponse, Redirect, Response};
use platform::cookie::extract_cookie;
use platform::docstore::DocumentStore;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::{
    SignInInput, SignInUseCase, SignOutUseCase, SignUpInput, SignUpUseCase,
};
use crate::domain::repository::SessionRepository;
use crate::error::{AuthError, AuthResult};
use crate::infra::DocUserRepository;
use crate::presentation::context::CurrentUser;
use crate::presentation::dto::{LoginForm, RegisterForm, UserDetailsResponse};
use crate::presentation::router::{DEFAULT_VIEW_PATH, LOGIN_PATH};
use crate::presentation::views;

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    pub store: DocumentStore,
    pub users: Arc<DocUserRepository>,
    pub sessions: Arc<S>,
    pub config: Arc<AuthConfig>,
}

impl<S> AuthAppState<S>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    /// The only way to build the state is with a live store handle
    pub fn new(store: DocumentStore, sessions: S, config: AuthConfig) -> Self {
        Self {
            users: Arc::new(DocUserRepository::new(store.clone())),
            store,
            sessions: Arc::new(sessions),
            config: Arc::new(config),
        }
    }
}

// ============================================================================
// Registration
// ============================================================================

/// GET /api/auth/register
pub async fn register_form() -> Html<String> {
    Html(views::register_page(None))
}

/// POST /api/auth/register
pub async fn register<S>(
    State(state): State<AuthAppState<S>>,
    Form(form): Form<RegisterForm>,
) -> AuthResult<Response>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignUpUseCase::new(state.users.clone(), state.config.clone());

    let input = SignUpInput {
        email: form.email,
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(_) => Ok(Redirect::to(LOGIN_PATH).into_response()),
        Err(
            e @ (AuthError::InvalidEmail(_)
            | AuthError::PasswordValidation(_)
            | AuthError::EmailTaken),
        ) => {
            e.log();
            let page = views::register_page(Some(&e.to_string()));
            Ok((e.status_code(), Html(page)).into_response())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Login
// ============================================================================

/// GET /api/auth/login
pub async fn login_form() -> Html<String> {
    Html(views::login_page(None))
}

/// POST /api/auth/login
pub async fn login<S>(
    State(state): State<AuthAppState<S>>,
    Form(form): Form<LoginForm>,
) -> AuthResult<Response>
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let use_case = SignInUseCase::new(
        state.users.clone(),
        state.sessions.clone(),
        state.config.clone(),
    );

    let input = SignInInput {
        email: form.email,
        password: form.password,
    };

    match use_case.execute(input).await {
        Ok(output) => {
            let cookie = state
                .config
                .cookie_config()
                .build_set_cookie(&output.session_cookie);
            Ok((
                [(header::SET_COOKIE, cookie)],
                Redirect::to(DEFAULT_VIEW_PATH),
            )
                .into_response())
        }
        Err(e @ AuthError::InvalidCredentials) => {
            e.log();
            let page = views::login_page(Some(&e.to_string()));
            Ok((StatusCode::UNAUTHORIZED, Html(page)).into_response())
        }
        Err(e) => Err(e),
    }
}

// ============================================================================
// Logout
// ============================================================================

/// GET /api/auth/logout
pub async fn logout<S>(State(state): State<AuthAppState<S>>, headers: HeaderMap) -> Response
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    if let Some(cookie) = extract_cookie(&headers, &state.config.session_cookie_name) {
        let use_case = SignOutUseCase::new(state.sessions.clone(), state.config.clone());
        // The cookie is cleared regardless
        if let Err(e) = use_case.execute(&cookie).await {
            tracing::debug!(error = %e, "Logout without a live session");
        }
    }

    let cookie = state.config.cookie_config().build_delete_cookie();

    ([(header::SET_COOKIE, cookie)], Redirect::to(LOGIN_PATH)).into_response()
}

// ============================================================================
// User Details (requires authentication)
// ============================================================================

/// GET /api/user/details
pub async fn user_details(user: CurrentUser) -> Json<UserDetailsResponse> {
    Json(UserDetailsResponse {
        id: user.user_id.to_string(),
        email: user.email.to_string(),
    })
}
