//! Session lifecycle tests
//! Sign up, sign in, resolve, sign out against in-process stores.

#[cfg(test)]
mod lifecycle_tests {
    use std::sync::Arc;

    use platform::docstore::DocumentStore;

    use crate::application::{
        AuthConfig, CheckSessionUseCase, SignInInput, SignInUseCase, SignOutUseCase, SignUpInput,
        SignUpUseCase, session_cookie,
    };
    use crate::domain::entity::session::Session;
    use crate::domain::repository::{SessionRepository, UserRepository};
    use crate::domain::value_object::session_token::SessionToken;
    use crate::error::AuthError;
    use crate::infra::{DocUserRepository, MemorySessionStore};

    struct Fixture {
        users: Arc<DocUserRepository>,
        sessions: Arc<MemorySessionStore>,
        config: Arc<AuthConfig>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                users: Arc::new(DocUserRepository::new(DocumentStore::memory())),
                sessions: Arc::new(MemorySessionStore::new()),
                config: Arc::new(AuthConfig::development()),
            }
        }

        async fn register(&self, email: &str, password: &str) {
            SignUpUseCase::new(self.users.clone(), self.config.clone())
                .execute(SignUpInput {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await
                .unwrap();
        }

        async fn sign_in(&self, email: &str, password: &str) -> Result<String, AuthError> {
            SignInUseCase::new(self.users.clone(), self.sessions.clone(), self.config.clone())
                .execute(SignInInput {
                    email: email.to_string(),
                    password: password.to_string(),
                })
                .await
                .map(|output| output.session_cookie)
        }

        fn check(&self) -> CheckSessionUseCase<DocUserRepository, MemorySessionStore> {
            CheckSessionUseCase::new(self.users.clone(), self.sessions.clone(), self.config.clone())
        }
    }

    #[tokio::test]
    async fn test_sign_in_then_resolve() {
        let fx = Fixture::new();
        fx.register("a@x.com", "p1").await;

        let cookie = fx.sign_in("a@x.com", "p1").await.unwrap();
        let user = fx.check().execute(&cookie).await.unwrap();
        assert_eq!(user.email.as_str(), "a@x.com");
        assert_eq!(fx.sessions.len().await, 1);
    }

    #[tokio::test]
    async fn test_failed_sign_in_creates_no_session() {
        let fx = Fixture::new();
        fx.register("a@x.com", "p1").await;

        assert!(matches!(
            fx.sign_in("a@x.com", "wrong").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(matches!(
            fx.sign_in("nobody@x.com", "p1").await,
            Err(AuthError::InvalidCredentials)
        ));
        assert!(fx.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn test_sign_out_invalidates_cookie() {
        let fx = Fixture::new();
        fx.register("a@x.com", "p1").await;
        let cookie = fx.sign_in("a@x.com", "p1").await.unwrap();

        let sign_out = SignOutUseCase::new(fx.sessions.clone(), fx.config.clone());
        assert!(sign_out.execute(&cookie).await.unwrap());
        assert!(!fx.check().is_valid(&cookie).await);
        assert!(!sign_out.execute(&cookie).await.unwrap());
    }

    #[tokio::test]
    async fn test_session_of_deleted_user_fails_closed() {
        let fx = Fixture::new();
        fx.register("a@x.com", "p1").await;
        let cookie = fx.sign_in("a@x.com", "p1").await.unwrap();
        let user = fx.check().execute(&cookie).await.unwrap();

        fx.users.delete(&user.user_id).await.unwrap();

        assert!(matches!(
            fx.check().execute(&cookie).await,
            Err(AuthError::SessionInvalid)
        ));
        // The dangling session is gone, not just ignored
        assert!(fx.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn test_expired_session_is_deleted() {
        let fx = Fixture::new();
        fx.register("a@x.com", "p1").await;
        let cookie = fx.sign_in("a@x.com", "p1").await.unwrap();
        let user = fx.check().execute(&cookie).await.unwrap();

        let stale = Session::new(
            SessionToken::for_user(&user.user_id),
            chrono::Duration::milliseconds(-1000),
        )
        .unwrap();
        fx.sessions.create(&stale).await.unwrap();
        let stale_cookie = session_cookie::sign(&stale.session_id, &fx.config.session_secret).unwrap();

        assert!(matches!(
            fx.check().execute(&stale_cookie).await,
            Err(AuthError::SessionInvalid)
        ));
        assert!(fx.sessions.find_by_id(&stale.session_id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_out_of_range_ttl_fails_sign_in_without_panicking() {
        let fx = Fixture::new();
        fx.register("a@x.com", "p1").await;

        let huge = Fixture {
            config: Arc::new(AuthConfig {
                session_ttl: std::time::Duration::from_secs(1_000_000_000_000_000),
                ..(*fx.config).clone()
            }),
            users: fx.users.clone(),
            sessions: fx.sessions.clone(),
        };
        assert!(matches!(
            huge.sign_in("a@x.com", "p1").await,
            Err(AuthError::Internal(_))
        ));
        assert!(fx.sessions.is_empty().await);
    }

    #[tokio::test]
    async fn test_cookie_from_another_secret_rejected() {
        let fx = Fixture::new();
        fx.register("a@x.com", "p1").await;
        let cookie = fx.sign_in("a@x.com", "p1").await.unwrap();

        let other = Fixture {
            config: Arc::new(AuthConfig::development()),
            users: fx.users.clone(),
            sessions: fx.sessions.clone(),
        };
        assert!(matches!(
            other.check().execute(&cookie).await,
            Err(AuthError::SessionInvalid)
        ));
    }
}

#[cfg(test)]
mod router_tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use axum::{Router, middleware};
    use platform::docstore::DocumentStore;
    use tower::ServiceExt;

    use crate::application::AuthConfig;
    use crate::infra::MemorySessionStore;
    use crate::presentation::{
        AuthAppState, LOGIN_PATH, attach_request_context, auth_router, require_authentication,
        user_router,
    };

    fn app() -> Router {
        let state = AuthAppState::new(
            DocumentStore::memory(),
            MemorySessionStore::new(),
            AuthConfig::development(),
        );

        Router::new()
            .nest("/api/auth", auth_router(state.clone()))
            .nest(
                "/api/user",
                user_router().route_layer(middleware::from_fn(require_authentication)),
            )
            .layer(middleware::from_fn_with_state(
                state,
                attach_request_context::<MemorySessionStore>,
            ))
    }

    fn form(uri: &str, body: &str) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_register_redirects_to_login() {
        let response = app()
            .oneshot(form("/api/auth/register", "Email=a%40x.com&Password=p1"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_register_invalid_email_is_bad_request() {
        let response = app()
            .oneshot(form("/api/auth/register", "email=nope&password=p1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = app()
            .oneshot(form("/api/auth/register", "password=p1"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_protected_route_redirects_anonymous() {
        let response = app()
            .oneshot(Request::get("/api/user/details").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], LOGIN_PATH);
    }

    #[tokio::test]
    async fn test_garbage_cookie_is_anonymous() {
        let response = app()
            .oneshot(
                Request::get("/api/user/details")
                    .header(header::COOKIE, "session=garbage")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
    }

    #[tokio::test]
    async fn test_login_form_renders() {
        let response = app()
            .oneshot(Request::get("/api/auth/login").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }
}
