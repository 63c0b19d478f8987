//! End-to-end request flows against the in-memory document store

use std::time::Duration;

use auth::application::session_cookie;
use auth::domain::SessionRepository;
use auth::domain::entity::session::Session;
use auth::domain::value_object::SessionId;
use auth::{AuthConfig, AuthError, AuthResult, MemorySessionStore};
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, Response, StatusCode, header};
use platform::docstore::{DocStoreError, DocumentStore, SqlxError};
use safetycard_api::build_router;
use serde_json::{Value, json};
use sqlx::postgres::PgPoolOptions;
use tower::ServiceExt;

const LOGIN: &str = "/api/auth/login";

fn app() -> Router {
    build_router(
        DocumentStore::memory(),
        MemorySessionStore::new(),
        AuthConfig::development(),
        &["http://localhost:8080".to_string()],
    )
}

async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req = Request::get(uri);
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::empty()).unwrap()
}

fn form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut req =
        Request::post(uri).header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        req = req.header(header::COOKIE, cookie);
    }
    req.body(Body::from(body.to_string())).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value, cookie: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn location(response: &Response<Body>) -> &str {
    response.headers()[header::LOCATION].to_str().unwrap()
}

async fn json_body(response: Response<Body>) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// `name=value` pair from the response's Set-Cookie header
fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

async fn register(app: &Router, email: &str, password: &str) {
    let body = format!("email={}&password={password}", email.replace('@', "%40"));
    let response = send(app, form("/api/auth/register", &body, None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), LOGIN);
}

async fn login(app: &Router, email: &str, password: &str) -> Response<Body> {
    let body = format!("email={}&password={password}", email.replace('@', "%40"));
    send(app, form(LOGIN, &body, None)).await
}

async fn signed_in(app: &Router) -> String {
    register(app, "a@x.com", "p1").await;
    let response = login(app, "a@x.com", "p1").await;
    session_cookie(&response).unwrap()
}

#[tokio::test]
async fn test_login_scenario() {
    let app = app();
    register(&app, "a@x.com", "p1").await;

    let response = login(&app, "a@x.com", "p1").await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/");
    let cookie = session_cookie(&response).unwrap();
    assert!(cookie.starts_with("session="));

    let response = send(&app, get("/api/user/details", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let details = json_body(response).await;
    assert_eq!(details["email"], "a@x.com");
    assert!(!details["id"].as_str().unwrap().is_empty());
    assert!(details.get("password_hash").is_none());

    let response = login(&app, "a@x.com", "wrong").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    assert!(String::from_utf8_lossy(&bytes).contains("Incorrect email/password."));
}

#[tokio::test]
async fn test_unknown_email_fails_like_wrong_password() {
    let app = app();
    register(&app, "a@x.com", "p1").await;

    let unknown = login(&app, "nobody@x.com", "p1").await;
    let wrong = login(&app, "a@x.com", "nope").await;

    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    let unknown = to_bytes(unknown.into_body(), usize::MAX).await.unwrap();
    let wrong = to_bytes(wrong.into_body(), usize::MAX).await.unwrap();
    assert_eq!(unknown, wrong);
}

#[tokio::test]
async fn test_duplicate_registration_conflicts() {
    let app = app();
    register(&app, "a@x.com", "p1").await;

    let response = send(
        &app,
        form("/api/auth/register", "email=A%40x.com&password=p2", None),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_anonymous_requests_are_redirected_to_login() {
    let app = app();

    for uri in [
        "/api/reports",
        "/api/submit",
        "/submit",
        "/api/user/details",
        "/api/radar",
    ] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(location(&response), LOGIN, "{uri}");
    }
}

#[tokio::test]
async fn test_public_routes_need_no_session() {
    let app = app();

    let response = send(&app, get("/", None)).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/about");

    for uri in ["/about", "/api/auth/login", "/api/auth/register"] {
        let response = send(&app, get(uri, None)).await;
        assert_eq!(response.status(), StatusCode::OK, "{uri}");
    }
}

#[tokio::test]
async fn test_logout_ends_the_session() {
    let app = app();
    let cookie = signed_in(&app).await;

    let response = send(&app, get("/api/reports", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&app, get("/api/auth/logout", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), LOGIN);
    let cleared = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cleared.contains("Max-Age=0"));

    // The old cookie no longer names a live session
    let response = send(&app, get("/api/reports", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), LOGIN);
}

#[tokio::test]
async fn test_tampered_cookie_is_anonymous() {
    let app = app();
    let cookie = signed_in(&app).await;

    let mut tampered = cookie.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    for cookie in [tampered.as_str(), "session=not-a-session"] {
        let response = send(&app, get("/api/reports", Some(cookie))).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(location(&response), LOGIN);
    }
}

#[tokio::test]
async fn test_submit_and_fetch_report() {
    let app = app();
    let cookie = signed_in(&app).await;

    let response = send(&app, get("/api/submit", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(
        &app,
        form(
            "/api/submit",
            "category=Slip&location=Dock+4&description=Wet+floor",
            Some(&cookie),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let report_uri = location(&response).to_string();
    assert!(report_uri.starts_with("/api/reports/"));

    let response = send(&app, get(&report_uri, Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);
    let card = json_body(response).await;
    assert_eq!(card["category"], "Slip");
    assert_eq!(card["location"], "Dock 4");
    assert_eq!(card["submitterEmail"], "a@x.com");

    let response = send(&app, get("/api/reports", Some(&cookie))).await;
    let cards = json_body(response).await;
    assert_eq!(cards.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_report_validation_and_missing_reports() {
    let app = app();
    let cookie = signed_in(&app).await;

    let response = send(
        &app,
        form("/api/submit", "category=Slip&location=+", Some(&cookie)),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    for uri in [
        "/api/reports/not-a-uuid",
        "/api/reports/00000000-0000-4000-8000-000000000000",
    ] {
        let response = send(&app, get(uri, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{uri}");
    }
}

#[tokio::test]
async fn test_hazard_radar_lifecycle() {
    let app = app();
    let cookie = signed_in(&app).await;

    let response = send(
        &app,
        json_request(
            "POST",
            "/api/radar",
            json!({"title": "Loose cable", "description": "Near bay 2", "location": "Warehouse"}),
            &cookie,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let hazard = json_body(response).await;
    assert_eq!(hazard["active"], true);
    let id = hazard["id"].as_str().unwrap().to_string();

    let response = send(&app, get("/api/radar/local?location=Warehouse", Some(&cookie))).await;
    assert_eq!(json_body(response).await.as_array().unwrap().len(), 1);

    let response = send(&app, get("/api/radar/local?location=Office", Some(&cookie))).await;
    assert!(json_body(response).await.as_array().unwrap().is_empty());

    let response = send(
        &app,
        json_request("PUT", &format!("/api/radar/{id}"), json!({}), &cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let hazard = json_body(response).await;
    assert_eq!(hazard["active"], false);
    assert!(!hazard["deactivatedAt"].is_null());

    let response = send(&app, get("/api/radar", Some(&cookie))).await;
    assert!(json_body(response).await.as_array().unwrap().is_empty());

    let response = send(
        &app,
        json_request(
            "PUT",
            "/api/radar/00000000-0000-4000-8000-000000000000",
            json!({}),
            &cookie,
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_hazard_validation() {
    let app = app();
    let cookie = signed_in(&app).await;

    let response = send(&app, get("/api/radar/local", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = send(
        &app,
        json_request("POST", "/api/radar", json!({"title": "No location"}), &cookie),
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Store failures
// ============================================================================

/// Session store whose backing database is down
#[derive(Clone)]
struct UnavailableSessions;

fn unavailable() -> AuthError {
    DocStoreError::Database(SqlxError::PoolTimedOut).into()
}

impl SessionRepository for UnavailableSessions {
    async fn create(&self, _session: &Session) -> AuthResult<()> {
        Err(unavailable())
    }

    async fn find_by_id(&self, _session_id: &SessionId) -> AuthResult<Option<Session>> {
        Err(unavailable())
    }

    async fn delete(&self, _session_id: &SessionId) -> AuthResult<bool> {
        Err(unavailable())
    }

    async fn cleanup_expired(&self) -> AuthResult<u64> {
        Err(unavailable())
    }
}

#[tokio::test]
async fn test_session_store_failure_is_a_server_error_not_anonymous() {
    let config = AuthConfig::development();
    let cookie = session_cookie::sign(&SessionId::new(), &config.session_secret).unwrap();
    let app = build_router(DocumentStore::memory(), UnavailableSessions, config, &[]);

    let response = send(&app, get("/api/reports", Some(&format!("session={cookie}")))).await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().get(header::LOCATION).is_none());
}

#[tokio::test]
async fn test_session_store_failure_during_login_is_a_server_error() {
    let app = build_router(
        DocumentStore::memory(),
        UnavailableSessions,
        AuthConfig::development(),
        &[],
    );
    register(&app, "a@x.com", "p1").await;

    let response = login(&app, "a@x.com", "p1").await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_credential_store_failure_during_login_is_a_server_error() {
    // Nothing listens on port 1
    let pool = PgPoolOptions::new()
        .acquire_timeout(Duration::from_millis(300))
        .connect_lazy("postgres://safety@127.0.0.1:1/safety")
        .unwrap();
    let app = build_router(
        DocumentStore::from_pool(pool),
        MemorySessionStore::new(),
        AuthConfig::development(),
        &[],
    );

    let response = login(&app, "a@x.com", "p1").await;

    assert!(response.status().is_server_error(), "{}", response.status());
    assert_ne!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}
