//! Router assembly

use auth::AuthConfig;
use auth::domain::SessionRepository;
use auth::presentation::views::page;
use auth::presentation::{
    AuthAppState, attach_request_context, auth_router, require_authentication, user_router,
};
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    middleware,
    response::{Html, Redirect},
    routing::get,
};
use platform::docstore::DocumentStore;
use safety::safety_router;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

const ABOUT_PATH: &str = "/about";

/// Build the application router around a live store handle
///
/// Every request gets a `RequestContext`; the report, radar and user routes
/// additionally require a signed-in user.
pub fn build_router<S>(
    store: DocumentStore,
    sessions: S,
    auth_config: AuthConfig,
    frontend_origins: &[String],
) -> Router
where
    S: SessionRepository + Clone + Send + Sync + 'static,
{
    let state = AuthAppState::new(store, sessions, auth_config);

    let protected = safety_router()
        .nest("/api/user", user_router())
        .route_layer(middleware::from_fn(require_authentication));

    Router::new()
        .route("/", get(|| async { Redirect::to(ABOUT_PATH) }))
        .route(ABOUT_PATH, get(about))
        .nest("/api/auth", auth_router(state.clone()))
        .merge(protected)
        .layer(middleware::from_fn_with_state(
            state,
            attach_request_context::<S>,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors(frontend_origins))
}

fn cors(frontend_origins: &[String]) -> CorsLayer {
    let allowed_origins: Vec<HeaderValue> = frontend_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([header::CONTENT_TYPE, header::ACCEPT]))
        .allow_credentials(true)
}

async fn about() -> Html<String> {
    Html(page(
        "About",
        r#"<h1>Safety cards</h1>
<p>Report workplace hazards and near misses, and keep an eye on the hazard radar.</p>
<p><a href="/submit">Submit a safety card</a> or <a href="/api/auth/login">log in</a>.</p>"#,
    ))
}
