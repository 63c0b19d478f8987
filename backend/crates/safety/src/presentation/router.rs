//! Safety Router

use axum::{
    Router,
    routing::{get, put},
};

use crate::presentation::handlers;

pub const SUBMIT_API_PATH: &str = "/api/submit";

/// Report and radar routes, with their full paths
///
/// Every route here expects an authenticated request context; the caller
/// applies the authentication gate.
pub fn safety_router() -> Router {
    Router::new()
        .route("/submit", get(handlers::submit_form))
        .route("/api/reports", get(handlers::list_reports))
        .route("/api/reports/{id}", get(handlers::get_report))
        .route(
            SUBMIT_API_PATH,
            get(handlers::submit_form).post(handlers::submit_report),
        )
        .route(
            "/api/radar",
            get(handlers::active_hazards).post(handlers::create_hazard),
        )
        .route("/api/radar/local", get(handlers::local_hazards))
        .route("/api/radar/{id}", put(handlers::deactivate_hazard))
}
