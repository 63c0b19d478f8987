//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, middleware and pages.

pub mod context;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use context::{CurrentUser, RequestContext};
pub use handlers::AuthAppState;
pub use middleware::{attach_request_context, require_authentication};
pub use router::{DEFAULT_VIEW_PATH, LOGIN_PATH, auth_router, user_router};
