//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Authenticator, session serializer, use cases
//! - `infra/` - Credential store (document store) and session store (memory)
//! - `presentation/` - HTTP handlers, request context, middleware, router
//!
//! ## Features
//! - Registration and login with email + password (HTML forms)
//! - Server-side sessions referenced by an HMAC-signed cookie
//! - Per-request identity resolution and an authentication gate
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional pepper
//! - Unknown emails cost the same as wrong passwords and get the same message
//! - Sessions fail closed: a session whose user is gone is deleted

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::spawn_session_sweeper;
pub use error::{AuthError, AuthResult};
pub use infra::{DocUserRepository, MemorySessionStore};
pub use presentation::router::{auth_router, user_router};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod config {
    pub use crate::application::config::*;
}

pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod handlers {
    pub use crate::presentation::handlers::*;
}

pub mod router {
    pub use crate::presentation::router::*;
}

pub mod middleware {
    pub use crate::presentation::context::{CurrentUser, RequestContext};
    pub use crate::presentation::middleware::*;
}
