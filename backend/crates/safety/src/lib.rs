//! Safety Backend Module
//!
//! Safety-card reports and the hazard radar.
//!
//! - `domain/` - Safety card and hazard entities, repository traits
//! - `application/` - Report and radar use cases
//! - `infra/` - Document store repositories
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

pub use error::{SafetyError, SafetyResult};
pub use presentation::router::safety_router;
