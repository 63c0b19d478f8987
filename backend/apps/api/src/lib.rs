//! Safety-card API server
//!
//! Wires the auth and safety crates into one axum application.

pub mod app;
pub mod config;
pub mod startup;

pub use app::build_router;
pub use config::{AppConfig, ConfigError};
pub use startup::{Server, StartupError};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
