//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod check_session;
pub mod config;
pub mod session_cookie;
pub mod session_serializer;
pub mod session_sweeper;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use authenticate::Authenticator;
pub use check_session::CheckSessionUseCase;
pub use config::AuthConfig;
pub use session_serializer::SessionSerializer;
pub use session_sweeper::spawn_session_sweeper;
pub use sign_in::{SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpOutput, SignUpUseCase};
