//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

// ============================================================================
// Forms
// ============================================================================

/// Registration form
///
/// Capitalized field names are accepted too. Missing fields come through
/// empty so validation, not the extractor, reports them.
#[derive(Deserialize)]
pub struct RegisterForm {
    #[serde(default, alias = "Email")]
    pub email: String,
    #[serde(default, alias = "Password")]
    pub password: String,
}

/// Login form
#[derive(Deserialize)]
pub struct LoginForm {
    #[serde(default, alias = "Email")]
    pub email: String,
    #[serde(default, alias = "Password")]
    pub password: String,
}

// ============================================================================
// User Info (for authenticated users)
// ============================================================================

/// Current user info response (never includes the password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetailsResponse {
    pub id: String,
    pub email: String,
}
