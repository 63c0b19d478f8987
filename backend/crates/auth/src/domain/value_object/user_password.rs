//! User Password Value Object
//!
//! Domain value object for user passwords.
//! Delegates to `platform::password` for cryptographic operations.
//!
//! ## Usage
//! ```rust,ignore
//! use auth::domain::value_object::user_password::{UserPassword, RawPassword};
//! use platform::password::PasswordPolicy;
//!
//! // Registration: validated against the configured policy
//! let raw = RawPassword::new("p1".to_string(), PasswordPolicy::Basic)?;
//! let hashed = UserPassword::from_raw(&raw, None)?;
//!
//! // Login: no policy, the stored hash decides
//! assert!(hashed.verify(&RawPassword::for_login("p1".to_string()), None));
//! ```

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    ClearTextPassword, HashedPassword, PasswordPolicy, PasswordPolicyError,
    verify_against_dummy,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Raw password from user input
///
/// Memory is automatically zeroized when dropped.
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    /// Create a password for a new account
    ///
    /// ## Errors
    /// Returns `AppError` with a user-facing message and suggested action
    pub fn new(raw: String, policy: PasswordPolicy) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw, policy).map_err(|e| {
            let action = match e {
                PasswordPolicyError::TooShort { .. } => "Please choose a longer password",
                PasswordPolicyError::TooLong { .. } => "Please choose a shorter password",
                PasswordPolicyError::EmptyOrWhitespace => "Please enter a password",
                PasswordPolicyError::InvalidCharacter => {
                    "Please remove any special control characters"
                }
                PasswordPolicyError::CommonPattern => "Please choose a more unique password",
            };
            AppError::bad_request(e.to_string()).with_action(action)
        })?;

        Ok(Self(clear_text))
    }

    /// Wrap a submitted login password (never rejected)
    pub fn for_login(raw: String) -> Self {
        Self(ClearTextPassword::for_verification(raw))
    }

    /// Burn one hash verification without any account to check against
    pub fn verify_against_nothing(&self, pepper: Option<&[u8]>) -> bool {
        verify_against_dummy(&self.0, pepper)
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Hashed, for storage)
// ============================================================================

/// Hashed user password, Argon2id PHC string format
#[derive(Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Create from raw password by hashing
    pub fn from_raw(raw: &RawPassword, pepper: Option<&[u8]>) -> AppResult<Self> {
        let hashed = raw
            .0
            .hash(pepper)
            .map_err(|e| AppError::internal(e.to_string()))?;

        Ok(Self(hashed))
    }

    /// Create from a stored PHC string
    pub fn from_phc_string(phc_string: impl Into<String>) -> AppResult<Self> {
        let hashed = HashedPassword::from_phc_string(phc_string)
            .map_err(|_| AppError::internal("Invalid password hash in credential store"))?;

        Ok(Self(hashed))
    }

    pub fn as_phc_string(&self) -> &str {
        self.0.as_phc_string()
    }

    /// Verify a raw password against this hash (constant time)
    pub fn verify(&self, raw: &RawPassword, pepper: Option<&[u8]>) -> bool {
        self.0.verify(&raw.0, pepper)
    }
}

impl fmt::Debug for UserPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UserPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}
