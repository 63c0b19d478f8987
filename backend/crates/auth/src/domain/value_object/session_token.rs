//! Session Token Value Object
//!
//! The serialized user reference held by a server-side session.

use kernel::id::UserId;
use std::fmt;

/// Compact, opaque reference to a user, stored in the session store
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn for_user(user_id: &UserId) -> Self {
        Self(user_id.to_string())
    }

    /// Wrap a raw token as read back from storage
    pub fn from_raw(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
