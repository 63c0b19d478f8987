//! Session Entity
//!
//! Server-side session. The cookie only carries the (signed) session ID;
//! everything else stays here.

use chrono::{DateTime, Duration, Utc};

use crate::domain::value_object::{SessionId, session_token::SessionToken};
use crate::error::{AuthError, AuthResult};

/// Session entity
#[derive(Debug, Clone)]
pub struct Session {
    /// Session ID (UUID v4)
    pub session_id: SessionId,
    /// Serialized reference to the signed-in user
    pub token: SessionToken,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl Session {
    /// Create a new session
    ///
    /// TTL is provided by the application layer (config), not hard-coded here.
    /// A TTL that pushes the expiry past the representable range is an error.
    pub fn new(token: SessionToken, ttl: Duration) -> AuthResult<Self> {
        let now = Utc::now();
        let expires_at = now
            .checked_add_signed(ttl)
            .ok_or_else(|| AuthError::Internal(format!("Session TTL out of range: {ttl}")))?;

        Ok(Self {
            session_id: SessionId::new(),
            token,
            expires_at_ms: expires_at.timestamp_millis(),
            created_at: now,
        })
    }

    /// Check if session has expired
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now().timestamp_millis())
    }

    pub fn is_expired_at(&self, now_ms: i64) -> bool {
        now_ms > self.expires_at_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::id::UserId;

    #[test]
    fn test_new_session_is_live() {
        let session =
            Session::new(SessionToken::for_user(&UserId::new()), Duration::hours(1)).unwrap();
        assert!(!session.is_expired());
        assert!(session.expires_at_ms > session.created_at.timestamp_millis());
    }

    #[test]
    fn test_expiry_boundary() {
        let session = Session::new(SessionToken::for_user(&UserId::new()), Duration::zero()).unwrap();
        assert!(!session.is_expired_at(session.expires_at_ms));
        assert!(session.is_expired_at(session.expires_at_ms + 1));
    }

    #[test]
    fn test_unrepresentable_expiry_is_an_error() {
        let ttl = Duration::seconds(1_000_000_000_000_000);
        assert!(matches!(
            Session::new(SessionToken::for_user(&UserId::new()), ttl),
            Err(AuthError::Internal(_))
        ));
    }
}
