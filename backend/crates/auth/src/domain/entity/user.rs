//! User Entity
//!
//! A registered account: the login email and the salted password hash.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{email::Email, user_password::UserPassword, UserId};

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    /// Internal UUID identifier
    pub user_id: UserId,
    /// Login key (unique)
    pub email: Email,
    /// Argon2id hash
    pub password_hash: UserPassword,
    /// Created timestamp
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user
    pub fn new(email: Email, password_hash: UserPassword) -> Self {
        Self {
            user_id: UserId::new(),
            email,
            password_hash,
            created_at: Utc::now(),
        }
    }
}
