//! Session Serializer
//!
//! Converts an authenticated user to and from the token kept in the
//! session store. The token is the user ID and nothing else.

use std::sync::Arc;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, session_token::SessionToken};
use crate::error::{AuthError, AuthResult};

pub struct SessionSerializer<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> SessionSerializer<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub fn serialize(&self, user: &User) -> SessionToken {
        SessionToken::for_user(&user.user_id)
    }

    /// Resolve a token back to its user
    ///
    /// Unparseable tokens and deleted users are `SessionInvalid`.
    pub async fn deserialize(&self, token: &SessionToken) -> AuthResult<User> {
        let user_id = UserId::parse_str(token.as_str()).map_err(|_| AuthError::SessionInvalid)?;

        self.user_repo
            .find_by_id(&user_id)
            .await?
            .ok_or(AuthError::SessionInvalid)
    }
}
