//! Authenticator
//!
//! Checks an email/password pair against the credential store.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Credential verification
pub struct Authenticator<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> Authenticator<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    /// Returns the matching user, or `InvalidCredentials`
    ///
    /// Unknown emails cost one hash verification, same as a wrong password.
    /// Store failures are returned as `AuthError::Store`.
    pub async fn authenticate(&self, email: &str, password: String) -> AuthResult<User> {
        let password = RawPassword::for_login(password);

        let user = match Email::new(email) {
            Ok(email) => self.user_repo.find_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(user) = user else {
            password.verify_against_nothing(self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::{UserId, user_password::UserPassword};
    use crate::infra::DocUserRepository;
    use platform::docstore::{DocStoreError, DocumentStore, SqlxError};
    use platform::password::PasswordPolicy;

    async fn registered(email: &str, password: &str) -> (Arc<DocUserRepository>, User) {
        let repo = Arc::new(DocUserRepository::new(DocumentStore::memory()));
        let raw = RawPassword::new(password.to_string(), PasswordPolicy::Basic).unwrap();
        let user = User::new(
            Email::new(email).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        );
        repo.create(&user).await.unwrap();
        (repo, user)
    }

    #[tokio::test]
    async fn test_correct_password() {
        let (repo, user) = registered("a@x.com", "p1").await;
        let auth = Authenticator::new(repo, Arc::new(AuthConfig::development()));

        let found = auth.authenticate("a@x.com", "p1".into()).await.unwrap();
        assert_eq!(found.user_id, user.user_id);

        // Lookup is case-insensitive on the email
        let found = auth.authenticate(" A@X.COM", "p1".into()).await.unwrap();
        assert_eq!(found.user_id, user.user_id);
    }

    #[tokio::test]
    async fn test_wrong_password_and_unknown_email_look_the_same() {
        let (repo, _) = registered("a@x.com", "p1").await;
        let auth = Authenticator::new(repo, Arc::new(AuthConfig::development()));

        let wrong = auth.authenticate("a@x.com", "wrong".into()).await.unwrap_err();
        let unknown = auth.authenticate("b@x.com", "p1".into()).await.unwrap_err();
        let malformed = auth.authenticate("not an email", "p1".into()).await.unwrap_err();

        for err in [&wrong, &unknown, &malformed] {
            assert!(matches!(err, AuthError::InvalidCredentials));
        }
        assert_eq!(wrong.to_string(), unknown.to_string());
    }

    /// Credential store that is always down
    struct BrokenRepo;

    impl UserRepository for BrokenRepo {
        async fn create(&self, _user: &User) -> AuthResult<()> {
            Err(DocStoreError::Database(SqlxError::PoolTimedOut).into())
        }
        async fn find_by_id(&self, _user_id: &UserId) -> AuthResult<Option<User>> {
            Err(DocStoreError::Database(SqlxError::PoolTimedOut).into())
        }
        async fn find_by_email(&self, _email: &Email) -> AuthResult<Option<User>> {
            Err(DocStoreError::Database(SqlxError::PoolTimedOut).into())
        }
        async fn exists_by_email(&self, _email: &Email) -> AuthResult<bool> {
            Err(DocStoreError::Database(SqlxError::PoolTimedOut).into())
        }
        async fn delete(&self, _user_id: &UserId) -> AuthResult<bool> {
            Err(DocStoreError::Database(SqlxError::PoolTimedOut).into())
        }
    }

    #[tokio::test]
    async fn test_store_failure_is_not_a_wrong_password() {
        let auth = Authenticator::new(Arc::new(BrokenRepo), Arc::new(AuthConfig::development()));
        let err = auth.authenticate("a@x.com", "p1".into()).await.unwrap_err();
        assert!(matches!(err, AuthError::Store(_)));
    }
}
