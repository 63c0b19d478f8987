//! Document Store Repository Implementations

use chrono::{DateTime, Utc};
use platform::docstore::{DocStoreError, Document, DocumentStore, Filter};
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{UserId, email::Email, user_password::UserPassword};
use crate::error::{AuthError, AuthResult};

/// Collection holding one document per registered user
pub const USERS_COLLECTION: &str = "users";

/// Stored shape of a user
#[derive(Debug, Serialize, Deserialize)]
struct UserDocument {
    email: String,
    password_hash: String,
    created_at: DateTime<Utc>,
}

impl From<&User> for UserDocument {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.as_str().to_string(),
            password_hash: user.password_hash.as_phc_string().to_string(),
            created_at: user.created_at,
        }
    }
}

impl TryFrom<Document<UserDocument>> for User {
    type Error = AuthError;

    fn try_from(doc: Document<UserDocument>) -> AuthResult<Self> {
        let email = Email::new(&doc.body.email)
            .map_err(|e| AuthError::Internal(format!("stored email for {}: {e}", doc.id)))?;
        let password_hash = UserPassword::from_phc_string(doc.body.password_hash)
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        Ok(User {
            user_id: UserId::from_uuid(doc.id),
            email,
            password_hash,
            created_at: doc.body.created_at,
        })
    }
}

/// Credential store backed by the `users` collection
#[derive(Clone, Debug)]
pub struct DocUserRepository {
    store: DocumentStore,
}

impl DocUserRepository {
    pub fn new(store: DocumentStore) -> Self {
        Self { store }
    }
}

impl UserRepository for DocUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        self.store
            .collection(USERS_COLLECTION)
            .insert_one(user.user_id.into_uuid(), &UserDocument::from(user))
            .await
            .map_err(|e| match e {
                DocStoreError::Duplicate { .. } => AuthError::EmailTaken,
                other => AuthError::Store(other),
            })
    }

    async fn find_by_id(&self, user_id: &UserId) -> AuthResult<Option<User>> {
        let doc = self
            .store
            .collection(USERS_COLLECTION)
            .find_by_id::<UserDocument>(user_id.into_uuid())
            .await?;

        doc.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let doc = self
            .store
            .collection(USERS_COLLECTION)
            .find_one::<UserDocument>(Filter::new().eq("email", email.as_str()))
            .await?;

        doc.map(User::try_from).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn delete(&self, user_id: &UserId) -> AuthResult<bool> {
        Ok(self
            .store
            .collection(USERS_COLLECTION)
            .delete_by_id(user_id.into_uuid())
            .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;
    use platform::password::PasswordPolicy;

    fn user(email: &str) -> User {
        let raw = RawPassword::new("p1".to_string(), PasswordPolicy::Basic).unwrap();
        User::new(
            Email::new(email).unwrap(),
            UserPassword::from_raw(&raw, None).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let repo = DocUserRepository::new(DocumentStore::memory());
        let alice = user("alice@example.com");
        repo.create(&alice).await.unwrap();

        let by_email = repo
            .find_by_email(&Email::new("Alice@Example.com").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(by_email.user_id, alice.user_id);

        let by_id = repo.find_by_id(&alice.user_id).await.unwrap().unwrap();
        assert_eq!(by_id.email, alice.email);
        assert_eq!(by_id.password_hash, alice.password_hash);

        assert!(repo.exists_by_email(&alice.email).await.unwrap());
        assert!(
            !repo
                .exists_by_email(&Email::new("bob@example.com").unwrap())
                .await
                .unwrap()
        );
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = DocUserRepository::new(DocumentStore::memory());
        let alice = user("alice@example.com");
        repo.create(&alice).await.unwrap();

        assert!(repo.delete(&alice.user_id).await.unwrap());
        assert!(repo.find_by_id(&alice.user_id).await.unwrap().is_none());
        assert!(!repo.delete(&alice.user_id).await.unwrap());
    }
}
