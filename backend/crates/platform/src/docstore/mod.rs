//! Document Store
//!
//! A minimal document database: named collections of JSON documents keyed
//! by UUID, queried by top-level field equality.
//!
//! Two backends sit behind one cheap-to-clone handle:
//! - PostgreSQL, one JSONB table (`documents`), for production
//! - an in-process map, selected with a `memory://` URL, for development and tests
//!
//! ## Usage
//! ```rust,ignore
//! let store = DocumentStore::connect("memory://", 1).await?;
//! let users = store.collection("users");
//! users.insert_one(id, &json!({ "email": "a@x.com" })).await?;
//! let found: Option<Document<Value>> = users.find_one(Filter::new().eq("email", "a@x.com")).await?;
//! ```

mod memory;
mod postgres;

use std::time::Duration;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;
use uuid::Uuid;

use memory::MemoryBackend;

/// Driver error type, re-exported so callers need no direct `sqlx` dependency
pub use sqlx::Error as SqlxError;

/// URL scheme selecting the in-process backend
pub const MEMORY_URL_SCHEME: &str = "memory:";

/// How long `connect` waits for the first PostgreSQL connection
const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

// ============================================================================
// Errors
// ============================================================================

pub type DocStoreResult<T> = Result<T, DocStoreError>;

/// Document store failure
#[derive(Debug, Error)]
pub enum DocStoreError {
    /// Query or connection failure
    #[error("database error: {0}")]
    Database(#[source] sqlx::Error),

    /// Schema migration failure (startup only)
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A unique constraint rejected the write
    #[error("duplicate document in collection {collection}")]
    Duplicate { collection: String },

    /// A stored document does not match the expected shape
    #[error("malformed document: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl DocStoreError {
    /// Whether the store itself is unreachable (as opposed to a bad query)
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DocStoreError::Database(
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
            )
        )
    }

    fn from_sqlx(collection: &str, err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                DocStoreError::Duplicate {
                    collection: collection.to_string(),
                }
            }
            _ => DocStoreError::Database(err),
        }
    }
}

// ============================================================================
// Documents and filters
// ============================================================================

/// A stored document with its key
#[derive(Debug, Clone, PartialEq)]
pub struct Document<T> {
    pub id: Uuid,
    pub body: T,
}

impl Document<Value> {
    fn decode<T: DeserializeOwned>(self) -> DocStoreResult<Document<T>> {
        Ok(Document {
            id: self.id,
            body: serde_json::from_value(self.body)?,
        })
    }
}

/// Top-level field equality filter
///
/// An empty filter matches every document in the collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter(Map<String, Value>);

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(field.into(), value.into());
        self
    }

    /// Whether `body` satisfies every condition
    pub fn matches(&self, body: &Value) -> bool {
        self.0
            .iter()
            .all(|(field, expected)| body.get(field) == Some(expected))
    }

    /// JSON object form, usable with the JSONB `@>` operator
    pub fn to_value(&self) -> Value {
        Value::Object(self.0.clone())
    }
}

// ============================================================================
// Store handle
// ============================================================================

#[derive(Clone)]
enum Backend {
    Postgres(PgPool),
    Memory(MemoryBackend),
}

/// Process-wide handle to the backing document database
///
/// Cloning is cheap: both backends are reference counted internally.
#[derive(Clone)]
pub struct DocumentStore {
    backend: Backend,
}

impl DocumentStore {
    /// Establish the store connection described by `url`
    ///
    /// `memory://` selects the in-process backend; anything else is handed
    /// to the PostgreSQL driver.
    pub async fn connect(url: &str, max_connections: u32) -> DocStoreResult<Self> {
        if url.starts_with(MEMORY_URL_SCHEME) {
            return Ok(Self::memory());
        }

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .acquire_timeout(CONNECT_TIMEOUT)
            .connect(url)
            .await
            .map_err(DocStoreError::Database)?;

        Ok(Self::from_pool(pool))
    }

    /// Fresh, empty in-process store
    pub fn memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryBackend::default()),
        }
    }

    pub fn from_pool(pool: PgPool) -> Self {
        Self {
            backend: Backend::Postgres(pool),
        }
    }

    pub fn backend_name(&self) -> &'static str {
        match self.backend {
            Backend::Postgres(_) => "postgres",
            Backend::Memory(_) => "memory",
        }
    }

    /// Apply pending schema migrations (no-op for the memory backend)
    pub async fn migrate(&self) -> DocStoreResult<()> {
        match &self.backend {
            Backend::Postgres(pool) => {
                sqlx::migrate!("../../../database/migrations")
                    .run(pool)
                    .await?;
                Ok(())
            }
            Backend::Memory(_) => Ok(()),
        }
    }

    pub fn collection(&self, name: &'static str) -> Collection<'_> {
        Collection { store: self, name }
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore")
            .field("backend", &self.backend_name())
            .finish()
    }
}

// ============================================================================
// Collections
// ============================================================================

/// One named collection of a [`DocumentStore`]
pub struct Collection<'a> {
    store: &'a DocumentStore,
    name: &'static str,
}

impl Collection<'_> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Insert a new document under `id`
    ///
    /// Fails with [`DocStoreError::Duplicate`] if `id` (or a uniquely indexed
    /// field) is already taken.
    pub async fn insert_one<T: Serialize>(&self, id: Uuid, body: &T) -> DocStoreResult<()> {
        let body = serde_json::to_value(body)?;
        match &self.store.backend {
            Backend::Postgres(pool) => postgres::insert(pool, self.name, id, body).await,
            Backend::Memory(mem) => mem.insert(self.name, id, body).await,
        }
    }

    pub async fn find_by_id<T: DeserializeOwned>(
        &self,
        id: Uuid,
    ) -> DocStoreResult<Option<Document<T>>> {
        let found = match &self.store.backend {
            Backend::Postgres(pool) => postgres::find_by_id(pool, self.name, id).await?,
            Backend::Memory(mem) => mem.find_by_id(self.name, id).await,
        };
        found.map(Document::decode).transpose()
    }

    /// First matching document, oldest first
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        filter: Filter,
    ) -> DocStoreResult<Option<Document<T>>> {
        let found = match &self.store.backend {
            Backend::Postgres(pool) => postgres::find_one(pool, self.name, &filter).await?,
            Backend::Memory(mem) => mem.find_one(self.name, &filter).await,
        };
        found.map(Document::decode).transpose()
    }

    /// All matching documents, newest first
    pub async fn find<T: DeserializeOwned>(
        &self,
        filter: Filter,
    ) -> DocStoreResult<Vec<Document<T>>> {
        let found = match &self.store.backend {
            Backend::Postgres(pool) => postgres::find(pool, self.name, &filter).await?,
            Backend::Memory(mem) => mem.find(self.name, &filter).await,
        };
        found.into_iter().map(Document::decode).collect()
    }

    /// Merge the top-level fields of `patch` into the document
    ///
    /// Returns `false` if no document has this `id`.
    pub async fn update_by_id<T: Serialize>(&self, id: Uuid, patch: &T) -> DocStoreResult<bool> {
        let patch = serde_json::to_value(patch)?;
        match &self.store.backend {
            Backend::Postgres(pool) => postgres::update(pool, self.name, id, patch).await,
            Backend::Memory(mem) => Ok(mem.update(self.name, id, patch).await),
        }
    }

    /// Returns `false` if no document has this `id`.
    pub async fn delete_by_id(&self, id: Uuid) -> DocStoreResult<bool> {
        match &self.store.backend {
            Backend::Postgres(pool) => postgres::delete(pool, self.name, id).await,
            Backend::Memory(mem) => Ok(mem.delete(self.name, id).await),
        }
    }
}
