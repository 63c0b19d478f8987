//! In-process document backend

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{DocStoreError, DocStoreResult, Document, Filter};

/// Collections kept in insertion order (oldest first)
#[derive(Clone, Default)]
pub(super) struct MemoryBackend {
    collections: Arc<RwLock<HashMap<String, Vec<Document<Value>>>>>,
}

impl MemoryBackend {
    pub(super) async fn insert(&self, collection: &str, id: Uuid, body: Value) -> DocStoreResult<()> {
        let mut collections = self.collections.write().await;
        let docs = collections.entry(collection.to_string()).or_default();

        if docs.iter().any(|doc| doc.id == id) {
            return Err(DocStoreError::Duplicate {
                collection: collection.to_string(),
            });
        }

        docs.push(Document { id, body });
        Ok(())
    }

    pub(super) async fn find_by_id(&self, collection: &str, id: Uuid) -> Option<Document<Value>> {
        let collections = self.collections.read().await;
        collections
            .get(collection)?
            .iter()
            .find(|doc| doc.id == id)
            .cloned()
    }

    pub(super) async fn find_one(&self, collection: &str, filter: &Filter) -> Option<Document<Value>> {
        let collections = self.collections.read().await;
        collections
            .get(collection)?
            .iter()
            .find(|doc| filter.matches(&doc.body))
            .cloned()
    }

    pub(super) async fn find(&self, collection: &str, filter: &Filter) -> Vec<Document<Value>> {
        let collections = self.collections.read().await;
        collections
            .get(collection)
            .map(|docs| {
                docs.iter()
                    .rev()
                    .filter(|doc| filter.matches(&doc.body))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(super) async fn update(&self, collection: &str, id: Uuid, patch: Value) -> bool {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections
            .get_mut(collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
        else {
            return false;
        };

        match (&mut doc.body, patch) {
            (Value::Object(body), Value::Object(patch)) => body.extend(patch),
            (body, patch) => *body = patch,
        }
        true
    }

    pub(super) async fn delete(&self, collection: &str, id: Uuid) -> bool {
        let mut collections = self.collections.write().await;
        let Some(docs) = collections.get_mut(collection) else {
            return false;
        };

        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        docs.len() != before
    }
}
