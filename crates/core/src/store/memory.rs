//! In-process entity store.

use super::{apply_patch, EntityKind, EntityStore, Filter, StoreError, StoreResult};
use async_trait::async_trait;
use mras_uuid::EntityId;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;

type Documents = HashMap<EntityId, Value>;

/// Entity store backed by process-local maps.
///
/// Used by tests and by deployments that select the `memory` backend. Contents are lost when
/// the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<EntityKind, Documents>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents of `kind`.
    pub async fn count(&self, kind: EntityKind) -> usize {
        self.collections
            .read()
            .await
            .get(&kind)
            .map(HashMap::len)
            .unwrap_or(0)
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn insert(&self, kind: EntityKind, id: EntityId, doc: Value) -> StoreResult<Value> {
        if !doc.is_object() {
            return Err(StoreError::NotAnObject);
        }

        let mut collections = self.collections.write().await;
        let documents = collections.entry(kind).or_default();
        if documents.contains_key(&id) {
            return Err(StoreError::DuplicateId { kind, id });
        }
        documents.insert(id, doc.clone());
        Ok(doc)
    }

    async fn find_by_id(&self, kind: EntityKind, id: EntityId) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections.get(&kind).and_then(|docs| docs.get(&id)).cloned())
    }

    async fn find_one(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Option<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&kind)
            .and_then(|docs| docs.values().find(|doc| filter.matches(doc)))
            .cloned())
    }

    async fn find_many(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Vec<Value>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(&kind)
            .map(|docs| {
                docs.values()
                    .filter(|doc| filter.matches(doc))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn update_by_id(
        &self,
        kind: EntityKind,
        id: EntityId,
        patch: Map<String, Value>,
    ) -> StoreResult<Option<Value>> {
        let mut collections = self.collections.write().await;
        let Some(doc) = collections.get_mut(&kind).and_then(|docs| docs.get_mut(&id)) else {
            return Ok(None);
        };

        // Patch a copy so a failed merge leaves the stored document untouched.
        let mut updated = doc.clone();
        apply_patch(&mut updated, patch)?;
        *doc = updated.clone();
        Ok(Some(updated))
    }

    async fn delete_by_id(&self, kind: EntityKind, id: EntityId) -> StoreResult<bool> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(&kind)
            .map(|docs| docs.remove(&id).is_some())
            .unwrap_or(false))
    }
}
