//! Typed access to one kind of document.

use super::{EntityKind, EntityStore, Filter, StoreError, StoreResult};
use chrono::{DateTime, Utc};
use mras_uuid::EntityId;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

/// A model type persisted as a store document.
pub trait Document: Serialize + DeserializeOwned + Send + Sync {
    const KIND: EntityKind;

    fn id(&self) -> EntityId;

    fn created_at(&self) -> DateTime<Utc>;
}

/// Serializes model types in and out of the untyped store.
///
/// Listings come back oldest first. Updates stamp `updatedAt` on every patch.
pub struct Collection<T> {
    store: Arc<dyn EntityStore>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Document> Collection<T> {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self {
            store,
            _marker: PhantomData,
        }
    }

    fn decode(doc: Value) -> StoreResult<T> {
        serde_json::from_value(doc).map_err(StoreError::Deserialization)
    }

    pub async fn insert(&self, item: &T) -> StoreResult<T> {
        let doc = serde_json::to_value(item).map_err(StoreError::Serialization)?;
        let stored = self.store.insert(T::KIND, item.id(), doc).await?;
        Self::decode(stored)
    }

    pub async fn find_by_id(&self, id: EntityId) -> StoreResult<Option<T>> {
        self.store
            .find_by_id(T::KIND, id)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn find_one(&self, filter: &Filter) -> StoreResult<Option<T>> {
        self.store
            .find_one(T::KIND, filter)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn find_many(&self, filter: &Filter) -> StoreResult<Vec<T>> {
        let mut items = self
            .store
            .find_many(T::KIND, filter)
            .await?
            .into_iter()
            .map(Self::decode)
            .collect::<StoreResult<Vec<T>>>()?;
        items.sort_by(|a, b| {
            a.created_at()
                .cmp(&b.created_at())
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(items)
    }

    /// Applies a partial update. `patch` must serialize to a JSON object; fields it omits are
    /// left as stored.
    pub async fn update_by_id<P: Serialize>(&self, id: EntityId, patch: &P) -> StoreResult<Option<T>> {
        let mut patch = match serde_json::to_value(patch).map_err(StoreError::Serialization)? {
            Value::Object(map) => map,
            _ => return Err(StoreError::NotAnObject),
        };
        patch.insert(
            "updatedAt".into(),
            serde_json::to_value(Utc::now()).map_err(StoreError::Serialization)?,
        );

        self.store
            .update_by_id(T::KIND, id, patch)
            .await?
            .map(Self::decode)
            .transpose()
    }

    pub async fn delete_by_id(&self, id: EntityId) -> StoreResult<bool> {
        self.store.delete_by_id(T::KIND, id).await
    }
}
