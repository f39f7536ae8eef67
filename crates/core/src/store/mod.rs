//! Entity store abstraction.
//!
//! The store is the persistence collaborator for every MRAS entity: a document database keyed
//! by entity kind and id, offering create, find-by-id, find-by-filter, update and delete. Core
//! services receive it as an injected `Arc<dyn EntityStore>` handle rather than reaching for a
//! process-wide connection.
//!
//! Documents are plain JSON objects. [`Collection`] layers typed access on top for the model
//! structs; the validation workflow works directly against the untyped trait because it only
//! needs to know whether an id resolves.
//!
//! No transaction spans two store calls. A document deleted between an existence check and a
//! dependent write is not detected.

mod collection;
mod file;
mod memory;

pub use collection::{Collection, Document};
pub use file::FileStore;
pub use memory::MemoryStore;

use crate::constants::{
    APPOINTMENTS_COLLECTION, DOCTORS_COLLECTION, HOSPITALS_COLLECTION, PATIENTS_COLLECTION,
    REFERRALS_COLLECTION, USERS_COLLECTION,
};
use async_trait::async_trait;
use mras_uuid::EntityId;
use serde_json::{Map, Value};
use std::fmt;

/// The kinds of document held by the store.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    User,
    Hospital,
    Doctor,
    Patient,
    Appointment,
    Referral,
}

impl EntityKind {
    /// Collection (directory) name for this kind.
    pub fn collection(&self) -> &'static str {
        match self {
            EntityKind::User => USERS_COLLECTION,
            EntityKind::Hospital => HOSPITALS_COLLECTION,
            EntityKind::Doctor => DOCTORS_COLLECTION,
            EntityKind::Patient => PATIENTS_COLLECTION,
            EntityKind::Appointment => APPOINTMENTS_COLLECTION,
            EntityKind::Referral => REFERRALS_COLLECTION,
        }
    }

    /// Lowercase singular name, used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            EntityKind::User => "user",
            EntityKind::Hospital => "hospital",
            EntityKind::Doctor => "doctor",
            EntityKind::Patient => "patient",
            EntityKind::Appointment => "appointment",
            EntityKind::Referral => "referral",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read document: {0}")]
    Read(std::io::Error),
    #[error("failed to write document: {0}")]
    Write(std::io::Error),
    #[error("failed to delete document: {0}")]
    Delete(std::io::Error),
    #[error("failed to create storage directory: {0}")]
    DirCreation(std::io::Error),
    #[error("failed to serialize document: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize document: {0}")]
    Deserialization(serde_json::Error),
    #[error("document must be a JSON object")]
    NotAnObject,
    #[error("{kind} {id} already exists")]
    DuplicateId { kind: EntityKind, id: EntityId },
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// A conjunction of equality terms over top-level document fields.
///
/// An empty filter matches every document of the queried kind.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Filter {
    terms: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a `field == value` term.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.terms.push((field.into(), value.into()));
        self
    }

    /// Adds a `field == id` term, comparing against the canonical id string.
    pub fn eq_id(self, field: impl Into<String>, id: EntityId) -> Self {
        self.eq(field, id.to_string())
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    /// Returns true if every term matches the document.
    pub fn matches(&self, doc: &Value) -> bool {
        self.terms
            .iter()
            .all(|(field, expected)| doc.get(field) == Some(expected))
    }
}

/// Persistence collaborator exposing CRUD over JSON documents.
///
/// Every call is independent; implementations are not required to order or isolate concurrent
/// calls beyond keeping each individual document write intact.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Stores a new document under `id`. The document must be a JSON object.
    async fn insert(&self, kind: EntityKind, id: EntityId, doc: Value) -> StoreResult<Value>;

    async fn find_by_id(&self, kind: EntityKind, id: EntityId) -> StoreResult<Option<Value>>;

    /// Returns the first matching document. Which one is first is unspecified when several match.
    async fn find_one(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Option<Value>>;

    async fn find_many(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Vec<Value>>;

    /// Merges the top-level fields of `patch` into the stored document and returns the result,
    /// or `None` if no document has that id.
    async fn update_by_id(
        &self,
        kind: EntityKind,
        id: EntityId,
        patch: Map<String, Value>,
    ) -> StoreResult<Option<Value>>;

    /// Returns true if a document was removed.
    async fn delete_by_id(&self, kind: EntityKind, id: EntityId) -> StoreResult<bool>;
}

/// Shallow merge: each key in `patch` replaces the same key in `doc`.
pub(crate) fn apply_patch(doc: &mut Value, patch: Map<String, Value>) -> StoreResult<()> {
    let target = doc.as_object_mut().ok_or(StoreError::NotAnObject)?;
    for (key, value) in patch {
        target.insert(key, value);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::new().matches(&json!({"any": "thing"})));
    }

    #[test]
    fn filter_requires_every_term() {
        let filter = Filter::new()
            .eq("name", "St Mary's")
            .eq("location", "London");

        assert!(filter.matches(&json!({"name": "St Mary's", "location": "London", "x": 1})));
        assert!(!filter.matches(&json!({"name": "St Mary's", "location": "Leeds"})));
        assert!(!filter.matches(&json!({"name": "St Mary's"})));
    }

    #[test]
    fn filter_eq_id_uses_canonical_form() {
        let id = EntityId::new();
        let filter = Filter::new().eq_id("patient", id);
        assert!(filter.matches(&json!({"patient": id.to_string()})));
    }

    #[test]
    fn apply_patch_replaces_only_given_keys() {
        let mut doc = json!({"status": "pending", "reason": "checkup"});
        let mut patch = Map::new();
        patch.insert("status".into(), json!("approved"));

        apply_patch(&mut doc, patch).unwrap();
        assert_eq!(doc, json!({"status": "approved", "reason": "checkup"}));
    }

    #[test]
    fn apply_patch_rejects_non_objects() {
        let mut doc = json!(["not", "an", "object"]);
        assert!(matches!(
            apply_patch(&mut doc, Map::new()),
            Err(StoreError::NotAnObject)
        ));
    }
}
