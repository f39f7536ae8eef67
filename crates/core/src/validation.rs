//! Pre-write validation of cross-entity references.
//!
//! Before any write that points at other entities by id, every referenced id must resolve to an
//! existing document of the expected kind. Checks run in the order references were added and
//! the first missing one is reported as `MrasError::NotFound(role)`, so callers add the primary
//! subject first, then actors, then locations.
//!
//! Validation only reads. The dependent write happens in a separate store call afterwards.

use crate::store::{EntityKind, EntityStore, Filter};
use crate::{MrasError, MrasResult};
use mras_uuid::EntityId;

/// An ordered set of `(role, kind, id)` references to check.
#[derive(Clone, Debug, Default)]
pub struct References {
    entries: Vec<(&'static str, EntityKind, EntityId)>,
}

impl References {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require(mut self, role: &'static str, kind: EntityKind, id: EntityId) -> Self {
        self.entries.push((role, kind, id));
        self
    }

    /// Adds the reference only when an id is present.
    pub fn optional(self, role: &'static str, kind: EntityKind, id: Option<EntityId>) -> Self {
        match id {
            Some(id) => self.require(role, kind, id),
            None => self,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Confirms every reference resolves, failing on the first that does not.
pub async fn validate_references(store: &dyn EntityStore, refs: &References) -> MrasResult<()> {
    for (role, kind, id) in &refs.entries {
        if store.find_by_id(*kind, *id).await?.is_none() {
            tracing::debug!("reference {} ({} {}) does not resolve", role, kind, id);
            return Err(MrasError::NotFound((*role).to_string()));
        }
    }
    Ok(())
}

/// A referral must move the patient to a different hospital.
pub fn ensure_distinct_hospitals(referring: EntityId, destination: EntityId) -> MrasResult<()> {
    if referring == destination {
        return Err(MrasError::InvalidReferral("same hospital".into()));
    }
    Ok(())
}

/// Fails with `AlreadyRegistered` if a profile of `kind` already exists for `user`.
///
/// Applies to doctor and patient profiles, which both carry a `user` field.
pub async fn ensure_not_registered(
    store: &dyn EntityStore,
    kind: EntityKind,
    user: EntityId,
) -> MrasResult<()> {
    let filter = Filter::new().eq_id("user", user);
    if store.find_one(kind, &filter).await?.is_some() {
        return Err(MrasError::AlreadyRegistered(capitalise(kind.label())));
    }
    Ok(())
}

fn capitalise(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
