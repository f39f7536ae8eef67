//! File-backed entity store.
//!
//! ## Storage Layout
//!
//! Each document is a JSON file in a sharded directory derived from its id:
//!
//! ```text
//! <data_dir>/
//!   referrals/
//!     <s1>/
//!       <s2>/
//!         <id>/
//!           document.json
//! ```
//!
//! where `s1` and `s2` are the first four hex characters of the id. Each write lands in its own
//! uniquely named sibling temporary file that is renamed over `document.json`, so readers never
//! observe a half-written document and overlapping writers never share a temporary file.

use super::{apply_patch, EntityKind, EntityStore, Filter, StoreError, StoreResult};
use crate::constants::{DOCUMENT_FILENAME, DOCUMENT_TMP_SUFFIX};
use async_trait::async_trait;
use mras_uuid::EntityId;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Clone, Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    /// Opens a store rooted at `root`, creating the directory if needed.
    pub async fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .await
            .map_err(StoreError::DirCreation)?;
        Ok(Self { root })
    }

    fn document_dir(&self, kind: EntityKind, id: EntityId) -> PathBuf {
        id.sharded_dir(&self.root.join(kind.collection()))
    }

    fn document_path(&self, kind: EntityKind, id: EntityId) -> PathBuf {
        self.document_dir(kind, id).join(DOCUMENT_FILENAME)
    }

    async fn read_document(path: &Path) -> StoreResult<Option<Value>> {
        match fs::read(path).await {
            Ok(bytes) => serde_json::from_slice(&bytes)
                .map(Some)
                .map_err(StoreError::Deserialization),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Read(e)),
        }
    }

    async fn write_document(dir: &Path, doc: &Value) -> StoreResult<()> {
        fs::create_dir_all(dir)
            .await
            .map_err(StoreError::DirCreation)?;

        let raw = serde_json::to_vec_pretty(doc).map_err(StoreError::Serialization)?;
        let final_path = dir.join(DOCUMENT_FILENAME);
        let tmp_path = dir.join(format!(
            "{}.{}{}",
            DOCUMENT_FILENAME,
            EntityId::new(),
            DOCUMENT_TMP_SUFFIX
        ));

        fs::write(&tmp_path, raw).await.map_err(StoreError::Write)?;
        if let Err(e) = fs::rename(&tmp_path, &final_path).await {
            let _ = fs::remove_file(&tmp_path).await;
            return Err(StoreError::Write(e));
        }
        Ok(())
    }

    /// Reads every document of `kind`, skipping files that cannot be read or parsed.
    async fn list_documents(&self, kind: EntityKind) -> Vec<Value> {
        let mut documents = Vec::new();
        let collection_dir = self.root.join(kind.collection());

        for s1_path in child_dirs(&collection_dir).await {
            for s2_path in child_dirs(&s1_path).await {
                for id_path in child_dirs(&s2_path).await {
                    let doc_path = id_path.join(DOCUMENT_FILENAME);
                    match Self::read_document(&doc_path).await {
                        Ok(Some(doc)) => documents.push(doc),
                        Ok(None) => continue,
                        Err(e) => {
                            tracing::warn!(
                                "skipping unreadable document: {} - {}",
                                doc_path.display(),
                                e
                            );
                        }
                    }
                }
            }
        }

        documents
    }
}

async fn child_dirs(path: &Path) -> Vec<PathBuf> {
    let mut dirs = Vec::new();
    let Ok(mut entries) = fs::read_dir(path).await else {
        return dirs;
    };

    while let Ok(Some(entry)) = entries.next_entry().await {
        let is_dir = entry
            .file_type()
            .await
            .map(|t| t.is_dir())
            .unwrap_or(false);
        if is_dir {
            dirs.push(entry.path());
        }
    }

    dirs
}

#[async_trait]
impl EntityStore for FileStore {
    async fn insert(&self, kind: EntityKind, id: EntityId, doc: Value) -> StoreResult<Value> {
        if !doc.is_object() {
            return Err(StoreError::NotAnObject);
        }

        let path = self.document_path(kind, id);
        if fs::try_exists(&path).await.map_err(StoreError::Read)? {
            return Err(StoreError::DuplicateId { kind, id });
        }

        Self::write_document(&self.document_dir(kind, id), &doc).await?;
        Ok(doc)
    }

    async fn find_by_id(&self, kind: EntityKind, id: EntityId) -> StoreResult<Option<Value>> {
        Self::read_document(&self.document_path(kind, id)).await
    }

    async fn find_one(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Option<Value>> {
        Ok(self
            .list_documents(kind)
            .await
            .into_iter()
            .find(|doc| filter.matches(doc)))
    }

    async fn find_many(&self, kind: EntityKind, filter: &Filter) -> StoreResult<Vec<Value>> {
        Ok(self
            .list_documents(kind)
            .await
            .into_iter()
            .filter(|doc| filter.matches(doc))
            .collect())
    }

    async fn update_by_id(
        &self,
        kind: EntityKind,
        id: EntityId,
        patch: Map<String, Value>,
    ) -> StoreResult<Option<Value>> {
        let Some(mut doc) = Self::read_document(&self.document_path(kind, id)).await? else {
            return Ok(None);
        };

        apply_patch(&mut doc, patch)?;
        Self::write_document(&self.document_dir(kind, id), &doc).await?;
        Ok(Some(doc))
    }

    async fn delete_by_id(&self, kind: EntityKind, id: EntityId) -> StoreResult<bool> {
        match fs::remove_dir_all(self.document_dir(kind, id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::Delete(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn insert_writes_sharded_document() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).await.unwrap();
        let id = EntityId::new();

        store
            .insert(EntityKind::Referral, id, json!({"status": "pending"}))
            .await
            .expect("insert should succeed");

        let expected = id
            .sharded_dir(&temp_dir.path().join("referrals"))
            .join(DOCUMENT_FILENAME);
        assert!(expected.is_file(), "document.json should exist");
        let entries: Vec<_> = std::fs::read_dir(expected.parent().unwrap())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from(DOCUMENT_FILENAME)]);

        let found = store.find_by_id(EntityKind::Referral, id).await.unwrap();
        assert_eq!(found, Some(json!({"status": "pending"})));
    }

    #[tokio::test]
    async fn insert_rejects_existing_id() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).await.unwrap();
        let id = EntityId::new();

        store.insert(EntityKind::User, id, json!({})).await.unwrap();
        let err = store
            .insert(EntityKind::User, id, json!({}))
            .await
            .expect_err("duplicate insert should fail");
        assert!(matches!(err, StoreError::DuplicateId { .. }));
    }

    #[tokio::test]
    async fn find_many_returns_empty_for_missing_collection() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).await.unwrap();

        let docs = store
            .find_many(EntityKind::Hospital, &Filter::new())
            .await
            .unwrap();
        assert!(docs.is_empty());
    }

    #[tokio::test]
    async fn find_many_skips_invalid_documents() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).await.unwrap();

        store
            .insert(EntityKind::Hospital, EntityId::new(), json!({"name": "Valid"}))
            .await
            .unwrap();

        let broken_dir = EntityId::new().sharded_dir(&temp_dir.path().join("hospitals"));
        std::fs::create_dir_all(&broken_dir).unwrap();
        std::fs::write(broken_dir.join(DOCUMENT_FILENAME), "{ not json").unwrap();

        let docs = store
            .find_many(EntityKind::Hospital, &Filter::new())
            .await
            .unwrap();
        assert_eq!(docs, vec![json!({"name": "Valid"})]);

        let one = store
            .find_one(EntityKind::Hospital, &Filter::new().eq("name", "Valid"))
            .await
            .unwrap();
        assert!(one.is_some());
    }

    #[tokio::test]
    async fn update_and_delete_round_trip_on_disk() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = FileStore::open(temp_dir.path()).await.unwrap();
        let id = EntityId::new();

        store
            .insert(
                EntityKind::Appointment,
                id,
                json!({"status": "scheduled", "notes": "fasting"}),
            )
            .await
            .unwrap();

        let mut patch = Map::new();
        patch.insert("status".into(), json!("canceled"));
        let updated = store
            .update_by_id(EntityKind::Appointment, id, patch)
            .await
            .unwrap();
        assert_eq!(
            updated,
            Some(json!({"status": "canceled", "notes": "fasting"}))
        );

        // A fresh handle sees the persisted change.
        let reopened = FileStore::open(temp_dir.path()).await.unwrap();
        let found = reopened
            .find_by_id(EntityKind::Appointment, id)
            .await
            .unwrap();
        assert_eq!(found, updated);

        assert!(reopened
            .delete_by_id(EntityKind::Appointment, id)
            .await
            .unwrap());
        assert!(!reopened
            .delete_by_id(EntityKind::Appointment, id)
            .await
            .unwrap());
        assert_eq!(
            reopened
                .update_by_id(EntityKind::Appointment, id, Map::new())
                .await
                .unwrap(),
            None
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn overlapping_updates_to_one_document_all_succeed() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let store = std::sync::Arc::new(FileStore::open(temp_dir.path()).await.unwrap());
        let id = EntityId::new();
        store
            .insert(EntityKind::Referral, id, json!({"status": "pending"}))
            .await
            .unwrap();

        let mut handles = Vec::new();
        for i in 0..64 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let mut patch = Map::new();
                patch.insert("status".into(), json!(format!("s{}", i)));
                store.update_by_id(EntityKind::Referral, id, patch).await
            }));
        }

        for handle in handles {
            let result = handle.await.unwrap();
            assert!(result.is_ok(), "update failed: {:?}", result.err());
        }

        let doc = store
            .find_by_id(EntityKind::Referral, id)
            .await
            .unwrap()
            .expect("document should still exist");
        assert!(doc["status"].as_str().unwrap().starts_with('s'));

        let dir = id.sharded_dir(&temp_dir.path().join("referrals"));
        let leftovers: Vec<_> = std::fs::read_dir(&dir)
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .filter(|name| name != DOCUMENT_FILENAME)
            .collect();
        assert!(leftovers.is_empty(), "temporary files left: {:?}", leftovers);
    }
}
