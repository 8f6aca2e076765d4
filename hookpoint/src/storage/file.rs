//! File-backed store, durable across restarts
//!
//! One document per active hook, written as `hook.<id>` inside the data
//! directory. Writes land in a temporary sibling first and are moved into
//! place with a rename, so a concurrent reader sees either the prior
//! document or the new one, never a torn write. The `RwLock` serializes
//! writers against each other on top of that.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::sync::RwLock;
use tracing::debug;

use crate::model::Hook;
use crate::payload;
use crate::storage::{HookStore, StorageError, StorageResult};

#[derive(Debug)]
pub struct FileHookStore {
    dir: PathBuf,
    lock: RwLock<()>,
}

impl FileHookStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    pub async fn open(dir: impl AsRef<Path>) -> StorageResult<Self> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir).await?;
        Ok(Self {
            dir,
            lock: RwLock::new(()),
        })
    }

    fn document_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("hook.{id}"))
    }
}

#[async_trait]
impl HookStore for FileHookStore {
    async fn get(&self, id: &str) -> StorageResult<Option<Hook>> {
        let _guard = self.lock.read().await;
        let contents = match fs::read_to_string(self.document_path(id)).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        // The stored document is the confirmation XML itself; its uri and
        // version children are enough to rebuild the hook.
        let registration = payload::parse_registration(&contents)
            .map_err(|e| StorageError::Corrupt(e.to_string()))?;
        Ok(Some(Hook::new(id, registration.uri, registration.version)))
    }

    async fn put(&self, hook: Hook) -> StorageResult<()> {
        let _guard = self.lock.write().await;
        let path = self.document_path(&hook.id);
        let staging = self.dir.join(format!("hook.{}.tmp", hook.id));

        fs::write(&staging, hook.to_xml()).await?;
        fs::rename(&staging, &path).await?;
        debug!(hook_id = %hook.id, path = %path.display(), "hook document written");
        Ok(())
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let _guard = self.lock.write().await;
        match fs::remove_file(self.document_path(id)).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn put_then_get_round_trips() {
        let dir = TempDir::new().unwrap();
        let store = FileHookStore::open(dir.path()).await.unwrap();
        let hook = Hook::new("1234", "http://agent.example:8888/api", 1);

        store.put(hook.clone()).await.unwrap();
        assert_eq!(store.get("1234").await.unwrap(), Some(hook));
    }

    #[tokio::test]
    async fn registration_survives_reopen() {
        let dir = TempDir::new().unwrap();
        {
            let store = FileHookStore::open(dir.path()).await.unwrap();
            store
                .put(Hook::new("1234", "http://durable", 1))
                .await
                .unwrap();
        }

        let reopened = FileHookStore::open(dir.path()).await.unwrap();
        let stored = reopened.get("1234").await.unwrap().unwrap();
        assert_eq!(stored.uri, "http://durable");
    }

    #[tokio::test]
    async fn stores_the_confirmation_document_verbatim() {
        let dir = TempDir::new().unwrap();
        let store = FileHookStore::open(dir.path()).await.unwrap();
        let hook = Hook::new("1234", "http://a", 1);
        store.put(hook.clone()).await.unwrap();

        let on_disk = std::fs::read_to_string(dir.path().join("hook.1234")).unwrap();
        assert_eq!(on_disk, hook.to_xml());
    }

    #[tokio::test]
    async fn get_of_absent_id_is_none() {
        let dir = TempDir::new().unwrap();
        let store = FileHookStore::open(dir.path()).await.unwrap();
        assert_eq!(store.get("1234").await.unwrap(), None);
    }

    #[tokio::test]
    async fn delete_removes_the_document() {
        let dir = TempDir::new().unwrap();
        let store = FileHookStore::open(dir.path()).await.unwrap();
        store.put(Hook::new("1234", "http://a", 1)).await.unwrap();

        assert!(store.delete("1234").await.unwrap());
        assert!(!dir.path().join("hook.1234").exists());
        assert!(!store.delete("1234").await.unwrap());
    }

    #[tokio::test]
    async fn unparseable_document_is_corrupt() {
        let dir = TempDir::new().unwrap();
        let store = FileHookStore::open(dir.path()).await.unwrap();
        std::fs::write(dir.path().join("hook.1234"), "<hook><garbage></hook>").unwrap();

        let err = store.get("1234").await.unwrap_err();
        assert!(matches!(err, StorageError::Corrupt(_)));
    }
}
