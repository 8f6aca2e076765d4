//! In-memory single-slot store

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::model::Hook;
use crate::storage::{HookStore, StorageResult};

/// Keeps the one registered hook in process memory.
///
/// The default store for development and tests; registrations do not
/// survive a restart. The slot is guarded by an `RwLock` so concurrent
/// fetches share the read half while create/delete take exclusive access.
#[derive(Debug, Default)]
pub struct MemoryHookStore {
    slot: RwLock<Option<Hook>>,
}

impl MemoryHookStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HookStore for MemoryHookStore {
    async fn get(&self, id: &str) -> StorageResult<Option<Hook>> {
        let slot = self.slot.read().await;
        Ok(slot.as_ref().filter(|hook| hook.id == id).cloned())
    }

    async fn put(&self, hook: Hook) -> StorageResult<()> {
        *self.slot.write().await = Some(hook);
        Ok(())
    }

    async fn delete(&self, id: &str) -> StorageResult<bool> {
        let mut slot = self.slot.write().await;
        if slot.as_ref().is_some_and(|hook| hook.id == id) {
            *slot = None;
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
