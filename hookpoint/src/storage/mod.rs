//! Hook persistence
//!
//! A deliberately narrow abstraction: one document, keyed by the fixed
//! identifier, with get/put/delete. Handlers never cache the hook across
//! requests; whatever the store returns is the truth.

use std::fmt::Debug;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::Hook;

mod file;
mod memory;

pub use file::FileHookStore;
pub use memory::MemoryHookStore;

/// Error type for storage operations.
///
/// These are infrastructure failures, not validation failures: the HTTP
/// layer maps them to 5xx responses, never into the request-validation
/// taxonomy.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A persisted document no longer parses as a hook.
    #[error("corrupt hook document: {0}")]
    Corrupt(String),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Single-slot hook persistence.
///
/// Implementations must serialize writers (`put`/`delete`) against each
/// other and against themselves, and guarantee readers observe either the
/// fully-prior or fully-new document, never a partial write.
#[async_trait]
pub trait HookStore: Send + Sync + Debug + 'static {
    /// Fetch the hook stored under `id`, if any.
    async fn get(&self, id: &str) -> StorageResult<Option<Hook>>;

    /// Store a hook, unconditionally replacing any prior content.
    async fn put(&self, hook: Hook) -> StorageResult<()>;

    /// Remove the hook stored under `id`. Returns `false` when nothing was
    /// stored under that identifier.
    async fn delete(&self, id: &str) -> StorageResult<bool>;
}
