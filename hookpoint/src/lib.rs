//! # Hookpoint
//!
//! Core library for the hookpoint registration service: an external agent
//! registers a callback URI and protocol version, and the service keeps
//! exactly one registration at a time under a fixed identifier.
//!
//! This crate carries everything the HTTP layer delegates to:
//!
//! - **`model`**: the [`Hook`] entity and its confirmation-document
//!   rendering. The document shape is wire format consumed by registering
//!   agents and is reproduced byte-for-byte.
//! - **`payload`**: parsing of the inbound registration XML into a
//!   [`payload::Registration`], with a typed error distinguishing a parse
//!   failure from a missing element.
//! - **`storage`**: the [`HookStore`] trait plus in-memory and file-backed
//!   implementations. The store owns the persisted representation; at most
//!   one hook exists at any time.
//!
//! ## Example
//!
//! ```rust
//! use hookpoint::{Hook, MemoryHookStore, HookStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), hookpoint::StorageError> {
//!     let store = MemoryHookStore::new();
//!
//!     let hook = Hook::new("1234", "http://agent.example:8888/api", 1);
//!     store.put(hook.clone()).await?;
//!
//!     let stored = store.get("1234").await?;
//!     assert_eq!(stored.as_ref().map(|h| h.uri.as_str()),
//!                Some("http://agent.example:8888/api"));
//!
//!     assert!(store.delete("1234").await?);
//!     Ok(())
//! }
//! ```

pub mod model;
pub mod payload;
pub mod storage;

pub use model::{Hook, PROTOCOL_VERSION};
pub use payload::{PayloadError, Registration};
pub use storage::{FileHookStore, HookStore, MemoryHookStore, StorageError};

/// Crate version, surfaced by the server and CLI binaries.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
