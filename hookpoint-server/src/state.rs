//! Application state management

use std::sync::Arc;

use hookpoint::HookStore;

use crate::config::ServerConfig;

/// Application state shared across all handlers
#[derive(Debug)]
pub struct AppState {
    /// Hook persistence, injected so handlers stay storage-agnostic
    pub store: Arc<dyn HookStore>,

    /// Server configuration
    pub config: ServerConfig,
}

impl AppState {
    /// Create new application state
    pub fn new(store: Arc<dyn HookStore>, config: ServerConfig) -> Self {
        Self { store, config }
    }

    /// The fixed identifier the one supported hook is stored under.
    pub fn hook_id(&self) -> &str {
        &self.config.hook_id
    }
}
