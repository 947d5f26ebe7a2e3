//! services/api/src/web/state.rs
//!
//! Defines the application's shared state.

use crate::adapters::MemoryStore;
use crate::config::Config;
use handspeak_core::gesture::GestureEstimator;
use handspeak_core::ports::StorageService;
use std::sync::Arc;

//=========================================================================================
// AppState (Shared Across All Connections)
//=========================================================================================

/// The shared application state, created once at startup and passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StorageService>,
    pub config: Arc<Config>,
    pub estimator: Arc<GestureEstimator>,
}

impl AppState {
    /// State backed by the seeded in-memory store and the built-in sign library.
    pub fn in_memory(config: Config) -> Self {
        Self {
            store: Arc::new(MemoryStore::seeded()),
            config: Arc::new(config),
            estimator: Arc::new(GestureEstimator::default()),
        }
    }
}
