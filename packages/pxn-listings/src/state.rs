//! Application state shared across handlers.

use crate::config::Config;
use crate::processor::CommandProcessor;
use crate::store::{ListingStore, MemoryStore};
use std::sync::atomic::AtomicU64;
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub processor: CommandProcessor,
    pub start_time: Instant,
    pub request_count: AtomicU64,
}

impl AppState {
    /// Create application state with an in-memory store, seeded if configured.
    pub fn new(config: Config) -> Result<Self, crate::Error> {
        let store = match config.seed_path.as_deref() {
            Some(path) => MemoryStore::from_seed_file(path)?,
            None => {
                info!("No seed file configured, starting with an empty store");
                MemoryStore::new()
            }
        };
        Ok(Self::with_store(config, Arc::new(store)))
    }

    /// Create application state around an externally owned store.
    pub fn with_store(config: Config, store: Arc<dyn ListingStore>) -> Self {
        Self {
            processor: CommandProcessor::new(store),
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }
}
