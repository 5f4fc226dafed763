use std::sync::Arc;

use crate::config::AppConfig;
use crate::database::{MemoryStore, Store};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn Store>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, config: AppConfig) -> Self {
        AppState {
            store,
            config: Arc::new(config),
        }
    }

    pub fn in_memory(config: AppConfig) -> Self {
        Self::new(Arc::new(MemoryStore::new()), config)
    }
}
