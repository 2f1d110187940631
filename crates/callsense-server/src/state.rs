use callsense_core::config::AppConfig;
use callsense_core::store::SessionStore;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared application state for the server.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<RwLock<SessionStore>>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let store = SessionStore::new(&config.store);
        Self {
            config,
            store: Arc::new(RwLock::new(store)),
        }
    }
}
