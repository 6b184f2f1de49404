use ng_core::ArticleStore;
use ng_sources::IngestManager;
use std::sync::Arc;

pub struct AppState {
    pub manager: Arc<IngestManager>,
    pub store: Arc<dyn ArticleStore>,
}

impl AppState {
    pub fn new(manager: Arc<IngestManager>) -> Self {
        let store = manager.store();
        Self { manager, store }
    }
}
