use std::sync::Arc;

use crate::config::Config;
use crate::store::RecordStore;

/// Shared application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            store: Arc::new(RecordStore::new()),
            config,
        }
    }
}
