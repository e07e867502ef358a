use std::sync::Arc;

use crate::config::Config;
use crate::db::DatabaseBackend;
use crate::services::StringService;

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub db: Arc<dyn DatabaseBackend>,
    pub strings: Arc<StringService>,
}

impl AppState {
    pub fn new(config: Config, db: Arc<dyn DatabaseBackend>) -> Self {
        let strings = Arc::new(StringService::new(db.clone()));

        Self {
            config: Arc::new(config),
            db,
            strings,
        }
    }
}
