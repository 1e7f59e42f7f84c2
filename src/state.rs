use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, services::translation::Translator};

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub db: DatabaseConnection,
    /// Absent when no translation credential was configured at startup.
    pub translator: Option<Arc<dyn Translator>>,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        db: DatabaseConnection,
        translator: Option<Arc<dyn Translator>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            config,
            db,
            translator,
        })
    }
}
