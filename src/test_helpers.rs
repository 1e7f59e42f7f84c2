use std::sync::Arc;

use axum::Router;
use sea_orm::DatabaseConnection;

use crate::{
    config::{AppConfig, DatabaseConfig},
    db::connection,
    routes::app,
    services::translation::Translator,
    state::AppState,
};

const MEMORY_DB_URL: &str = "sqlite::memory:";

/// A config that never touches the process environment.
pub fn test_config() -> AppConfig {
    AppConfig {
        database: Some(DatabaseConfig {
            url: MEMORY_DB_URL.to_string(),
            max_connections: 1,
            min_idle: 1,
        }),
        ..AppConfig::default()
    }
}

/// A fresh in-memory SQLite database with the schema in place. The pool is
/// pinned to a single connection so every query sees the same database.
pub async fn memory_db() -> DatabaseConnection {
    let cfg = test_config();
    let database = cfg.database.as_ref().expect("test config has a database");
    connection::connect(database)
        .await
        .expect("in-memory sqlite should connect")
}

pub async fn test_app(translator: Option<Arc<dyn Translator>>) -> Router {
    let db = memory_db().await;
    let state = AppState::new(test_config(), db, translator);
    app(state)
}
