mod postgres;
mod sqlite;

use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::config::DatabaseConfig;

pub use self::{postgres::PostgresDbProvider, sqlite::SqliteDbProvider};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProviderId {
    Postgres,
    Sqlite,
}

impl DbProviderId {
    pub fn as_str(self) -> &'static str {
        match self {
            DbProviderId::Postgres => "postgres",
            DbProviderId::Sqlite => "sqlite",
        }
    }
}

#[async_trait]
pub trait DbProvider: Send + Sync {
    fn id(&self) -> DbProviderId;

    fn supports_url(&self, url: &str) -> bool;

    async fn connect(&self, cfg: &DatabaseConfig) -> Result<DatabaseConnection> {
        let mut options = ConnectOptions::new(cfg.url.clone());
        options
            .max_connections(cfg.max_connections)
            .min_connections(cfg.min_idle)
            .connect_timeout(CONNECT_TIMEOUT)
            .sqlx_logging(false);

        Ok(Database::connect(options).await?)
    }

    async fn post_connect(&self, _db: &DatabaseConnection) -> Result<()> {
        Ok(())
    }
}

/// Picks the backend for a database url by its scheme.
pub fn provider_for_url(url: &str) -> Result<Box<dyn DbProvider>> {
    let candidates: [Box<dyn DbProvider>; 2] =
        [Box::new(PostgresDbProvider), Box::new(SqliteDbProvider)];

    candidates
        .into_iter()
        .find(|provider| provider.supports_url(url))
        .ok_or_else(|| {
            anyhow::anyhow!(
                "unsupported database url '{}'; expected scheme postgres://, postgresql://, or sqlite:",
                redact_url(url)
            )
        })
}

fn redact_url(url: &str) -> String {
    let trimmed = url.trim();
    if let Some((scheme, _)) = trimmed.split_once("://") {
        format!("{scheme}://<redacted>")
    } else if let Some((scheme, _)) = trimmed.split_once(':') {
        format!("{scheme}:<redacted>")
    } else {
        "<invalid-url>".to_string()
    }
}
