use sea_orm::DatabaseConnection;
use tracing::info;

use super::providers::provider_for_url;
use crate::config::DatabaseConfig;

/// Opens the pool and makes sure the schema exists before anything is served.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<DatabaseConnection> {
    let provider = provider_for_url(&cfg.url)?;
    info!(backend = provider.id().as_str(), "connecting to database");

    let db = provider.connect(cfg).await?;
    provider.post_connect(&db).await?;
    sync_schema(&db).await?;
    Ok(db)
}

/// Issues idempotent "create if not exists" DDL for every registered entity.
pub async fn sync_schema(db: &DatabaseConnection) -> anyhow::Result<()> {
    info!("syncing database schema from entities");
    db.get_schema_registry("todo_api::db::entities::*")
        .sync(db)
        .await?;
    Ok(())
}
