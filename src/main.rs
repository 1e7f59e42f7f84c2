use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing::{info, warn};

use todo_api::{
    config::AppConfig,
    db::connection,
    logging::init_tracing,
    routes::app,
    services::translation::build_translator,
    state::AppState,
};

#[tokio::main]
async fn main() {
    // tracing is not up yet, so config errors go straight to stderr
    let cfg = match AppConfig::from_env() {
        Ok(cfg) => cfg,
        Err(err) => {
            eprintln!("failed to load config: {err:?}");
            std::process::exit(1);
        }
    };
    init_tracing(&cfg.logging);

    if let Err(err) = run(cfg).await {
        tracing::error!("server failed: {err:?}");
        std::process::exit(1);
    }
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    if cfg.general.secret_key.is_none() {
        warn!("SECRET_KEY is not set");
    }

    let database = cfg
        .database
        .as_ref()
        .context("DATABASE_URL environment variable is not set")?;
    let db = connection::connect(database).await?;
    let translator = build_translator(&cfg.translation);

    let addr: SocketAddr = format!("{}:{}", cfg.general.host, cfg.general.port)
        .parse()
        .context("invalid host/port")?;
    let state = AppState::new(cfg, db, translator);
    let app = app(Arc::clone(&state));

    info!("listening on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
