mod config;
mod error;
mod pipeline;
mod retry;
mod routes;

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use extract::{EntityExtractor, HttpRecognizer};
use store::{GraphStore, Neo4jStore};

use crate::config::AppConfig;
use crate::routes::{AppState, router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = AppConfig::from_env();

    let store = Neo4jStore::connect(
        &config.neo4j.uri,
        &config.neo4j.user,
        &config.neo4j.password,
    )
    .await
    .context("failed to connect to Neo4j")?;
    store
        .init_schema()
        .await
        .context("failed to initialize graph schema")?;
    store
        .health_check()
        .await
        .context("graph store health check failed")?;

    let recognizer = HttpRecognizer::new(
        config.recognizer.base_url.clone(),
        config.recognizer_timeout(),
    )
    .context("failed to build recognizer client")?;
    let extractor = EntityExtractor::new(Arc::new(recognizer));

    let bind_addr = config.bind_addr.clone();
    let state = AppState {
        store: Arc::new(store),
        extractor: Arc::new(extractor),
        config: Arc::new(config),
    };

    let app = router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {bind_addr}"))?;
    info!(addr = %bind_addr, "server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install ctrl-c handler");
    info!("shutdown signal received");
}
