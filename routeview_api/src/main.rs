mod config;
mod datasets;
mod error;
mod navigation;
mod routes;
mod state;

#[cfg(test)]
mod test_utils;

use std::sync::Arc;

use anyhow::Context;
use axum::serve;
use mimalloc::MiMalloc;
use tracing::{Level, info};

use crate::{config::AppConfig, routes::app, state::AppState};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::from_filename("./.env.local").ok();
    let config = AppConfig::from_env()?;

    let level = if config.debug { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(level).init();

    info!(
        data_root = %config.registry.data_root.display(),
        base_name = %config.registry.base_name,
        "serving datasets"
    );

    let state = Arc::new(AppState::new(
        config.registry.clone(),
        config.precision_policy.clone(),
    ));

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;

    info!(address = %config.bind_addr, "listening");

    serve(listener, app(state)).await.context("server error")?;

    Ok(())
}
