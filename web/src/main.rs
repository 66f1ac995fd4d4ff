mod config;
mod page;
mod routes;
mod state;

use anyhow::Context;
use doc_client::{ApiClient, API_BASE_ENV};
use std::sync::Arc;

use crate::config::WebConfig;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize environment variables and logging
    dotenv::dotenv().ok();
    env_logger::init();

    let config = WebConfig::from_env()?;

    // The base URL is read per request; a missing one only shows up as failed uploads.
    if std::env::var(API_BASE_ENV).is_err() {
        log::warn!("{} is not set, requests will fail until it is", API_BASE_ENV);
    }

    let state = Arc::new(AppState::new(ApiClient::from_env())?);
    let app = routes::router(state, &config);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    log::info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
