//! Application setup and initialization

pub mod database;
pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::{Context, Result};
use harbor_core::Config;

use crate::state::AppState;

/// Connect to the database, prepare the upload directory and build the router
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    tracing::info!("Configuration loaded and validated successfully");

    let pool = database::setup_database(&config).await?;

    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| {
            format!(
                "Failed to create upload directory {}",
                config.upload_dir.display()
            )
        })?;

    let state = Arc::new(AppState::new(config.clone(), pool));
    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
