use axum_helpers::{cors_layer_from_env, create_app, health_router, with_common_layers};
use core_config::tracing::{init_tracing, install_color_eyre};
use tracing::info;

mod api;
mod client;
mod config;
mod dto;

use client::BackendClient;
use config::Config;

#[tokio::main]
async fn main() -> eyre::Result<()> {
    install_color_eyre();

    let config = Config::from_env()?;
    init_tracing(&config.environment);

    let backend = BackendClient::new(&config.backend_url, config.backend_timeout)
        .map_err(|e| eyre::eyre!("Failed to build backend client: {}", e))?;
    info!(backend = %backend.base_url(), "Relaying to ShareIt backend");

    let routes = api::routes(backend).merge(health_router(config.app));
    let app = with_common_layers(routes, cors_layer_from_env()?);

    create_app(app, &config.server)
        .await
        .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("ShareIt gateway shutdown complete");
    Ok(())
}
