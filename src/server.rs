//! HTTP server initialization and runtime setup.
//!
//! Builds the host table, image provider, content repository and drawer
//! store, spawns the session sweeper, and runs the Axum server.

use crate::application::services::{
    ContentService, DrawerStore, HostResolver, ImageGenerationService, ImageSettings,
    LayoutSelector, run_session_sweeper,
};
use crate::config::Config;
use crate::infrastructure::content::FsPostRepository;
use crate::infrastructure::openai::OpenAiImageProvider;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Builds the shared state from configuration.
///
/// # Errors
///
/// Returns an error if the host table is inconsistent or the provider
/// client cannot be built.
pub fn build_state(config: &Config) -> Result<AppState> {
    let resolver = Arc::new(HostResolver::builtin().context("Invalid host table")?);
    tracing::info!(
        "Host table loaded: {} sites, {} hostnames",
        resolver.descriptors().len(),
        resolver.host_count()
    );
    for descriptor in resolver.descriptors() {
        tracing::info!(
            "  {} answers on {} ({})",
            descriptor.canonical_name,
            descriptor.hosts.for_env(config.site_env),
            config.site_env
        );
    }
    let layout_selector = Arc::new(LayoutSelector::new(resolver));

    let provider = OpenAiImageProvider::new(
        &config.openai_base_url,
        config.openai_api_key.clone(),
        config.provider_timeout(),
    )
    .context("Failed to build image provider")?;

    let image_service = Arc::new(ImageGenerationService::new(
        Arc::new(provider),
        ImageSettings {
            model: config.image_model.clone(),
            size: config.image_size.clone(),
            test_delay: config.test_image_delay(),
            allow_credential_override: config.allow_credential_override,
        },
    ));

    let drawers = Arc::new(DrawerStore::new(
        image_service.clone(),
        config.drawer_cancel_on_dismiss,
    ));

    let content_service = Arc::new(ContentService::new(Arc::new(FsPostRepository::new(
        config.content_dir.clone(),
    ))));

    let http = reqwest::Client::builder()
        .timeout(config.provider_timeout())
        .build()
        .context("Failed to build HTTP client")?;

    Ok(AppState::new(
        layout_selector,
        image_service,
        drawers,
        content_service,
        http,
        config.static_dir.clone(),
    ))
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Site host table and layout selector
/// - Image provider and generation service
/// - Drawer store and idle session sweeper
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - State construction fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let state = build_state(&config)?;

    if !state.image_service.live_ready() {
        tracing::warn!("No OPENAI_API_KEY set; live generation needs a per-request key");
    }

    tokio::spawn(run_session_sweeper(
        state.drawers.clone(),
        config.drawer_session_ttl(),
    ));
    tracing::info!("Drawer session sweeper started");

    let app = app_router(state, &config);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
