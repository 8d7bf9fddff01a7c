//! Server startup: store initialization and background job spawning.

use std::sync::Arc;

use tracing::info;

use promptwall_core::Config;
use promptwall_scheduling::SchedulingConfigStore;
use promptwall_store::{CategoryStore, JsonPromptStore, PromptRepository};

use crate::activation::ActivationJob;
use crate::router::build_router;
use crate::state::AppState;

/// Initialize the stores and build the shared state.
pub fn build_app_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let data_dir = &config.storage.data_dir;

    let scheduling = Arc::new(SchedulingConfigStore::new(data_dir)?);
    let prompts: Arc<dyn PromptRepository> = Arc::new(JsonPromptStore::new(data_dir)?);
    let categories = CategoryStore::new(data_dir)?;
    info!("Stores initialized (data_dir: {})", data_dir.display());

    Ok(Arc::new(AppState {
        config: config.clone(),
        scheduling,
        prompts,
        categories,
        activation: ActivationJob::new(),
    }))
}

/// Start the activation job and serve the HTTP API until shutdown.
pub async fn serve(config: &Config) -> anyhow::Result<()> {
    let state = build_app_state(config)?;
    state
        .activation
        .start(Arc::clone(&state.scheduling), Arc::clone(&state.prompts));

    let app = build_router(Arc::clone(&state));
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on http://localhost:{}", config.server.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(Arc::clone(&state)))
        .await?;

    Ok(())
}

/// Wait for ctrl-c, then cancel the activation job before the server
/// drains connections.
async fn shutdown_signal(state: Arc<AppState>) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        return;
    }
    info!("Shutdown signal received");
    state.activation.stop();
}
