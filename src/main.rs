//! WorkOn RBGA mock server binary.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use workon_rbga::config::Config;
use workon_rbga::store::RequestStore;
use workon_rbga::{create_router, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mock WorkOn RBGA API server");
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if no key is configured
    if config.key_id.is_none() {
        tracing::warn!("No KeyId configured (WORKON_KEY_ID). Authentication is disabled!");
    }

    // Initialize the in-memory store
    let store = if config.sample_data {
        tracing::info!("Preloading sample request RBGA-1");
        Arc::new(RequestStore::with_sample_data())
    } else {
        Arc::new(RequestStore::new())
    };

    // Create application state
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
