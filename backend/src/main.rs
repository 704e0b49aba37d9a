use anyhow::Result;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fixacao_backend::config::BackendConfig;
use fixacao_backend::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> Result<()> {
    let config = BackendConfig::load()?;

    // RUST_LOG wins over the configured filter
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    info!("Setting up reference data");
    let app_state = initialize_backend(&config)?;
    let app = create_router(app_state, &config)?;

    info!("Starting server on {}", config.bind_address);
    let listener = tokio::net::TcpListener::bind(config.bind_address).await?;
    info!("Listening on {}", config.bind_address);

    axum::serve(listener, app).await?;

    Ok(())
}
