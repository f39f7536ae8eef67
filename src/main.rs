use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use api_rest::AppState;
use mras_core::config::{
    data_dir_from_env_value, password_iterations_from_env_value, store_backend_from_env_value,
};
use mras_core::{CoreConfig, Services};

/// Main entry point for the MRAS application
///
/// Resolves configuration from the environment once, opens the entity store and serves the REST
/// API (with Swagger UI at `/swagger-ui`).
///
/// # Environment Variables
/// - `MRAS_REST_ADDR`: REST server address (default: "0.0.0.0:3000")
/// - `MRAS_STORE`: `file` or `memory` (default: "file")
/// - `MRAS_DATA_DIR`: data directory for the file store (default: "mras_data")
/// - `MRAS_PASSWORD_ITERATIONS`: PBKDF2 iterations for new password hashes (default: 100000)
/// - `API_KEY`: if set, required in the `x-api-key` header of every request except `/health`
///
/// # Errors
/// Returns an error if configuration is invalid, the store cannot be opened, the address cannot
/// be bound, or the server fails while running.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("mras=info".parse()?)
                .add_directive("api_rest=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let rest_addr = std::env::var("MRAS_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let cfg = CoreConfig::new(
        store_backend_from_env_value(std::env::var("MRAS_STORE").ok())?,
        data_dir_from_env_value(std::env::var("MRAS_DATA_DIR").ok()),
        password_iterations_from_env_value(std::env::var("MRAS_PASSWORD_ITERATIONS").ok())?,
    )?;
    let api_key = std::env::var("API_KEY").ok();
    if api_key.is_none() {
        tracing::warn!("API_KEY not set; the REST API is open");
    }

    let store = cfg.open_store().await?;
    tracing::info!(
        "Using {:?} store (data dir {})",
        cfg.store_backend(),
        cfg.data_dir().display()
    );

    let app = api_rest::router(AppState::new(Services::new(store, &cfg), api_key));

    tracing::info!("++ Starting MRAS REST on {}", rest_addr);
    let listener = tokio::net::TcpListener::bind(&rest_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {:?}", e);
        return;
    }
    tracing::info!("-- Shutting down MRAS");
}
