use anyhow::{Context, Result};
use integrations::api::create_router;
use integrations::config::{AppConfig, HubSpotConfig, StoreBackend};
use integrations::store::{run_store_cleanup, MemoryStore, RedisStore, TransientStore};
use integrations::HubSpotConnector;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env file is fine; variables may come from the environment
    let _ = dotenvy::dotenv();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "integrations=info".into()),
        )
        .init();

    info!("Integrations service starting...");

    let config = AppConfig::load()?;
    let hubspot_config = HubSpotConfig::from_env().context("Missing HubSpot configuration")?;

    let store: Arc<dyn TransientStore> = match config.store.backend {
        StoreBackend::Memory => {
            let store = MemoryStore::new();
            tokio::spawn(run_store_cleanup(
                store.clone(),
                config.store.cleanup_interval_seconds,
            ));
            info!("Using in-memory transient store");
            Arc::new(store)
        }
        StoreBackend::Redis => {
            let store = RedisStore::connect(&config.store.redis_url, &config.store.key_prefix)
                .await?;
            info!(url = %config.store.redis_url, "Using Redis transient store");
            Arc::new(store)
        }
    };

    let hubspot = Arc::new(HubSpotConnector::new(hubspot_config, store));
    let app = create_router(hubspot);

    let listener = tokio::net::TcpListener::bind(&config.server.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.server.bind_addr))?;
    info!(addr = %config.server.bind_addr, "Listening");

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
