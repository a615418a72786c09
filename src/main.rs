use schedule_engine::api::{AppState, create_router};
use schedule_engine::config::ConfigLoader;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    let config_dir =
        std::env::var("SCHEDULE_ENGINE_CONFIG_DIR").unwrap_or_else(|_| "./config".into());
    let bind = std::env::var("SCHEDULE_ENGINE_BIND").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let config = ConfigLoader::load_or_default(&config_dir)?;
    info!(
        config_dir = %config_dir,
        listings = config.listings().len(),
        "Configuration loaded"
    );

    let router = create_router(AppState::new(config));
    let listener = tokio::net::TcpListener::bind(&bind).await?;
    info!(bind = %bind, "Schedule engine listening");

    axum::serve(listener, router).await?;
    Ok(())
}
