use dotenvy::dotenv;
use farm_shop::{
    config::{self, database},
    errors::Result,
    web::{AppState, build_app_router},
};
use std::env;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load .env file first so RUST_LOG can come from it
    dotenv().ok(); // Non-fatal, env vars can be set externally

    // 2. Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 3. Load settings (config file is optional, env overrides win)
    let config_path = env::var("SHOP_CONFIG").unwrap_or_else(|_| "config.toml".to_string());
    let settings = config::load_settings(&config_path)
        .inspect_err(|e| error!("Failed to load settings from {}: {}", config_path, e))?;
    if settings.uses_default_secret() {
        warn!("SECRET_KEY is not set; using the built-in default secret");
    }

    // 4. Make sure the upload directory exists
    std::fs::create_dir_all(&settings.uploads.dir)
        .inspect_err(|e| error!("Failed to create {:?}: {}", settings.uploads.dir, e))?;

    // 5. Connect and create tables
    let db = database::init_db(&settings.database_url)
        .await
        .inspect(|_| info!("Database initialized successfully."))
        .inspect_err(|e| error!("Failed to initialize database: {}", e))?;

    // 6. Serve
    let bind_addr = settings.bind_addr.clone();
    let app = build_app_router(AppState::new(db, settings));
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Listening on {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
