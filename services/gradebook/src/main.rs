use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gradebook::config::AppConfig;
use gradebook::state::AppState;
use gradebook::store::SqliteGradeStore;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::from_env()?;

    // --- SQLite ---
    let store = SqliteGradeStore::open(&cfg.db_path)
        .await
        .with_context(|| format!("Failed to open {}", cfg.db_path.display()))?;
    store.ping().await.context("SQLite ping failed")?;
    info!("sqlite: ok ({})", cfg.db_path.display());

    let app_state = Arc::new(AppState::new(store));
    let app = gradebook::app(app_state, &cfg.static_dir);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", cfg.bind_addr))?;
    info!("gradebook api at http://{}/api", cfg.bind_addr);
    info!("static files from {}", cfg.static_dir.display());

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}
