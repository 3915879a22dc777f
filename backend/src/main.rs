use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use backend::api::router;
use backend::config::{AppConfig, StoreBackend};
use backend::records::{HttpRecordClient, InMemoryRecordClient, RecordClient, RecordLinks};
use backend::services::Console;
use backend::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "backend=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::new_from_env()?;

    let client: Arc<dyn RecordClient> = match config.store {
        StoreBackend::Remote => {
            info!("Using record API at {}", config.records.base_url);
            Arc::new(HttpRecordClient::new(config.records.clone())?)
        }
        StoreBackend::Memory => {
            warn!("Using in-memory record store; nothing is persisted");
            Arc::new(InMemoryRecordClient::new())
        }
    };

    let mut console = Console::new(client, RecordLinks::from_config(&config.records));
    if let Some(notification) = console.load_all().await {
        warn!("{}", notification.message);
    }

    let app = router(AppState::new(console));

    info!("listening on http://{}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
