mod adapters;
mod application;
mod config;
mod domain;
mod interface;
mod ports;

use std::sync::Arc;

use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::{MemoryStore, PowercapEnergySource};
use application::MeteringService;
use config::Config;
use interface::http::create_router;
use ports::EnergySource;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("wattmon={},tower_http=info", config.log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("🚀 Starting wattmon v{}", env!("CARGO_PKG_VERSION"));
    info!("Configuration: {:?}", config);

    // Initialize the energy source and probe it once; an unreadable
    // counter degrades to zero readings, it never stops the service.
    let energy_source = Arc::new(PowercapEnergySource::new(config.energy_path.clone()));
    match energy_source.read_energy().await {
        Ok(uj) => info!(
            "✓ Energy counter readable at {} ({} µJ)",
            config.energy_path.display(),
            uj
        ),
        Err(e) => warn!(
            "⚠ Energy counter unreadable: {}. Samples will carry zero energy readings.",
            e
        ),
    }

    // Create the metering service
    let metering = if config.recording {
        let store = Arc::new(MemoryStore::new(config.capacity));
        info!(
            "✓ Sample store initialized (capacity {} per endpoint)",
            config.capacity
        );
        MeteringService::new(energy_source).with_store(store)
    } else {
        warn!("⚠ Recording disabled, /metrics will answer 503");
        MeteringService::new(energy_source)
    };

    // Create HTTP server
    let app = create_router(Arc::new(metering));
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    info!("✓ wattmon listening on {}", addr);
    info!("  → Snapshot: http://localhost:{}/metrics", config.port);
    info!("  → Health:   http://localhost:{}/api/health", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
