//! Debenture ledger server entry point.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use debenture_core::{AccountId, SystemClock};
use debenture_ledger::{BondLedger, InMemorySettlement, SettlementBackend};
use debenture_server::{Server, ServerConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,debenture=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Debenture Ledger Server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/debenture.toml".to_string());

    let config = if std::path::Path::new(&config_path).exists() {
        info!("Loading configuration from {}", config_path);
        ServerConfig::from_file(&config_path)?
    } else {
        info!("Using default configuration");
        ServerConfig::default()
    };

    // Build the ledger over in-process settlement
    let settlement: Arc<InMemorySettlement> = Arc::new(InMemorySettlement::new());
    let treasury = AccountId::new(config.treasury_account.clone());

    if let Some(funding) = config.treasury_funding {
        settlement.deposit(&treasury, funding)?;
        info!("Treasury {} pre-funded with {}", treasury, funding);
    }

    let ledger = Arc::new(BondLedger::new(
        Arc::new(SystemClock),
        settlement.clone(),
        treasury,
    ));

    // Start server
    let server = Server::new(config, ledger, settlement);
    server.start().await?;

    Ok(())
}
