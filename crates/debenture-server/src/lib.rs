//! # Debenture Server
//!
//! REST server for the Debenture bond ledger.
//!
//! ## Features
//!
//! - REST API for bond issuance, purchase, and coupon claims
//! - Read-only accessors for bond, investment, and audit-trail snapshots
//! - Settlement funding endpoints (buyer accounts and the coupon treasury)
//! - Health endpoint
//! - Configuration via TOML file
//!
//! Caller identity arrives as an explicit field in request bodies or path
//! segments; it is an opaque, externally authenticated principal and the
//! server performs no authentication itself.
//!
//! ## Usage
//!
//! ```ignore
//! use debenture_server::Server;
//!
//! let server = Server::new(config, ledger, settlement);
//! server.start().await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod handlers;
pub mod routes;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use debenture_ledger::{BondLedger, SettlementBackend};

pub use config::ServerConfig;

/// The Debenture server.
pub struct Server {
    config: ServerConfig,
    ledger: Arc<BondLedger>,
    settlement: Arc<dyn SettlementBackend>,
}

impl Server {
    /// Create a new server.
    pub fn new(
        config: ServerConfig,
        ledger: Arc<BondLedger>,
        settlement: Arc<dyn SettlementBackend>,
    ) -> Self {
        Self {
            config,
            ledger,
            settlement,
        }
    }

    /// Build the router.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        routes::create_router(self.ledger.clone(), self.settlement.clone())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Start the server.
    pub async fn start(&self) -> Result<(), std::io::Error> {
        let addr = SocketAddr::new(
            self.config.host.parse().unwrap_or([0, 0, 0, 0].into()),
            self.config.port,
        );

        info!("Starting Debenture server on {}", addr);

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router()).await
    }
}
