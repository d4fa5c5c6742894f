//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use debenture_ledger::{BondLedger, SettlementBackend};

use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `ledger` - The bond ledger
/// * `settlement` - The settlement backend the ledger settles against
pub fn create_router(ledger: Arc<BondLedger>, settlement: Arc<dyn SettlementBackend>) -> Router {
    let state = Arc::new(AppState { ledger, settlement });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Bonds
        .route("/api/v1/bonds", post(handlers::issue_bond))
        .route("/api/v1/bonds/count", get(handlers::get_total_bonds))
        .route("/api/v1/bonds/{bond_id}", get(handlers::get_bond))
        .route("/api/v1/bonds/{bond_id}/purchase", post(handlers::purchase_bond))
        .route("/api/v1/bonds/{bond_id}/claim", post(handlers::claim_coupon))
        .route(
            "/api/v1/bonds/{bond_id}/investments/{account}",
            get(handlers::get_investment),
        )
        // Audit trail
        .route("/api/v1/events", get(handlers::get_events))
        // Settlement
        .route("/api/v1/settlement/deposit", post(handlers::deposit))
        .route("/api/v1/settlement/{account}", get(handlers::get_balance))
        // State
        .with_state(state)
}
