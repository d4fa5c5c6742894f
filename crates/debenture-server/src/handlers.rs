//! Request handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use debenture_core::{AccountId, BondId, LedgerError};
use debenture_ledger::{BondLedger, SettlementBackend};

/// Application state.
pub struct AppState {
    /// The bond ledger
    pub ledger: Arc<BondLedger>,
    /// The settlement backend (for funding and balance queries)
    pub settlement: Arc<dyn SettlementBackend>,
}

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    status: String,
    version: String,
}

/// Health check handler.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Error response.
#[derive(Serialize)]
pub struct ErrorResponse {
    error: String,
}

impl ErrorResponse {
    fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Maps ledger errors onto HTTP statuses: validation failures are the
/// caller's fault (400), short payments are 402, refused settlement
/// transfers are 409.
fn ledger_error(err: &LedgerError) -> Response {
    let status = match err {
        LedgerError::Validation { .. } => StatusCode::BAD_REQUEST,
        LedgerError::InsufficientPayment { .. } => StatusCode::PAYMENT_REQUIRED,
        LedgerError::Settlement { .. } => StatusCode::CONFLICT,
    };
    (status, Json(ErrorResponse::new(err.to_string()))).into_response()
}

// =============================================================================
// ISSUANCE
// =============================================================================

/// Request to issue a new bond.
#[derive(Debug, Deserialize)]
pub struct IssueBondRequest {
    /// Issuing account (externally authenticated principal)
    pub issuer: String,
    /// Bond display name
    pub name: String,
    /// Face value per unit
    pub face_value: u128,
    /// Maturity timestamp (RFC 3339)
    pub maturity: DateTime<Utc>,
    /// Annual coupon rate in basis points (1..=10000)
    pub coupon_rate_bps: u32,
    /// Fixed unit count
    pub total_supply: u64,
}

/// Response carrying the new bond identifier.
#[derive(Serialize)]
pub struct IssueBondResponse {
    /// Ledger-allocated identifier.
    pub bond_id: u64,
}

/// Issue a new bond.
pub async fn issue_bond(
    State(state): State<Arc<AppState>>,
    Json(request): Json<IssueBondRequest>,
) -> Response {
    match state.ledger.issue_bond(
        AccountId::new(request.issuer),
        request.name,
        request.face_value,
        request.maturity,
        request.coupon_rate_bps,
        request.total_supply,
    ) {
        Ok(bond_id) => (
            StatusCode::CREATED,
            Json(IssueBondResponse {
                bond_id: bond_id.value(),
            }),
        )
            .into_response(),
        Err(err) => ledger_error(&err),
    }
}

// =============================================================================
// PURCHASE
// =============================================================================

/// Request to purchase units of a bond.
#[derive(Debug, Deserialize)]
pub struct PurchaseBondRequest {
    /// Purchasing account
    pub buyer: String,
    /// Units to purchase
    pub amount: u64,
    /// Value attached to the call; must cover `face_value * amount`
    pub payment: u128,
}

/// Purchase units of a bond.
///
/// The operation carries no return value; success is an empty 204.
pub async fn purchase_bond(
    State(state): State<Arc<AppState>>,
    Path(bond_id): Path<u64>,
    Json(request): Json<PurchaseBondRequest>,
) -> Response {
    match state.ledger.purchase_bond(
        AccountId::new(request.buyer),
        BondId::new(bond_id),
        request.amount,
        request.payment,
    ) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => ledger_error(&err),
    }
}

// =============================================================================
// COUPON CLAIMS
// =============================================================================

/// Request to claim accrued coupon interest.
#[derive(Debug, Deserialize)]
pub struct ClaimCouponRequest {
    /// Claiming account
    pub caller: String,
}

/// Response carrying the coupon payout.
#[derive(Serialize)]
pub struct ClaimCouponResponse {
    /// Amount paid out, in the settlement denomination.
    pub coupon_amount: u128,
}

/// Claim accrued coupon interest on a bond.
pub async fn claim_coupon(
    State(state): State<Arc<AppState>>,
    Path(bond_id): Path<u64>,
    Json(request): Json<ClaimCouponRequest>,
) -> Response {
    match state
        .ledger
        .claim_coupon(AccountId::new(request.caller), BondId::new(bond_id))
    {
        Ok(coupon_amount) => (StatusCode::OK, Json(ClaimCouponResponse { coupon_amount }))
            .into_response(),
        Err(err) => ledger_error(&err),
    }
}

// =============================================================================
// READ-ONLY ACCESSORS
// =============================================================================

/// Get a bond snapshot. Unknown identifiers yield the zero-valued
/// snapshot, matching the ledger's accessor contract.
pub async fn get_bond(State(state): State<Arc<AppState>>, Path(bond_id): Path<u64>) -> Response {
    Json(state.ledger.bond_details(BondId::new(bond_id))).into_response()
}

/// Get an investment snapshot. Absent positions yield the zero-valued
/// snapshot.
pub async fn get_investment(
    State(state): State<Arc<AppState>>,
    Path((bond_id, account)): Path<(u64, String)>,
) -> Response {
    Json(
        state
            .ledger
            .investment_details(&AccountId::new(account), BondId::new(bond_id)),
    )
    .into_response()
}

/// Response carrying the issued-bond count.
#[derive(Serialize)]
pub struct TotalBondsResponse {
    /// Count of bonds ever issued.
    pub total_bonds: u64,
}

/// Get the count of bonds ever issued.
pub async fn get_total_bonds(State(state): State<Arc<AppState>>) -> Json<TotalBondsResponse> {
    Json(TotalBondsResponse {
        total_bonds: state.ledger.total_bonds(),
    })
}

/// Get the audit trail, in commit order.
pub async fn get_events(State(state): State<Arc<AppState>>) -> Response {
    Json(state.ledger.events()).into_response()
}

// =============================================================================
// SETTLEMENT FUNDING
// =============================================================================

/// Request to fund an account.
#[derive(Debug, Deserialize)]
pub struct DepositRequest {
    /// Account to credit (the coupon treasury included)
    pub account: String,
    /// Amount to credit
    pub amount: u128,
}

/// Fund a settlement account from outside the ledger.
pub async fn deposit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<DepositRequest>,
) -> Response {
    match state
        .settlement
        .deposit(&AccountId::new(request.account), request.amount)
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => (
            StatusCode::CONFLICT,
            Json(ErrorResponse::new(err.to_string())),
        )
            .into_response(),
    }
}

/// Response carrying an account balance.
#[derive(Serialize)]
pub struct BalanceResponse {
    /// The queried account.
    pub account: String,
    /// Current balance (0 for unknown accounts).
    pub balance: u128,
}

/// Get a settlement account balance.
pub async fn get_balance(
    State(state): State<Arc<AppState>>,
    Path(account): Path<String>,
) -> Json<BalanceResponse> {
    let id = AccountId::new(account);
    let balance = state.settlement.balance(&id);
    Json(BalanceResponse {
        account: id.0,
        balance,
    })
}
