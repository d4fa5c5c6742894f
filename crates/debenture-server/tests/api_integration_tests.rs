//! End-to-end API tests against the in-process router.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use chrono::Duration;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::util::ServiceExt;

use debenture_core::{AccountId, Clock, ManualClock};
use debenture_ledger::{BondLedger, InMemorySettlement, SettlementBackend};
use debenture_server::routes::create_router;

struct TestApp {
    router: Router,
    clock: Arc<ManualClock>,
    settlement: Arc<InMemorySettlement>,
}

fn test_app() -> TestApp {
    let clock = Arc::new(ManualClock::starting_now());
    let settlement = Arc::new(InMemorySettlement::new());
    let ledger = Arc::new(BondLedger::new(
        clock.clone(),
        settlement.clone(),
        AccountId::new("treasury"),
    ));
    TestApp {
        router: create_router(ledger, settlement.clone()),
        clock,
        settlement,
    }
}

async fn request(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(json) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

fn issue_body(clock: &ManualClock) -> Value {
    json!({
        "issuer": "issuer",
        "name": "API 5% 1Y",
        "face_value": 100,
        "maturity": (clock.now() + Duration::days(365)).to_rfc3339(),
        "coupon_rate_bps": 500,
        "total_supply": 1000,
    })
}

#[tokio::test]
async fn test_health() {
    let app = test_app();
    let (status, body) = request(&app.router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_issue_purchase_claim_flow() {
    let app = test_app();

    // Issue
    let (status, body) = request(
        &app.router,
        Method::POST,
        "/api/v1/bonds",
        Some(issue_body(&app.clock)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["bond_id"], 1);

    // Fund the buyer and the coupon treasury
    for (account, amount) in [("alice", 1_000), ("treasury", 10_000)] {
        let (status, _) = request(
            &app.router,
            Method::POST,
            "/api/v1/settlement/deposit",
            Some(json!({ "account": account, "amount": amount })),
        )
        .await;
        assert_eq!(status, StatusCode::NO_CONTENT);
    }

    // Purchase
    let (status, _) = request(
        &app.router,
        Method::POST,
        "/api/v1/bonds/1/purchase",
        Some(json!({ "buyer": "alice", "amount": 10, "payment": 1000 })),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = request(&app.router, Method::GET, "/api/v1/bonds/1", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["available_supply"], 990);
    assert_eq!(body["total_supply"], 1000);

    let (status, body) = request(
        &app.router,
        Method::GET,
        "/api/v1/bonds/1/investments/alice",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["amount"], 10);

    // Claim after one 30-day period: 10 * 100 * 500 / 10000 = 50
    // annually, 50 / 12 = 4 for one period.
    app.clock.advance(Duration::days(30));
    let (status, body) = request(
        &app.router,
        Method::POST,
        "/api/v1/bonds/1/claim",
        Some(json!({ "caller": "alice" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["coupon_amount"], 4);

    assert_eq!(app.settlement.balance(&AccountId::new("alice")), 4);

    // Audit trail: issue, purchase, claim
    let (status, body) = request(&app.router, Method::GET, "/api/v1/events", None).await;
    assert_eq!(status, StatusCode::OK);
    let events = body.as_array().unwrap();
    assert_eq!(events.len(), 3);
    assert_eq!(events[0]["type"], "bond_issued");
    assert_eq!(events[1]["type"], "bond_purchased");
    assert_eq!(events[2]["type"], "coupon_claimed");
}

#[tokio::test]
async fn test_validation_errors_are_bad_request() {
    let app = test_app();

    let mut body = issue_body(&app.clock);
    body["total_supply"] = json!(0);
    let (status, response) = request(&app.router, Method::POST, "/api/v1/bonds", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(response["error"]
        .as_str()
        .unwrap()
        .contains("total_supply"));

    // Nothing was issued
    let (_, body) = request(&app.router, Method::GET, "/api/v1/bonds/count", None).await;
    assert_eq!(body["total_bonds"], 0);
}

#[tokio::test]
async fn test_insufficient_payment_is_payment_required() {
    let app = test_app();

    request(
        &app.router,
        Method::POST,
        "/api/v1/bonds",
        Some(issue_body(&app.clock)),
    )
    .await;
    app.settlement
        .deposit(&AccountId::new("alice"), 1_000)
        .unwrap();

    let (status, body) = request(
        &app.router,
        Method::POST,
        "/api/v1/bonds/1/purchase",
        Some(json!({ "buyer": "alice", "amount": 10, "payment": 999 })),
    )
    .await;
    assert_eq!(status, StatusCode::PAYMENT_REQUIRED);
    assert!(body["error"].as_str().unwrap().contains("Insufficient payment"));
}

#[tokio::test]
async fn test_unknown_bond_snapshot_is_zero_valued() {
    let app = test_app();
    let (status, body) = request(&app.router, Method::GET, "/api/v1/bonds/42", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], 0);
    assert_eq!(body["face_value"], 0);
    assert_eq!(body["is_active"], false);
}

#[tokio::test]
async fn test_balance_endpoint() {
    let app = test_app();
    app.settlement
        .deposit(&AccountId::new("alice"), 77)
        .unwrap();

    let (status, body) = request(&app.router, Method::GET, "/api/v1/settlement/alice", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["account"], "alice");
    assert_eq!(body["balance"], 77);
}
