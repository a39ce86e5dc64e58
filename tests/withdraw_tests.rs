mod common;

use axum::http::StatusCode;
use common::*;
use rust_decimal_macros::dec;
use serde_json::json;
use uuid::Uuid;
use zenith_broking::domain::ports::TransactionLogStore;

#[tokio::test]
async fn withdraw_debits_capital_and_writes_one_log() {
    let gateway = StubGateway::ok();
    let app = spawn_app(gateway.clone());
    let client_id = seed_client(&app, dec!(100.0)).await;

    let response = post_json(
        &app,
        "/api/withdraw",
        Some(&app.token),
        json!({ "client_id": client_id, "amount": 40, "note": "rent" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "processed");
    assert_eq!(body["gateway"]["status"], 200);
    let log_id = body["log_id"].as_str().unwrap();

    assert_eq!(capital_of(&app, &client_id).await, dec!(60.0));
    assert_eq!(app.logs.len().await, 1);

    let log = app.logs.get(log_id).await.unwrap().unwrap();
    assert_eq!(log.client_id, client_id);
    assert_eq!(log.amount, dec!(40));
    assert_eq!(log.note.as_deref(), Some("rent"));
    assert_eq!(gateway.call_count(), 1);
}

#[tokio::test]
async fn withdraw_insufficient_balance_mutates_nothing() {
    let gateway = StubGateway::ok();
    let app = spawn_app(gateway.clone());
    let client_id = seed_client(&app, dec!(25.0)).await;

    let response = post_json(
        &app,
        "/api/withdraw",
        Some(&app.token),
        json!({ "client_id": client_id, "amount": 26 }),
    )
    .await;

    assert_detail(response, StatusCode::BAD_REQUEST, "Insufficient balance").await;
    assert_eq!(capital_of(&app, &client_id).await, dec!(25.0));
    assert!(app.logs.is_empty().await);
    assert_eq!(gateway.call_count(), 0);
}

#[tokio::test]
async fn withdraw_unknown_client_is_404() {
    let app = spawn_app(StubGateway::ok());

    let response = post_json(
        &app,
        "/api/withdraw",
        Some(&app.token),
        json!({ "client_id": Uuid::new_v4().to_string(), "amount": 5 }),
    )
    .await;
    assert_detail(response, StatusCode::NOT_FOUND, "Client not found").await;

    // a malformed id can never match a record either
    let response = post_json(
        &app,
        "/api/withdraw",
        Some(&app.token),
        json!({ "client_id": "not-an-id", "amount": 5 }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn withdraw_rejects_non_positive_amounts() {
    let app = spawn_app(StubGateway::ok());
    let client_id = seed_client(&app, dec!(10.0)).await;

    for amount in [json!(0), json!(-3)] {
        let response = post_json(
            &app,
            "/api/withdraw",
            Some(&app.token),
            json!({ "client_id": client_id, "amount": amount }),
        )
        .await;
        assert_detail(response, StatusCode::BAD_REQUEST, "Invalid amount").await;
    }
    assert_eq!(capital_of(&app, &client_id).await, dec!(10.0));
}

#[tokio::test]
async fn gateway_failure_is_recorded_not_raised() {
    let gateway = StubGateway::failing();
    let app = spawn_app(gateway);
    let client_id = seed_client(&app, dec!(80.0)).await;

    let response = post_json(
        &app,
        "/api/withdraw",
        Some(&app.token),
        json!({ "client_id": client_id, "amount": 30 }),
    )
    .await;

    // the request still reports success for the internal ledger mutation
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["gateway"]["status"], 500);
    assert_eq!(body["gateway"]["body"]["error"], "simulated gateway timeout");

    assert_eq!(capital_of(&app, &client_id).await, dec!(50.0));

    let log = app
        .logs
        .get(body["log_id"].as_str().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(log.external.status, 500);
}
