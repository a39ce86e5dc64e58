#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode, header};
use http_body_util::BodyExt;
use rust_decimal::Decimal;
use serde_json::{Value, json};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tower::ServiceExt;
use zenith_broking::application::processor::TransactionProcessor;
use zenith_broking::domain::client::{Balance, NewClient};
use zenith_broking::domain::ports::{ClientStore, PayoutGateway, PayoutRequest};
use zenith_broking::domain::transaction::GatewayResult;
use zenith_broking::infrastructure::in_memory::{
    InMemoryAdminStore, InMemoryClientStore, InMemoryLogStore,
};
use zenith_broking::infrastructure::quotes::QuoteProxy;
use zenith_broking::interfaces::http::auth::{AuthSettings, issue_token};
use zenith_broking::interfaces::http::router::{AppState, app};

pub const TEST_SECRET: &str = "devsecret";

/// Gateway double: returns a canned result and counts invocations.
pub struct StubGateway {
    pub result: GatewayResult,
    pub calls: AtomicUsize,
}

impl StubGateway {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self {
            result: GatewayResult {
                status: 200,
                body: json!({ "id": "pout_stub", "status": "processed" }),
            },
            calls: AtomicUsize::new(0),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            result: GatewayResult::synthetic_failure("simulated gateway timeout"),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PayoutGateway for StubGateway {
    async fn payout(&self, _request: PayoutRequest) -> GatewayResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.result.clone()
    }
}

pub struct TestApp {
    pub router: Router,
    pub clients: Arc<InMemoryClientStore>,
    pub logs: Arc<InMemoryLogStore>,
    pub admins: Arc<InMemoryAdminStore>,
    pub token: String,
}

pub fn spawn_app(gateway: Arc<StubGateway>) -> TestApp {
    let clients = Arc::new(InMemoryClientStore::new());
    let logs = Arc::new(InMemoryLogStore::new());
    let admins = Arc::new(InMemoryAdminStore::new());

    let processor = Arc::new(TransactionProcessor::new(
        clients.clone(),
        logs.clone(),
        gateway,
    ));
    let quotes = Arc::new(QuoteProxy::new("https://api.twelvedata.com", None).unwrap());

    let state = AppState {
        processor,
        clients: clients.clone(),
        admins: admins.clone(),
        quotes,
        auth: AuthSettings {
            secret: TEST_SECRET.to_string(),
            expires_minutes: 5,
        },
    };

    let token = issue_token(TEST_SECRET, "admin-test", "root@zenith.in", 5).unwrap();
    TestApp {
        router: app(state, "*"),
        clients,
        logs,
        admins,
        token,
    }
}

pub async fn seed_client(app: &TestApp, capital: Decimal) -> String {
    app.clients
        .insert(NewClient {
            name: "Asha".into(),
            email: "asha@example.com".into(),
            phone: None,
            capital: Balance::new(capital),
            profit: Balance::ZERO,
        })
        .await
        .unwrap()
        .id
}

pub async fn capital_of(app: &TestApp, client_id: &str) -> Decimal {
    app.clients.get(client_id).await.unwrap().unwrap().capital.0
}

pub async fn post_json(app: &TestApp, uri: &str, token: Option<&str>, body: Value) -> Response<Body> {
    let mut request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = request
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &TestApp, uri: &str, token: Option<&str>) -> Response<Body> {
    let mut request = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = request.body(Body::empty()).unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn patch_json(
    app: &TestApp,
    uri: &str,
    token: Option<&str>,
    body: Value,
) -> Response<Body> {
    let mut request = Request::builder()
        .method("PATCH")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        request = request.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = request
        .body(Body::from(serde_json::to_vec(&body).unwrap()))
        .unwrap();
    app.router.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

pub async fn assert_detail(response: Response<Body>, status: StatusCode, detail: &str) {
    assert_eq!(response.status(), status);
    let body = body_json(response).await;
    assert_eq!(body["detail"], detail);
}
