use super::auth::AuthSettings;
use super::handlers;
use crate::application::processor::TransactionProcessor;
use crate::domain::ports::{AdminStoreRef, ClientStoreRef};
use crate::infrastructure::quotes::QuoteProxy;
use axum::Router;
use axum::http::HeaderValue;
use axum::routing::{get, patch, post};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared application dependencies behind the router.
///
/// Stores and the gateway are trait objects, constructed at startup and
/// injected here; there is no process-wide datastore handle.
#[derive(Clone)]
pub struct AppState {
    pub processor: Arc<TransactionProcessor>,
    pub clients: ClientStoreRef,
    pub admins: AdminStoreRef,
    pub quotes: Arc<QuoteProxy>,
    pub auth: AuthSettings,
}

fn cors_layer(frontend_origin: &str) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if frontend_origin == "*" {
        return layer.allow_origin(Any);
    }
    match frontend_origin.parse::<HeaderValue>() {
        Ok(origin) => layer.allow_origin(origin),
        Err(_) => {
            tracing::warn!(frontend_origin, "unparseable CORS origin, allowing any");
            layer.allow_origin(Any)
        }
    }
}

pub fn app(state: AppState, frontend_origin: &str) -> Router {
    Router::new()
        .route("/", get(handlers::root))
        .route("/api/admin/login", post(handlers::admin_login))
        .route(
            "/api/clients",
            get(handlers::list_clients).post(handlers::create_client),
        )
        .route("/api/clients/{client_id}", patch(handlers::update_client))
        .route("/api/withdraw", post(handlers::withdraw))
        .route("/api/transfer", post(handlers::transfer))
        .route("/api/market/quote", get(handlers::market_quote))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(frontend_origin))
        .with_state(state)
}
