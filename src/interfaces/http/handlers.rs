use super::auth::{AuthClaims, AuthError, issue_token};
use super::dto::{
    ClientsResponse, CreatedResponse, LoginRequest, LoginResponse, Message, QuoteParams,
    ReceiptResponse, TransferRequest, UpdatedResponse, WithdrawRequest,
};
use super::error::ApiError;
use super::router::AppState;
use crate::domain::admin::NewAdmin;
use crate::domain::client::{ClientPatch, NewClient};
use axum::Json;
use axum::extract::{Path, Query, State};
use serde_json::Value;

pub async fn root() -> Json<Message> {
    Json(Message {
        message: "Zenith Broking API is running".to_string(),
    })
}

/// Admin login with first-use bootstrap: an unknown email creates the admin
/// record with the supplied password instead of failing.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let admin = match state.admins.find_by_email(&payload.email).await? {
        Some(admin) => {
            let ok = bcrypt::verify(&payload.password, &admin.password_hash)
                .map_err(|_| AuthError::BadCredentials)?;
            if !ok {
                return Err(AuthError::BadCredentials.into());
            }
            admin
        }
        None => {
            let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST)
                .map_err(|e| ApiError::internal(e.to_string()))?;
            tracing::info!(email = %payload.email, "bootstrapping admin account");
            state
                .admins
                .insert(NewAdmin {
                    email: payload.email.clone(),
                    password_hash,
                })
                .await?
        }
    };

    let token = issue_token(
        &state.auth.secret,
        &admin.id,
        &admin.email,
        state.auth.expires_minutes,
    )?;
    Ok(Json(LoginResponse {
        token,
        email: admin.email,
    }))
}

pub async fn list_clients(
    _auth: AuthClaims,
    State(state): State<AppState>,
) -> Result<Json<ClientsResponse>, ApiError> {
    let clients = state.clients.all().await?;
    Ok(Json(ClientsResponse { clients }))
}

pub async fn create_client(
    _auth: AuthClaims,
    State(state): State<AppState>,
    Json(payload): Json<NewClient>,
) -> Result<Json<CreatedResponse>, ApiError> {
    let client = state.clients.insert(payload).await?;
    Ok(Json(CreatedResponse { id: client.id }))
}

pub async fn update_client(
    _auth: AuthClaims,
    State(state): State<AppState>,
    Path(client_id): Path<String>,
    Json(payload): Json<ClientPatch>,
) -> Result<Json<UpdatedResponse>, ApiError> {
    if payload.is_empty() {
        return Err(ApiError::bad_request("No fields to update"));
    }
    if !state.clients.update(&client_id, payload).await? {
        return Err(ApiError::not_found("Client not found"));
    }
    Ok(Json(UpdatedResponse { status: "updated" }))
}

pub async fn withdraw(
    _auth: AuthClaims,
    State(state): State<AppState>,
    Json(payload): Json<WithdrawRequest>,
) -> Result<Json<ReceiptResponse>, ApiError> {
    let receipt = state
        .processor
        .withdraw(&payload.client_id, payload.amount, payload.note)
        .await?;
    Ok(Json(receipt.into()))
}

pub async fn transfer(
    _auth: AuthClaims,
    State(state): State<AppState>,
    Json(payload): Json<TransferRequest>,
) -> Result<Json<ReceiptResponse>, ApiError> {
    let receipt = state
        .processor
        .transfer(
            &payload.from_client_id,
            &payload.to_client_id,
            payload.amount,
            payload.note,
        )
        .await?;
    Ok(Json(receipt.into()))
}

/// Quote passthrough, keeping the provider key server-side. Open like the
/// liveness route; it touches no ledger state.
pub async fn market_quote(
    State(state): State<AppState>,
    Query(params): Query<QuoteParams>,
) -> Result<Json<Value>, ApiError> {
    let body = state.quotes.quote(&params.symbol).await?;
    Ok(Json(body))
}
