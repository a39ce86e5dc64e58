use crate::application::processor::Receipt;
use crate::domain::client::Client;
use crate::domain::transaction::GatewayResult;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct Message {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct WithdrawRequest {
    pub client_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub note: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub from_client_id: String,
    pub to_client_id: String,
    pub amount: Decimal,
    #[serde(default)]
    pub note: Option<String>,
}

/// Response for a processed withdraw or transfer: the internal ledger
/// mutation committed, and `gateway` is whatever the payout provider
/// reported (possibly a synthetic failure).
#[derive(Debug, Serialize)]
pub struct ReceiptResponse {
    pub status: &'static str,
    pub log_id: String,
    pub gateway: GatewayResult,
}

impl From<Receipt> for ReceiptResponse {
    fn from(receipt: Receipt) -> Self {
        Self {
            status: "processed",
            log_id: receipt.log_id,
            gateway: receipt.gateway,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ClientsResponse {
    pub clients: Vec<Client>,
}

#[derive(Debug, Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

#[derive(Debug, Serialize)]
pub struct UpdatedResponse {
    pub status: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct QuoteParams {
    pub symbol: String,
}
