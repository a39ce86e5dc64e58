use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum TxAction {
    Withdraw,
    Transfer,
}

/// Snapshot of one payout-gateway exchange: the provider's HTTP status and
/// response body, or the synthetic 500 the adapter builds on failure.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct GatewayResult {
    pub status: u16,
    pub body: Value,
}

impl GatewayResult {
    /// The local failure marker: never raised, always recorded.
    pub fn synthetic_failure(description: impl std::fmt::Display) -> Self {
        Self {
            status: 500,
            body: serde_json::json!({ "error": description.to_string() }),
        }
    }
}

/// Draft of an audit record, as produced by the transaction processor.
/// The store stamps identity and the timestamp on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub client_id: String,
    pub amount: Decimal,
    pub action: TxAction,
    pub note: Option<String>,
    pub external: GatewayResult,
}

/// One stored audit record. Append-only: never updated or deleted, and the
/// only durable trace of what was attempted toward the payout gateway.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TransactionLog {
    pub id: String,
    pub client_id: String,
    pub amount: Decimal,
    pub action: TxAction,
    pub timestamp: DateTime<Utc>,
    pub note: Option<String>,
    pub external: GatewayResult,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_action_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&TxAction::Withdraw).unwrap(), "\"withdraw\"");
        assert_eq!(serde_json::to_string(&TxAction::Transfer).unwrap(), "\"transfer\"");
    }

    #[test]
    fn test_synthetic_failure_shape() {
        let result = GatewayResult::synthetic_failure("connection refused");
        assert_eq!(result.status, 500);
        assert_eq!(result.body["error"], "connection refused");
    }

    #[test]
    fn test_log_round_trip() {
        let log = TransactionLog {
            id: "a1".into(),
            client_id: "c1".into(),
            amount: dec!(25.5),
            action: TxAction::Withdraw,
            timestamp: Utc::now(),
            note: Some("rent".into()),
            external: GatewayResult {
                status: 200,
                body: serde_json::json!({ "id": "pout_1" }),
            },
        };

        let encoded = serde_json::to_vec(&log).unwrap();
        let decoded: TransactionLog = serde_json::from_slice(&encoded).unwrap();
        assert_eq!(decoded, log);
    }
}
