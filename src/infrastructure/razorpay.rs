use crate::domain::ports::{PayoutGateway, PayoutRequest};
use crate::domain::transaction::GatewayResult;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

const PAYOUT_TIMEOUT: Duration = Duration::from_secs(10);

/// Razorpay Payouts adapter.
///
/// Performs exactly one outbound POST per payout with a bounded timeout and
/// no retries; provider-side deduplication relies on the caller's
/// `reference_id`. Failures are downgraded to a synthetic `GatewayResult`
/// so they can be recorded in the transaction log without failing the
/// request.
pub struct RazorpayGateway {
    http: reqwest::Client,
    base_url: String,
    key_id: String,
    key_secret: String,
    source_account: String,
    fund_account_id: String,
}

impl RazorpayGateway {
    pub fn new(
        base_url: impl Into<String>,
        key_id: impl Into<String>,
        key_secret: impl Into<String>,
        source_account: impl Into<String>,
        fund_account_id: impl Into<String>,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(PAYOUT_TIMEOUT).build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            key_id: key_id.into(),
            key_secret: key_secret.into(),
            source_account: source_account.into(),
            fund_account_id: fund_account_id.into(),
        })
    }
}

#[async_trait]
impl PayoutGateway for RazorpayGateway {
    async fn payout(&self, request: PayoutRequest) -> GatewayResult {
        let body = serde_json::json!({
            "account_number": self.source_account,
            "fund_account_id": self.fund_account_id,
            "amount": request.amount_minor,
            "currency": "INR",
            "mode": "IMPS",
            "purpose": "payout",
            "queue_if_low_balance": true,
            "reference_id": request.reference_id,
            "narration": request.narration,
        });

        let response = self
            .http
            .post(format!("{}/payouts", self.base_url))
            .basic_auth(&self.key_id, Some(&self.key_secret))
            .json(&body)
            .send()
            .await;

        match response {
            Ok(response) => {
                let status = response.status().as_u16();
                match response.bytes().await {
                    Ok(bytes) if bytes.is_empty() => GatewayResult {
                        status,
                        body: Value::Object(Default::default()),
                    },
                    Ok(bytes) => match serde_json::from_slice(&bytes) {
                        Ok(body) => GatewayResult { status, body },
                        Err(e) => {
                            tracing::warn!(status, error = %e, "payout response was not JSON");
                            GatewayResult::synthetic_failure(e)
                        }
                    },
                    Err(e) => {
                        tracing::warn!(status, error = %e, "failed to read payout response");
                        GatewayResult::synthetic_failure(e)
                    }
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "payout call failed");
                GatewayResult::synthetic_failure(e)
            }
        }
    }
}
