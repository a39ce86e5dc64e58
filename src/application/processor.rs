use crate::domain::client::Amount;
use crate::domain::ports::{
    ClientStoreRef, DebitOutcome, PayoutGatewayRef, PayoutRequest, TransactionLogStoreRef,
};
use crate::domain::transaction::{GatewayResult, LogEntry, TxAction};
use crate::error::{Error, Result};
use chrono::Utc;
use rust_decimal::Decimal;

/// Outcome of a processed withdraw or transfer: the id of the audit record
/// and the payout gateway's (possibly synthetic) result.
#[derive(Debug, Clone, PartialEq)]
pub struct Receipt {
    pub log_id: String,
    pub gateway: GatewayResult,
}

/// Orchestrates one withdraw or one transfer over injected store and
/// gateway adapters.
///
/// Each run is request-scoped with no persisted intermediate state. Balance
/// sufficiency and the debit are a single atomic store operation, so
/// concurrent operations against the same client cannot over-draft it. The
/// gateway call's outcome is recorded but deliberately never blocks the
/// ledger mutation: the audit log plus an out-of-band reconciliation of its
/// `external` field is the remedy for gateway failures, not a request
/// failure.
pub struct TransactionProcessor {
    clients: ClientStoreRef,
    logs: TransactionLogStoreRef,
    gateway: PayoutGatewayRef,
}

impl TransactionProcessor {
    pub fn new(
        clients: ClientStoreRef,
        logs: TransactionLogStoreRef,
        gateway: PayoutGatewayRef,
    ) -> Self {
        Self {
            clients,
            logs,
            gateway,
        }
    }

    /// Debits `amount` from the client and disburses it through the payout
    /// gateway.
    ///
    /// Fails with `InvalidAmount`, `ClientNotFound`, or
    /// `InsufficientBalance` before any mutation; afterwards the debit is
    /// committed regardless of what the gateway reports.
    pub async fn withdraw(
        &self,
        client_id: &str,
        amount: Decimal,
        note: Option<String>,
    ) -> Result<Receipt> {
        let amount = Amount::new(amount)?;

        if self.clients.get(client_id).await?.is_none() {
            return Err(Error::ClientNotFound);
        }

        match self.clients.debit_if_sufficient(client_id, amount).await? {
            DebitOutcome::Applied => {}
            DebitOutcome::Insufficient => return Err(Error::InsufficientBalance),
            DebitOutcome::NotFound => return Err(Error::ClientNotFound),
        }

        let reference_id = format!("wd_{}_{}", client_id, Utc::now().timestamp());
        let gateway = self
            .gateway
            .payout(PayoutRequest {
                amount_minor: amount.minor_units(),
                reference_id,
                narration: note.clone().unwrap_or_else(|| "Withdrawal".to_string()),
            })
            .await;

        tracing::info!(
            client_id,
            amount = %amount.value(),
            gateway_status = gateway.status,
            "withdrawal processed"
        );

        let log = self
            .logs
            .insert(LogEntry {
                client_id: client_id.to_string(),
                amount: amount.value(),
                action: TxAction::Withdraw,
                note,
                external: gateway.clone(),
            })
            .await?;

        Ok(Receipt {
            log_id: log.id,
            gateway,
        })
    }

    /// Moves `amount` between two clients and records an auxiliary payout
    /// toward the destination.
    ///
    /// The two balance mutations are independent atomic increments, not a
    /// cross-record transaction. The audit record is keyed to the
    /// destination client.
    pub async fn transfer(
        &self,
        from_client_id: &str,
        to_client_id: &str,
        amount: Decimal,
        note: Option<String>,
    ) -> Result<Receipt> {
        let amount = Amount::new(amount)?;

        if self.clients.get(from_client_id).await?.is_none()
            || self.clients.get(to_client_id).await?.is_none()
        {
            return Err(Error::ClientNotFound);
        }

        match self
            .clients
            .debit_if_sufficient(from_client_id, amount)
            .await?
        {
            DebitOutcome::Applied => {}
            DebitOutcome::Insufficient => return Err(Error::InsufficientBalance),
            DebitOutcome::NotFound => return Err(Error::ClientNotFound),
        }

        // Clients are never deleted, so the credit cannot miss in practice.
        if !self.clients.credit(to_client_id, amount).await? {
            return Err(Error::ClientNotFound);
        }

        let reference_id = format!(
            "tf_{}_{}_{}",
            from_client_id,
            to_client_id,
            Utc::now().timestamp()
        );
        let gateway = self
            .gateway
            .payout(PayoutRequest {
                amount_minor: amount.minor_units(),
                reference_id,
                narration: note.clone().unwrap_or_else(|| "Transfer".to_string()),
            })
            .await;

        tracing::info!(
            from_client_id,
            to_client_id,
            amount = %amount.value(),
            gateway_status = gateway.status,
            "transfer processed"
        );

        let log = self
            .logs
            .insert(LogEntry {
                client_id: to_client_id.to_string(),
                amount: amount.value(),
                action: TxAction::Transfer,
                note,
                external: gateway.clone(),
            })
            .await?;

        Ok(Receipt {
            log_id: log.id,
            gateway,
        })
    }
}
