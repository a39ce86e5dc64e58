use super::admin::{Admin, NewAdmin};
use super::client::{Amount, Client, ClientPatch, NewClient};
use super::transaction::{GatewayResult, LogEntry, TransactionLog};
use crate::error::StoreError;
use async_trait::async_trait;
use std::sync::Arc;

/// Outcome of the atomic conditional debit.
///
/// The sufficiency check and the decrement are one storage-layer operation,
/// so two concurrent debits against the same client can never both pass the
/// check before either applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebitOutcome {
    Applied,
    Insufficient,
    NotFound,
}

#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Stamps `id` and `created_at`; the record is visible to lookups as
    /// soon as this returns.
    async fn insert(&self, new: NewClient) -> Result<Client, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<Client>, StoreError>;

    async fn all(&self) -> Result<Vec<Client>, StoreError>;

    /// Replaces the named fields. Returns `false` when no record matched.
    async fn update(&self, id: &str, patch: ClientPatch) -> Result<bool, StoreError>;

    /// Atomically adds `amount` to the client's capital. Returns `false`
    /// when no record matched.
    async fn credit(&self, id: &str, amount: Amount) -> Result<bool, StoreError>;

    /// Atomically subtracts `amount` from the client's capital iff
    /// `capital >= amount`.
    async fn debit_if_sufficient(&self, id: &str, amount: Amount)
    -> Result<DebitOutcome, StoreError>;
}

#[async_trait]
pub trait TransactionLogStore: Send + Sync {
    /// Stamps `id` and `timestamp` and returns the stored record.
    async fn insert(&self, entry: LogEntry) -> Result<TransactionLog, StoreError>;

    async fn get(&self, id: &str) -> Result<Option<TransactionLog>, StoreError>;
}

#[async_trait]
pub trait AdminStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError>;

    async fn insert(&self, new: NewAdmin) -> Result<Admin, StoreError>;
}

/// One disbursement request toward the payout provider. Provider account
/// identifiers and currency are the adapter's configuration, not the
/// caller's concern.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoutRequest {
    /// Amount in integer minor units.
    pub amount_minor: i64,
    /// Caller-generated token for provider-side deduplication.
    pub reference_id: String,
    pub narration: String,
}

/// Adapter for the external payout provider.
///
/// Infallible by contract: any failure (network, timeout, undecodable body)
/// is downgraded to a synthetic `GatewayResult` so gateway trouble never
/// propagates upward as an error. No retries are performed here.
#[async_trait]
pub trait PayoutGateway: Send + Sync {
    async fn payout(&self, request: PayoutRequest) -> GatewayResult;
}

pub type ClientStoreRef = Arc<dyn ClientStore>;
pub type TransactionLogStoreRef = Arc<dyn TransactionLogStore>;
pub type AdminStoreRef = Arc<dyn AdminStore>;
pub type PayoutGatewayRef = Arc<dyn PayoutGateway>;
