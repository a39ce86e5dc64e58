use crate::domain::admin::{Admin, NewAdmin};
use crate::domain::client::{Amount, Balance, Client, ClientPatch, NewClient};
use crate::domain::ports::{AdminStore, ClientStore, DebitOutcome, TransactionLogStore};
use crate::domain::transaction::{LogEntry, TransactionLog};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

// Every store-generated id is a UUID; anything that does not parse as one
// can never match a record. Mirrors the original backend's ObjectId parse
// failure, surfaced as a structured error instead of a silent miss.
fn check_id(id: &str) -> Result<(), StoreError> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| StoreError::MalformedId(id.to_string()))
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// A thread-safe in-memory client store.
///
/// Uses `Arc<RwLock<HashMap>>` for shared concurrent access; the write lock
/// makes the conditional debit a single atomic update.
#[derive(Default, Clone)]
pub struct InMemoryClientStore {
    clients: Arc<RwLock<HashMap<String, Client>>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn insert(&self, new: NewClient) -> Result<Client, StoreError> {
        let client = Client {
            id: new_id(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            capital: new.capital,
            profit: new.profit,
            created_at: Utc::now(),
        };
        let mut clients = self.clients.write().await;
        clients.insert(client.id.clone(), client.clone());
        Ok(client)
    }

    async fn get(&self, id: &str) -> Result<Option<Client>, StoreError> {
        check_id(id)?;
        let clients = self.clients.read().await;
        Ok(clients.get(id).cloned())
    }

    async fn all(&self) -> Result<Vec<Client>, StoreError> {
        let clients = self.clients.read().await;
        Ok(clients.values().cloned().collect())
    }

    async fn update(&self, id: &str, patch: ClientPatch) -> Result<bool, StoreError> {
        check_id(id)?;
        let mut clients = self.clients.write().await;
        match clients.get_mut(id) {
            Some(client) => {
                if let Some(capital) = patch.capital {
                    client.capital = Balance::new(capital);
                }
                if let Some(profit) = patch.profit {
                    client.profit = Balance::new(profit);
                }
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn credit(&self, id: &str, amount: Amount) -> Result<bool, StoreError> {
        check_id(id)?;
        let mut clients = self.clients.write().await;
        match clients.get_mut(id) {
            Some(client) => {
                client.capital += amount.into();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn debit_if_sufficient(
        &self,
        id: &str,
        amount: Amount,
    ) -> Result<DebitOutcome, StoreError> {
        check_id(id)?;
        let mut clients = self.clients.write().await;
        match clients.get_mut(id) {
            Some(client) => {
                if client.capital >= amount.into() {
                    client.capital -= amount.into();
                    Ok(DebitOutcome::Applied)
                } else {
                    Ok(DebitOutcome::Insufficient)
                }
            }
            None => Ok(DebitOutcome::NotFound),
        }
    }
}

/// A thread-safe in-memory store for the append-only transaction log.
#[derive(Default, Clone)]
pub struct InMemoryLogStore {
    logs: Arc<RwLock<HashMap<String, TransactionLog>>>,
}

impl InMemoryLogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records written so far. Test hook for the "exactly one log
    /// record" properties.
    pub async fn len(&self) -> usize {
        self.logs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.logs.read().await.is_empty()
    }
}

#[async_trait]
impl TransactionLogStore for InMemoryLogStore {
    async fn insert(&self, entry: LogEntry) -> Result<TransactionLog, StoreError> {
        let log = TransactionLog {
            id: new_id(),
            client_id: entry.client_id,
            amount: entry.amount,
            action: entry.action,
            timestamp: Utc::now(),
            note: entry.note,
            external: entry.external,
        };
        let mut logs = self.logs.write().await;
        logs.insert(log.id.clone(), log.clone());
        Ok(log)
    }

    async fn get(&self, id: &str) -> Result<Option<TransactionLog>, StoreError> {
        check_id(id)?;
        let logs = self.logs.read().await;
        Ok(logs.get(id).cloned())
    }
}

/// In-memory admin store, keyed by email for the login path.
#[derive(Default, Clone)]
pub struct InMemoryAdminStore {
    admins: Arc<RwLock<HashMap<String, Admin>>>,
}

impl InMemoryAdminStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AdminStore for InMemoryAdminStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        let admins = self.admins.read().await;
        Ok(admins.get(email).cloned())
    }

    async fn insert(&self, new: NewAdmin) -> Result<Admin, StoreError> {
        let admin = Admin {
            id: new_id(),
            email: new.email,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };
        let mut admins = self.admins.write().await;
        admins.insert(admin.email.clone(), admin.clone());
        Ok(admin)
    }
}
