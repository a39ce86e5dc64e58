use crate::domain::admin::{Admin, NewAdmin};
use crate::domain::client::{Amount, Balance, Client, ClientPatch, NewClient};
use crate::domain::ports::{AdminStore, ClientStore, DebitOutcome, TransactionLogStore};
use crate::domain::transaction::{LogEntry, TransactionLog};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use rocksdb::{ColumnFamilyDescriptor, DB, Options};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Column Family for client records.
pub const CF_CLIENTS: &str = "clients";
/// Column Family for the append-only transaction log.
pub const CF_LOGS: &str = "transactionlogs";
/// Column Family for admin records, keyed by email.
pub const CF_ADMINS: &str = "admins";

/// A persistent ledger store backed by RocksDB.
///
/// Records are JSON-encoded, one column family per collection. Client
/// mutations run under a mutex so the conditional debit remains a single
/// atomic update; RocksDB has no conditional write of its own.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksStore {
    db: Arc<DB>,
    client_writes: Arc<Mutex<()>>,
}

impl RocksStore {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// the required column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cfs = vec![
            ColumnFamilyDescriptor::new(CF_CLIENTS, Options::default()),
            ColumnFamilyDescriptor::new(CF_LOGS, Options::default()),
            ColumnFamilyDescriptor::new(CF_ADMINS, Options::default()),
        ];

        let db = DB::open_cf_descriptors(&opts, path, cfs)
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Ok(Self {
            db: Arc::new(db),
            client_writes: Arc::new(Mutex::new(())),
        })
    }

    fn cf(&self, name: &str) -> Result<&rocksdb::ColumnFamily, StoreError> {
        self.db
            .cf_handle(name)
            .ok_or_else(|| StoreError::Unavailable(format!("column family {name} not found")))
    }

    fn put<T: serde::Serialize>(&self, cf: &str, key: &str, value: &T) -> Result<(), StoreError> {
        let cf = self.cf(cf)?;
        let bytes =
            serde_json::to_vec(value).map_err(|e| StoreError::Corrupt(e.to_string()))?;
        self.db
            .put_cf(&cf, key.as_bytes(), bytes)
            .map_err(|e| StoreError::Unavailable(e.to_string()))
    }

    fn fetch<T: serde::de::DeserializeOwned>(
        &self,
        cf: &str,
        key: &str,
    ) -> Result<Option<T>, StoreError> {
        let cf = self.cf(cf)?;
        let bytes = self
            .db
            .get_cf(&cf, key.as_bytes())
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;
        match bytes {
            Some(bytes) => {
                let value = serde_json::from_slice(&bytes)
                    .map_err(|e| StoreError::Corrupt(e.to_string()))?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }
}

fn check_id(id: &str) -> Result<(), StoreError> {
    Uuid::parse_str(id)
        .map(|_| ())
        .map_err(|_| StoreError::MalformedId(id.to_string()))
}

#[async_trait]
impl ClientStore for RocksStore {
    async fn insert(&self, new: NewClient) -> Result<Client, StoreError> {
        let client = Client {
            id: Uuid::new_v4().to_string(),
            name: new.name,
            email: new.email,
            phone: new.phone,
            capital: new.capital,
            profit: new.profit,
            created_at: Utc::now(),
        };
        let _guard = self.client_writes.lock().await;
        self.put(CF_CLIENTS, &client.id, &client)?;
        Ok(client)
    }

    async fn get(&self, id: &str) -> Result<Option<Client>, StoreError> {
        check_id(id)?;
        self.fetch(CF_CLIENTS, id)
    }

    async fn all(&self) -> Result<Vec<Client>, StoreError> {
        let cf = self.cf(CF_CLIENTS)?;
        let mut clients = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item.map_err(|e| StoreError::Unavailable(e.to_string()))?;
            let client =
                serde_json::from_slice(&value).map_err(|e| StoreError::Corrupt(e.to_string()))?;
            clients.push(client);
        }
        Ok(clients)
    }

    async fn update(&self, id: &str, patch: ClientPatch) -> Result<bool, StoreError> {
        check_id(id)?;
        let _guard = self.client_writes.lock().await;
        match self.fetch::<Client>(CF_CLIENTS, id)? {
            Some(mut client) => {
                if let Some(capital) = patch.capital {
                    client.capital = Balance::new(capital);
                }
                if let Some(profit) = patch.profit {
                    client.profit = Balance::new(profit);
                }
                self.put(CF_CLIENTS, id, &client)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn credit(&self, id: &str, amount: Amount) -> Result<bool, StoreError> {
        check_id(id)?;
        let _guard = self.client_writes.lock().await;
        match self.fetch::<Client>(CF_CLIENTS, id)? {
            Some(mut client) => {
                client.capital += amount.into();
                self.put(CF_CLIENTS, id, &client)?;
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
        let _guard = self.client_writes.lock().await;
        match self.fetch::<Client>(CF_CLIENTS, id)? {
            Some(mut client) => {
                if client.capital >= amount.into() {
                    client.capital -= amount.into();
                    self.put(CF_CLIENTS, id, &client)?;
                    Ok(DebitOutcome::Applied)
                } else {
                    Ok(DebitOutcome::Insufficient)
                }
            }
            None => Ok(DebitOutcome::NotFound),
        }
    }
}

#[async_trait]
impl TransactionLogStore for RocksStore {
    async fn insert(&self, entry: LogEntry) -> Result<TransactionLog, StoreError> {
        let log = TransactionLog {
            id: Uuid::new_v4().to_string(),
            client_id: entry.client_id,
            amount: entry.amount,
            action: entry.action,
            timestamp: Utc::now(),
            note: entry.note,
            external: entry.external,
        };
        self.put(CF_LOGS, &log.id, &log)?;
        Ok(log)
    }

    async fn get(&self, id: &str) -> Result<Option<TransactionLog>, StoreError> {
        check_id(id)?;
        self.fetch(CF_LOGS, id)
    }
}

#[async_trait]
impl AdminStore for RocksStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Admin>, StoreError> {
        self.fetch(CF_ADMINS, email)
    }

    async fn insert(&self, new: NewAdmin) -> Result<Admin, StoreError> {
        let admin = Admin {
            id: Uuid::new_v4().to_string(),
            email: new.email,
            password_hash: new.password_hash,
            created_at: Utc::now(),
        };
        self.put(CF_ADMINS, &admin.email, &admin)?;
        Ok(admin)
    }
}
