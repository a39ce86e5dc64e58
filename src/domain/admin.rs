use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The single administrative actor. Created lazily by the login bootstrap
/// when no record with that email exists yet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Admin {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub email: String,
    pub password_hash: String,
}
