use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures surfaced by the storage adapters.
///
/// Absence is never an error: lookups return `Ok(None)` and conditional
/// updates report their outcome as data. These variants cover the cases the
/// original backend collapsed into a single "not found" signal.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("malformed record id: {0}")]
    MalformedId(String),
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("corrupt stored record: {0}")]
    Corrupt(String),
}

/// Errors produced by the transaction processor and the client CRUD surface.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Client not found")]
    ClientNotFound,
    #[error("Insufficient balance")]
    InsufficientBalance,
    #[error("Invalid amount")]
    InvalidAmount,
    #[error(transparent)]
    Store(#[from] StoreError),
}
