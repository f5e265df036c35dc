use thiserror::Error;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("LMDB error: {0}")]
    Lmdb(#[from] lmdb::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("duplicate complaint id: {0}")]
    DuplicateId(String),
    #[error("unknown complaint status: {0:?}")]
    InvalidStatus(String),
    #[error("complaint store is closed")]
    Closed,
}
