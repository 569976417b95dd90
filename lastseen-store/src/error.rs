use thiserror::Error;

/// Errors from LastSeenDb operations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl StoreError {
    /// Another handle (usually another process) holds the database lock.
    pub fn is_already_open(&self) -> bool {
        matches!(
            self,
            StoreError::Database(redb::DatabaseError::DatabaseAlreadyOpen)
        )
    }
}
