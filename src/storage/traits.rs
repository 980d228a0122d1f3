//! Storage adapter trait and error types

use crate::records::PageRecord;
use thiserror::Error;

/// Errors that can occur during storage operations
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Append-only sink for parsed records
///
/// This is the only capability the driving loop requires; any backend that
/// can append a batch of records qualifies. There are no update or delete
/// semantics and no transactional guarantees across batches.
pub trait StorageAdapter {
    /// Appends a batch of records
    fn write(&mut self, records: &[PageRecord]) -> StorageResult<()>;

    /// Finalizes the store at the end of a run
    ///
    /// Backends that buffer (the in-memory table with CSV export) flush
    /// here; incremental backends have nothing to do.
    fn finish(&mut self) -> StorageResult<()> {
        Ok(())
    }
}
