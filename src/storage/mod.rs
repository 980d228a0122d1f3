//! Storage adapters for parsed records
//!
//! Two interchangeable backends behind the `StorageAdapter` capability: an
//! in-memory tabular store for short runs and a file-backed SQLite store
//! that persists rows incrementally and survives restarts. The backend is
//! selected by configuration; adding a third backend only requires
//! implementing the write capability.

mod memory;
mod schema;
mod sqlite;
mod traits;

pub use memory::MemoryStorage;
pub use schema::initialize_schema;
pub use sqlite::SqliteStorage;
pub use traits::{StorageAdapter, StorageError, StorageResult};

use crate::config::{StorageBackend, StorageConfig};
use crate::ScrapeError;
use std::path::Path;

/// Opens the storage backend named by the configuration
pub fn open_storage(config: &StorageConfig) -> Result<Box<dyn StorageAdapter>, ScrapeError> {
    match config.backend {
        StorageBackend::Memory => {
            let storage = match &config.csv_dir {
                Some(dir) => MemoryStorage::with_csv_export(Path::new(dir)),
                None => MemoryStorage::new(),
            };
            Ok(Box::new(storage))
        }
        StorageBackend::Sqlite => {
            // Validation guarantees the path is present for this backend
            let path = config.database_path.as_deref().ok_or_else(|| {
                StorageError::Backend("sqlite backend requires database-path".to_string())
            })?;
            Ok(Box::new(SqliteStorage::new(Path::new(path))?))
        }
    }
}
