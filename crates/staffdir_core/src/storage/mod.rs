//! Key-value persistence port and its adapters.
//!
//! # Responsibility
//! - Define the string-in/string-out contract the store persists through.
//! - Provide in-memory, file and SQLite backends behind that contract.
//!
//! # Invariants
//! - A backend never interprets values; the store owns the JSON format.
//! - `read` of a never-written key is `Ok(None)`, not an error.

use std::error::Error;
use std::fmt::{Display, Formatter};

mod file;
mod memory;
mod sqlite;

pub use file::FileStorage;
pub use memory::MemoryStorage;
pub use sqlite::{
    ensure_kv_schema, open_sqlite, open_sqlite_in_memory, SqliteStorage, KV_SCHEMA_VERSION,
};

/// Key under which the employee collection is persisted.
pub const STORAGE_KEY: &str = "employees";

pub type StorageResult<T> = Result<T, StorageError>;

/// Backend failure while reading or writing one key.
#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Sqlite(rusqlite::Error),
    /// SQLite file is not at the `kv_entries` schema this build writes.
    UnsupportedSchemaVersion { found: u32, supported: u32 },
    /// Key cannot be mapped onto the backend (e.g. path separators).
    InvalidKey(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(err) => write!(f, "storage io failure: {err}"),
            Self::Sqlite(err) => write!(f, "sqlite failure: {err}"),
            Self::UnsupportedSchemaVersion { found, supported } => write!(
                f,
                "sqlite schema version {found} does not match supported {supported}"
            ),
            Self::InvalidKey(key) => write!(f, "invalid storage key `{key}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::InvalidKey(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<rusqlite::Error> for StorageError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// String key-value backend used for snapshot persistence.
pub trait KeyValueStorage {
    fn read(&self, key: &str) -> StorageResult<Option<String>>;
    fn write(&self, key: &str, value: &str) -> StorageResult<()>;
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for &T {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}

impl<T: KeyValueStorage + ?Sized> KeyValueStorage for Box<T> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).write(key, value)
    }
}
