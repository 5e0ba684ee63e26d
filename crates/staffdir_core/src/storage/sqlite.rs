//! SQLite-backed storage over the `kv_entries` table.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`; a fresh database is
//!   0 and the `kv_entries` layout is `KV_SCHEMA_VERSION`.
//! - `SqliteStorage` only wraps connections already at `KV_SCHEMA_VERSION`.
//! - `write` is an upsert; each key holds exactly one row.

use super::{KeyValueStorage, StorageError, StorageResult};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::cmp::Ordering;
use std::path::Path;
use std::time::{Duration, Instant};

/// `user_version` written once the `kv_entries` table exists.
pub const KV_SCHEMA_VERSION: u32 = 1;

const KV_SCHEMA_SQL: &str = include_str!("kv_entries.sql");

/// Opens (or creates) a SQLite file ready for `SqliteStorage`.
///
/// # Side effects
/// - Emits `sqlite_open` logging events with duration and status.
pub fn open_sqlite(path: impl AsRef<Path>) -> StorageResult<Connection> {
    open_with("file", || Connection::open(path))
}

/// In-memory variant of `open_sqlite`, mostly for tests.
pub fn open_sqlite_in_memory() -> StorageResult<Connection> {
    open_with("memory", Connection::open_in_memory)
}

/// Creates `kv_entries` on a fresh database and stamps the schema version.
///
/// # Errors
/// - `StorageError::UnsupportedSchemaVersion` when the file was written by
///   a newer layout.
pub fn ensure_kv_schema(conn: &Connection) -> StorageResult<()> {
    let found = schema_version(conn)?;
    match found.cmp(&KV_SCHEMA_VERSION) {
        Ordering::Equal => Ok(()),
        Ordering::Greater => Err(StorageError::UnsupportedSchemaVersion {
            found,
            supported: KV_SCHEMA_VERSION,
        }),
        Ordering::Less => {
            let tx = conn.unchecked_transaction()?;
            tx.execute_batch(KV_SCHEMA_SQL)?;
            tx.pragma_update(None, "user_version", KV_SCHEMA_VERSION)?;
            tx.commit()?;
            info!(
                "event=sqlite_schema module=storage status=ok from_version={found} to_version={KV_SCHEMA_VERSION}"
            );
            Ok(())
        }
    }
}

fn open_with(
    mode: &'static str,
    connect: impl FnOnce() -> rusqlite::Result<Connection>,
) -> StorageResult<Connection> {
    let started_at = Instant::now();
    let opened = connect().map_err(StorageError::from).and_then(|conn| {
        conn.busy_timeout(Duration::from_secs(5))?;
        ensure_kv_schema(&conn)?;
        Ok(conn)
    });

    match &opened {
        Ok(_) => info!(
            "event=sqlite_open module=storage status=ok mode={mode} duration_ms={}",
            started_at.elapsed().as_millis()
        ),
        Err(err) => error!(
            "event=sqlite_open module=storage status=error mode={mode} duration_ms={} error={err}",
            started_at.elapsed().as_millis()
        ),
    }
    opened
}

fn schema_version(conn: &Connection) -> StorageResult<u32> {
    let version = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    Ok(version)
}

/// Key-value storage borrowing an open SQLite connection.
pub struct SqliteStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteStorage<'conn> {
    /// Wraps `conn`, rejecting connections whose schema is not current.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let found = schema_version(conn)?;
        if found != KV_SCHEMA_VERSION {
            return Err(StorageError::UnsupportedSchemaVersion {
                found,
                supported: KV_SCHEMA_VERSION,
            });
        }
        Ok(Self { conn })
    }
}

impl KeyValueStorage for SqliteStorage<'_> {
    fn read(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}
