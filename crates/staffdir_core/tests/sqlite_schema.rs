use rusqlite::Connection;
use staffdir_core::storage::ensure_kv_schema;
use staffdir_core::{
    open_sqlite, open_sqlite_in_memory, KeyValueStorage, SqliteStorage, StorageError,
    KV_SCHEMA_VERSION,
};

#[test]
fn in_memory_connection_gets_kv_table() {
    let conn = open_sqlite_in_memory().unwrap();

    assert_eq!(schema_version(&conn), KV_SCHEMA_VERSION);
    assert_table_exists(&conn, "kv_entries");
}

#[test]
fn reopening_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staffdir.db");

    {
        let conn = open_sqlite(&path).unwrap();
        SqliteStorage::try_new(&conn)
            .unwrap()
            .write("employees", "[]")
            .unwrap();
    }

    let conn = open_sqlite(&path).unwrap();
    assert_eq!(schema_version(&conn), KV_SCHEMA_VERSION);
    let storage = SqliteStorage::try_new(&conn).unwrap();
    assert_eq!(storage.read("employees").unwrap().as_deref(), Some("[]"));
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_sqlite(&path).unwrap_err() {
        StorageError::UnsupportedSchemaVersion { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, KV_SCHEMA_VERSION);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn storage_rejects_connection_without_schema() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteStorage::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        StorageError::UnsupportedSchemaVersion { found: 0, .. }
    ));

    ensure_kv_schema(&conn).unwrap();
    assert!(SqliteStorage::try_new(&conn).is_ok());
}

#[test]
fn write_upserts_a_single_row_per_key() {
    let conn = open_sqlite_in_memory().unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();

    storage.write("employees", "[1]").unwrap();
    storage.write("employees", "[2]").unwrap();

    assert_eq!(storage.read("employees").unwrap().as_deref(), Some("[2]"));
    assert_eq!(storage.read("missing").unwrap(), None);
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
