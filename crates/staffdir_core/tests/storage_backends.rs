use chrono::NaiveDate;
use staffdir_core::{
    open_sqlite, EmployeeDraft, EmployeeStore, FileStorage, FixedClock, KeyValueStorage,
    SqliteStorage, StoreConfig, STORAGE_KEY,
};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn clock() -> FixedClock {
    FixedClock::new(date(2024, 6, 15))
}

fn bob() -> EmployeeDraft {
    EmployeeDraft {
        first_name: "Bob".to_string(),
        last_name: "Johnson".to_string(),
        email: "bob@test.com".to_string(),
        phone: "+1555987654321".to_string(),
        date_of_employment: Some(date(2019, 7, 15)),
        date_of_birth: Some(date(1988, 12, 10)),
        department: "Tech".to_string(),
        position: "Medior".to_string(),
    }
}

#[test]
fn file_storage_survives_reopen() {
    let dir = tempfile::tempdir().unwrap();

    let added = {
        let mut store = EmployeeStore::with_clock(FileStorage::open(dir.path()).unwrap(), clock());
        store.add(&bob()).unwrap()
    };

    let store = EmployeeStore::with_clock(FileStorage::open(dir.path()).unwrap(), clock());
    assert_eq!(store.get_all(), vec![added]);
    assert!(dir.path().join("employees.json").is_file());
}

#[test]
fn file_snapshot_is_a_camel_case_json_array() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    let mut store = EmployeeStore::with_clock(&storage, clock());
    let added = store.add(&bob()).unwrap();

    let raw = storage.read(STORAGE_KEY).unwrap().unwrap();
    let json: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        json,
        serde_json::json!([{
            "id": added.id,
            "firstName": "Bob",
            "lastName": "Johnson",
            "email": "bob@test.com",
            "phone": "+1555987654321",
            "dateOfEmployment": "2019-07-15",
            "dateOfBirth": "1988-12-10",
            "department": "Tech",
            "position": "Medior"
        }])
    );
}

#[test]
fn sqlite_storage_survives_reconnect() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("staffdir.db");

    let added = {
        let conn = open_sqlite(&path).unwrap();
        let mut store = EmployeeStore::with_clock(SqliteStorage::try_new(&conn).unwrap(), clock());
        store.add(&bob()).unwrap()
    };

    let conn = open_sqlite(&path).unwrap();
    let storage = SqliteStorage::try_new(&conn).unwrap();
    let mut store = EmployeeStore::with_clock(&storage, clock());
    assert_eq!(store.get_by_id(&added.id), Some(&added));

    store.clear();
    assert_eq!(storage.read(STORAGE_KEY).unwrap().as_deref(), Some("[]"));
    let rows: i64 = conn
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn custom_storage_key_is_used_for_load_and_save() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    let config = StoreConfig::default().with_storage_key("staff_archive");

    let mut store = EmployeeStore::with_config(&storage, clock(), config.clone());
    store.add(&bob()).unwrap();

    assert_eq!(storage.read(STORAGE_KEY).unwrap(), None);
    assert!(storage.read("staff_archive").unwrap().is_some());

    let reopened = EmployeeStore::with_config(&storage, clock(), config);
    assert_eq!(reopened.len(), 1);
}

#[test]
fn unreadable_key_opens_empty_store() {
    let dir = tempfile::tempdir().unwrap();
    let storage = FileStorage::open(dir.path()).unwrap();
    let config = StoreConfig::default().with_storage_key("../escape");

    let mut store = EmployeeStore::with_config(&storage, clock(), config);
    assert!(store.is_empty());

    store.add(&bob()).unwrap();
    assert!(!store.persisted());
    assert_eq!(store.len(), 1);
}
