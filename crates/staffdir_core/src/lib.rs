//! Core domain logic for the staffdir employee directory.
//! This crate is the single source of truth for employee invariants.

pub mod clock;
pub mod config;
pub mod logging;
pub mod model;
pub mod sample;
pub mod storage;
pub mod store;
pub mod validation;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::StoreConfig;
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::employee::{
    age_on, normalize_phone, Department, Employee, EmployeeDraft, EmployeeId, Position,
    UnknownLabel,
};
pub use storage::{
    open_sqlite, open_sqlite_in_memory, FileStorage, KeyValueStorage, MemoryStorage,
    SqliteStorage, StorageError, StorageResult, KV_SCHEMA_VERSION, STORAGE_KEY,
};
pub use store::{
    visible_pages, EmployeeStore, ListenerId, Page, SortDirection, SortField, StoreError,
    StoreResult,
};
pub use validation::{
    validate_employee, ValidatedEmployee, ValidationErrors, ValidationField, MIN_EMPLOYEE_AGE,
};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
