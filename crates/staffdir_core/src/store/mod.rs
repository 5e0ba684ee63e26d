//! Employee store: the authoritative in-memory collection.
//!
//! # Responsibility
//! - Own the ordered employee collection and its change listeners.
//! - Validate every mutation before it touches the collection.
//! - Persist a full JSON snapshot after every successful mutation.
//!
//! # Invariants
//! - Insertion order is preserved; `sort` only reorders returned copies.
//! - Ids are unique within the collection and never reassigned.
//! - Persistence failures are logged, not returned; the in-memory mutation
//!   stays committed and listeners still run.
//! - Loading never fails: missing or corrupt snapshots yield an empty store.

use crate::clock::{Clock, SystemClock};
use crate::config::StoreConfig;
use crate::model::employee::{Employee, EmployeeDraft, EmployeeId};
use crate::sample::sample_employees;
use crate::storage::KeyValueStorage;
use crate::validation::{validate_employee, ValidationErrors};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

mod listeners;
pub mod query;

pub use listeners::ListenerId;
pub use query::{visible_pages, Page, SortDirection, SortField};

use listeners::ListenerRegistry;

const RANDOM_ID_SUFFIX_LEN: usize = 11;

pub type StoreResult<T> = Result<T, StoreError>;

/// Error returned by store mutations.
#[derive(Debug)]
pub enum StoreError {
    /// Draft failed one or more field rules.
    Validation(ValidationErrors),
    /// No record with the given id.
    NotFound(EmployeeId),
}

impl StoreError {
    /// Field mapping when this is a validation failure.
    pub fn validation_errors(&self) -> Option<&ValidationErrors> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::NotFound(_) => None,
        }
    }
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(errors) => write!(f, "{errors}"),
            Self::NotFound(id) => write!(f, "employee not found: {id}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(errors) => Some(errors),
            Self::NotFound(_) => None,
        }
    }
}

impl From<ValidationErrors> for StoreError {
    fn from(value: ValidationErrors) -> Self {
        Self::Validation(value)
    }
}

/// Employee collection bound to one storage backend and clock.
///
/// Constructed once by the application root and passed to consumers.
pub struct EmployeeStore<S: KeyValueStorage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    config: StoreConfig,
    employees: Vec<Employee>,
    listeners: ListenerRegistry,
    persisted: bool,
}

impl<S: KeyValueStorage> EmployeeStore<S, SystemClock> {
    /// Loads the collection from `storage` using the wall clock and default
    /// configuration.
    pub fn open(storage: S) -> Self {
        Self::with_config(storage, SystemClock, StoreConfig::default())
    }
}

impl<S: KeyValueStorage, C: Clock> EmployeeStore<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self::with_config(storage, clock, StoreConfig::default())
    }

    pub fn with_config(storage: S, clock: C, config: StoreConfig) -> Self {
        let employees = load_snapshot(&storage, &config.storage_key);
        info!(
            "event=store_open module=store status=ok key={} count={}",
            config.storage_key,
            employees.len()
        );
        Self {
            storage,
            clock,
            config,
            employees,
            listeners: ListenerRegistry::default(),
            persisted: true,
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Whether the most recent snapshot write reached storage.
    pub fn persisted(&self) -> bool {
        self.persisted
    }

    pub fn len(&self) -> usize {
        self.employees.len()
    }

    pub fn is_empty(&self) -> bool {
        self.employees.is_empty()
    }

    /// Copy of the full collection in insertion order.
    pub fn get_all(&self) -> Vec<Employee> {
        self.employees.clone()
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Employee> {
        self.employees.iter().find(|employee| employee.id == id)
    }

    /// Validates `draft`, assigns a fresh id and appends the record.
    ///
    /// # Errors
    /// - `StoreError::Validation` when any rule fails; nothing is changed.
    pub fn add(&mut self, draft: &EmployeeDraft) -> StoreResult<Employee> {
        let today = self.clock.today();
        let validated = validate_employee(draft, &self.employees, None, today)
            .inspect_err(|errors| log_rejected("employee_add", errors))?;

        let employee = validated.into_employee(self.generate_id());
        self.employees.push(employee.clone());
        info!(
            "event=employee_add module=store status=ok id={} count={}",
            employee.id,
            self.employees.len()
        );

        self.commit();
        Ok(employee)
    }

    /// Replaces every field of the record `id` with `draft`, keeping the id
    /// and the record's position.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when `id` is unknown.
    /// - `StoreError::Validation` when any rule fails; nothing is changed.
    pub fn update(&mut self, id: &str, draft: &EmployeeDraft) -> StoreResult<Employee> {
        let index = self.index_of(id)?;
        let today = self.clock.today();
        let validated = validate_employee(draft, &self.employees, Some(id), today)
            .inspect_err(|errors| log_rejected("employee_update", errors))?;

        let employee = validated.into_employee(id);
        self.employees[index] = employee.clone();
        info!("event=employee_update module=store status=ok id={id}");

        self.commit();
        Ok(employee)
    }

    /// Removes and returns the record `id`.
    ///
    /// # Errors
    /// - `StoreError::NotFound` when `id` is unknown.
    pub fn delete(&mut self, id: &str) -> StoreResult<Employee> {
        let index = self.index_of(id)?;
        let removed = self.employees.remove(index);
        info!(
            "event=employee_delete module=store status=ok id={id} count={}",
            self.employees.len()
        );

        self.commit();
        Ok(removed)
    }

    /// Empties the collection and persists the empty snapshot.
    pub fn clear(&mut self) {
        let removed = self.employees.len();
        self.employees.clear();
        info!("event=store_clear module=store status=ok removed={removed}");
        self.commit();
    }

    pub fn search(&self, query: &str) -> Vec<Employee> {
        query::search(&self.employees, query)
    }

    /// Searches, then slices out the 1-based `page`. No clamping.
    pub fn get_paginated(&self, page: usize, page_size: usize, query: &str) -> Page<Employee> {
        query::paginate(self.search(query), page, page_size)
    }

    /// Like `get_paginated`, but page 0 is read as page 1 and a page past
    /// the end of a non-empty result falls back to the last page.
    pub fn get_paginated_clamped(
        &self,
        page: usize,
        page_size: usize,
        query: &str,
    ) -> Page<Employee> {
        let page = page.max(1);
        let result = self.get_paginated(page, page_size, query);
        if result.items.is_empty() && result.total_pages > 0 && page > result.total_pages {
            return self.get_paginated(result.total_pages.max(1), page_size, query);
        }
        result
    }

    /// Sorted copy of the collection; backing order is untouched.
    pub fn sort(&self, field: SortField, direction: SortDirection) -> Vec<Employee> {
        query::sort(&self.employees, field, direction)
    }

    /// Registers a callback run after every successful mutation.
    pub fn subscribe(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        self.listeners.register(Box::new(listener))
    }

    /// Returns `false` when `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Adds the demo employees when the collection is empty.
    ///
    /// Returns how many were added; drafts rejected by validation are
    /// logged and skipped.
    pub fn seed_sample_data_if_empty(&mut self) -> usize {
        if !self.employees.is_empty() {
            return 0;
        }

        let mut added = 0;
        for draft in sample_employees() {
            match self.add(&draft) {
                Ok(_) => added += 1,
                Err(err) => warn!(
                    "event=store_seed module=store status=skipped error={}",
                    err
                ),
            }
        }
        info!("event=store_seed module=store status=ok added={added}");
        added
    }

    fn index_of(&self, id: &str) -> StoreResult<usize> {
        self.employees
            .iter()
            .position(|employee| employee.id == id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn generate_id(&self) -> EmployeeId {
        loop {
            let suffix = Uuid::new_v4().simple().to_string();
            let id = format!(
                "{}{}",
                to_base36(self.clock.now_millis()),
                &suffix[..RANDOM_ID_SUFFIX_LEN]
            );
            if self.get_by_id(&id).is_none() {
                return id;
            }
        }
    }

    fn commit(&mut self) {
        self.persist();
        let failed = self.listeners.notify();
        if failed > 0 {
            warn!("event=listener_notify module=store status=degraded failed={failed}");
        }
    }

    fn persist(&mut self) {
        let key = self.config.storage_key.as_str();
        let written = serde_json::to_string(&self.employees)
            .map_err(|err| err.to_string())
            .and_then(|json| {
                self.storage
                    .write(key, &json)
                    .map_err(|err| err.to_string())
            });

        self.persisted = match written {
            Ok(()) => true,
            Err(err) => {
                error!(
                    "event=store_persist module=store status=error key={} count={} error={}",
                    key,
                    self.employees.len(),
                    err
                );
                false
            }
        };
    }
}

fn load_snapshot<S: KeyValueStorage>(storage: &S, key: &str) -> Vec<Employee> {
    let raw = match storage.read(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(err) => {
            error!(
                "event=store_load module=store status=error key={key} error_code=read_failed error={err}"
            );
            return Vec::new();
        }
    };

    if raw.trim().is_empty() {
        return Vec::new();
    }

    match serde_json::from_str::<Vec<Employee>>(&raw) {
        Ok(employees) => employees,
        Err(err) => {
            error!(
                "event=store_load module=store status=error key={key} error_code=parse_failed error={err}"
            );
            Vec::new()
        }
    }
}

fn log_rejected(event: &str, errors: &ValidationErrors) {
    let fields = errors
        .fields()
        .map(|field| field.as_str())
        .collect::<Vec<_>>()
        .join(",");
    info!("event={event} module=store status=rejected fields={fields}");
}

fn to_base36(value: i64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    let mut remaining = value.max(0).unsigned_abs();
    if remaining == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::new();
    while remaining > 0 {
        digits.push(DIGITS[(remaining % 36) as usize] as char);
        remaining /= 36;
    }
    digits.iter().rev().collect()
}
