//! Employee domain model.
//!
//! # Responsibility
//! - Define canonical data structures used by the store.
//! - Keep draft input separate from validated, persisted records.
//!
//! # Invariants
//! - Every persisted record is identified by a stable `EmployeeId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod employee;
