//! Employee draft validation.
//!
//! # Responsibility
//! - Check one draft against field rules and against the existing records.
//! - Report every failing field at once as a field → message mapping.
//!
//! # Invariants
//! - Rules never short-circuit; independent failures accumulate.
//! - A later rule on the same field replaces the earlier message.
//! - Uniqueness checks skip the record being updated (`exclude_id`).

use crate::model::employee::{
    age_on, normalize_phone, Department, Employee, EmployeeDraft, Position,
};
use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Minimum age, in whole years, both today and at the employment date.
pub const MIN_EMPLOYEE_AGE: i32 = 15;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9\s\-()]{10,15}$").expect("valid phone regex"));

/// Key of one entry in a validation error mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ValidationField {
    FirstName,
    LastName,
    Email,
    Phone,
    DateOfEmployment,
    DateOfBirth,
    Department,
    Position,
    /// Same name and birth date as another record.
    Duplicate,
}

impl ValidationField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FirstName => "firstName",
            Self::LastName => "lastName",
            Self::Email => "email",
            Self::Phone => "phone",
            Self::DateOfEmployment => "dateOfEmployment",
            Self::DateOfBirth => "dateOfBirth",
            Self::Department => "department",
            Self::Position => "position",
            Self::Duplicate => "duplicate",
        }
    }
}

impl Display for ValidationField {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Field → human-readable message mapping for a rejected draft.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    fields: BTreeMap<ValidationField, String>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the message for `field`, replacing any earlier one.
    pub fn insert(&mut self, field: ValidationField, message: impl Into<String>) {
        self.fields.insert(field, message.into());
    }

    pub fn get(&self, field: ValidationField) -> Option<&str> {
        self.fields.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: ValidationField) -> bool {
        self.fields.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = ValidationField> + '_ {
        self.fields.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ValidationField, &str)> + '_ {
        self.fields
            .iter()
            .map(|(field, message)| (*field, message.as_str()))
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("validation failed")?;
        let mut separator = ": ";
        for (field, message) in self.iter() {
            write!(f, "{separator}{field}: {message}")?;
            separator = "; ";
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Draft fields after a successful validation: text trimmed, labels parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEmployee {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_employment: NaiveDate,
    pub date_of_birth: NaiveDate,
    pub department: Department,
    pub position: Position,
}

impl ValidatedEmployee {
    /// Combines validated fields with a store-assigned id.
    pub fn into_employee(self, id: impl Into<String>) -> Employee {
        Employee {
            id: id.into(),
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            phone: self.phone,
            date_of_employment: self.date_of_employment,
            date_of_birth: self.date_of_birth,
            department: self.department,
            position: self.position,
        }
    }
}

/// Validates `draft` against field rules and the `existing` collection.
///
/// `exclude_id` names the record being updated, which is ignored by the
/// uniqueness and duplicate-person checks. `today` is the reference date for
/// the future-date and age rules.
///
/// # Errors
/// Returns the full mapping of failing fields when any rule fails.
pub fn validate_employee(
    draft: &EmployeeDraft,
    existing: &[Employee],
    exclude_id: Option<&str>,
    today: NaiveDate,
) -> Result<ValidatedEmployee, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    check_presence(draft, &mut errors);

    if !draft.email.is_empty() && !EMAIL_RE.is_match(&draft.email) {
        errors.insert(ValidationField::Email, "Invalid email format");
    }
    if !draft.phone.is_empty() && !PHONE_RE.is_match(&draft.phone) {
        errors.insert(ValidationField::Phone, "Invalid phone format");
    }

    check_dates(draft, today, &mut errors);

    let department = parse_label::<Department>(&draft.department);
    if !draft.department.is_empty() && department.is_none() {
        errors.insert(
            ValidationField::Department,
            "Department must be Analytics or Tech",
        );
    }
    let position = parse_label::<Position>(&draft.position);
    if !draft.position.is_empty() && position.is_none() {
        errors.insert(
            ValidationField::Position,
            "Position must be Junior, Medior, or Senior",
        );
    }

    check_uniqueness(draft, existing, exclude_id, &mut errors);

    if !errors.is_empty() {
        return Err(errors);
    }

    match (
        draft.date_of_employment,
        draft.date_of_birth,
        department,
        position,
    ) {
        (Some(date_of_employment), Some(date_of_birth), Some(department), Some(position)) => {
            Ok(ValidatedEmployee {
                first_name: draft.first_name.trim().to_string(),
                last_name: draft.last_name.trim().to_string(),
                email: draft.email.trim().to_string(),
                phone: draft.phone.trim().to_string(),
                date_of_employment,
                date_of_birth,
                department,
                position,
            })
        }
        // Presence rules already reported every missing value.
        _ => Err(errors),
    }
}

fn check_presence(draft: &EmployeeDraft, errors: &mut ValidationErrors) {
    let text_fields = [
        (ValidationField::FirstName, &draft.first_name, "First name is required"),
        (ValidationField::LastName, &draft.last_name, "Last name is required"),
        (ValidationField::Email, &draft.email, "Email is required"),
        (ValidationField::Phone, &draft.phone, "Phone is required"),
    ];
    for (field, value, message) in text_fields {
        if value.trim().is_empty() {
            errors.insert(field, message);
        }
    }

    if draft.date_of_employment.is_none() {
        errors.insert(
            ValidationField::DateOfEmployment,
            "Date of employment is required",
        );
    }
    if draft.date_of_birth.is_none() {
        errors.insert(ValidationField::DateOfBirth, "Date of birth is required");
    }
    if draft.department.trim().is_empty() {
        errors.insert(ValidationField::Department, "Department is required");
    }
    if draft.position.trim().is_empty() {
        errors.insert(ValidationField::Position, "Position is required");
    }
}

fn check_dates(draft: &EmployeeDraft, today: NaiveDate, errors: &mut ValidationErrors) {
    if let Some(employed) = draft.date_of_employment {
        if employed > today {
            errors.insert(
                ValidationField::DateOfEmployment,
                "Employment date cannot be in the future",
            );
        }
    }

    if let Some(born) = draft.date_of_birth {
        if age_on(born, today) < MIN_EMPLOYEE_AGE {
            errors.insert(
                ValidationField::DateOfBirth,
                "Employee must be at least 15 years old",
            );
        }
    }

    if let (Some(born), Some(employed)) = (draft.date_of_birth, draft.date_of_employment) {
        if born >= employed {
            errors.insert(
                ValidationField::DateOfBirth,
                "Birth date must be before employment date",
            );
        } else if age_on(born, employed) < MIN_EMPLOYEE_AGE {
            errors.insert(
                ValidationField::DateOfEmployment,
                "Employee must be at least 15 years old at employment date",
            );
        }
    }
}

fn check_uniqueness(
    draft: &EmployeeDraft,
    existing: &[Employee],
    exclude_id: Option<&str>,
    errors: &mut ValidationErrors,
) {
    let others = || {
        existing
            .iter()
            .filter(move |employee| Some(employee.id.as_str()) != exclude_id)
    };

    if !draft.email.is_empty() {
        let email = draft.email.to_lowercase();
        if others().any(|employee| employee.email.to_lowercase() == email) {
            errors.insert(ValidationField::Email, "Email already exists");
        }
    }

    if !draft.phone.is_empty() {
        let phone = normalize_phone(&draft.phone);
        if others().any(|employee| employee.normalized_phone() == phone) {
            errors.insert(ValidationField::Phone, "Phone number already exists");
        }
    }

    // Stored names are trimmed, so compare against the trimmed draft.
    let first_name = draft.first_name.trim().to_lowercase();
    let last_name = draft.last_name.trim().to_lowercase();
    if let Some(born) = draft.date_of_birth {
        if !first_name.is_empty() && !last_name.is_empty() {
            let duplicate = others().any(|employee| {
                employee.first_name.to_lowercase() == first_name
                    && employee.last_name.to_lowercase() == last_name
                    && employee.date_of_birth == born
            });
            if duplicate {
                errors.insert(
                    ValidationField::Duplicate,
                    "An employee with the same name and birth date already exists",
                );
            }
        }
    }
}

fn parse_label<T: std::str::FromStr>(value: &str) -> Option<T> {
    value.parse().ok()
}
