//! Employee domain model.
//!
//! # Responsibility
//! - Define the persisted employee record and its wire shape.
//! - Define the raw draft accepted by `add`/`update`.
//! - Provide phone normalization and age helpers shared by validation.
//!
//! # Invariants
//! - `id` is assigned by the store once and never changes.
//! - Persisted JSON uses camelCase field names and `YYYY-MM-DD` dates.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Stable identifier assigned by the store on `add`.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type EmployeeId = String;

/// Department an employee belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Department {
    Analytics,
    Tech,
}

/// Seniority level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    Junior,
    Medior,
    Senior,
}

/// Raised when a department/position label is not part of the fixed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLabel {
    pub kind: &'static str,
    pub value: String,
}

impl Display for UnknownLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown {} `{}`", self.kind, self.value)
    }
}

impl Error for UnknownLabel {}

impl Department {
    pub const ALL: [Department; 2] = [Department::Analytics, Department::Tech];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Analytics => "Analytics",
            Self::Tech => "Tech",
        }
    }
}

impl FromStr for Department {
    type Err = UnknownLabel;

    /// Exact, case-sensitive match on the label.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|department| department.as_str() == value)
            .ok_or_else(|| UnknownLabel {
                kind: "department",
                value: value.to_string(),
            })
    }
}

impl Display for Department {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Position {
    pub const ALL: [Position; 3] = [Position::Junior, Position::Medior, Position::Senior];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Junior => "Junior",
            Self::Medior => "Medior",
            Self::Senior => "Senior",
        }
    }
}

impl FromStr for Position {
    type Err = UnknownLabel;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|position| position.as_str() == value)
            .ok_or_else(|| UnknownLabel {
                kind: "position",
                value: value.to_string(),
            })
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical employee record held by the store and persisted as JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_employment: NaiveDate,
    pub date_of_birth: NaiveDate,
    pub department: Department,
    pub position: Position,
}

impl Employee {
    /// Phone with formatting characters removed.
    pub fn normalized_phone(&self) -> String {
        normalize_phone(&self.phone)
    }

    /// "First Last" display name.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Raw input for creating or fully replacing an employee.
///
/// Text fields are kept exactly as entered; trimming happens only after the
/// draft passes validation. Department and position stay raw strings so
/// unknown labels surface as validation errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EmployeeDraft {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub date_of_employment: Option<NaiveDate>,
    pub date_of_birth: Option<NaiveDate>,
    pub department: String,
    pub position: String,
}

impl From<&Employee> for EmployeeDraft {
    fn from(employee: &Employee) -> Self {
        Self {
            first_name: employee.first_name.clone(),
            last_name: employee.last_name.clone(),
            email: employee.email.clone(),
            phone: employee.phone.clone(),
            date_of_employment: Some(employee.date_of_employment),
            date_of_birth: Some(employee.date_of_birth),
            department: employee.department.as_str().to_string(),
            position: employee.position.as_str().to_string(),
        }
    }
}

/// Strips spaces, hyphens and parentheses; used only for uniqueness checks.
pub fn normalize_phone(phone: &str) -> String {
    phone
        .chars()
        .filter(|ch| !ch.is_whitespace() && !matches!(ch, '-' | '(' | ')'))
        .collect()
}

/// Whole years between `birth` and `on`, counting a birthday only once its
/// month/day has been reached.
pub fn age_on(birth: NaiveDate, on: NaiveDate) -> i32 {
    let years = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        years - 1
    } else {
        years
    }
}

#[cfg(test)]
mod tests {
    use super::{age_on, normalize_phone, Department, Position};
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn normalize_phone_strips_formatting() {
        assert_eq!(normalize_phone("+1 (555) 123-4567"), "+15551234567");
    }

    #[test]
    fn age_counts_birthday_by_month_and_day() {
        assert_eq!(age_on(date(2000, 6, 15), date(2015, 6, 14)), 14);
        assert_eq!(age_on(date(2000, 6, 15), date(2015, 6, 15)), 15);
        assert_eq!(age_on(date(2000, 12, 31), date(2016, 1, 1)), 15);
    }

    #[test]
    fn labels_parse_case_sensitively() {
        assert_eq!("Tech".parse::<Department>().unwrap(), Department::Tech);
        assert!("tech".parse::<Department>().is_err());
        assert_eq!("Medior".parse::<Position>().unwrap(), Position::Medior);
        assert_eq!(
            "Lead".parse::<Position>().unwrap_err().to_string(),
            "unknown position `Lead`"
        );
    }
}
