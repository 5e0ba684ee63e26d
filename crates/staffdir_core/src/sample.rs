//! Demo employees used to populate an empty directory.

use crate::model::employee::EmployeeDraft;
use chrono::NaiveDate;

// (first, last, email, phone, employed, born, department, position)
#[rustfmt::skip]
const SAMPLE_ROWS: [(&str, &str, &str, &str, &str, &str, &str, &str); 12] = [
    ("Jane", "Smith", "jane.smith@company.com", "+15551234567", "2023-03-10", "1988-12-03", "Analytics", "Medior"),
    ("Bob", "Johnson", "bob.johnson@company.com", "+15552345678", "2023-02-20", "1985-08-15", "Tech", "Junior"),
    ("Alice", "Brown", "alice.brown@company.com", "+15553456789", "2023-04-05", "1992-03-10", "Analytics", "Senior"),
    ("Charlie", "Wilson", "charlie.wilson@company.com", "+15554567890", "2023-05-12", "1987-11-25", "Tech", "Medior"),
    ("Diana", "Davis", "diana.davis@company.com", "+15555678901", "2023-06-18", "1991-07-08", "Analytics", "Junior"),
    ("Eva", "Miller", "eva.miller@company.com", "+15556789012", "2023-07-22", "1989-04-12", "Tech", "Senior"),
    ("Frank", "Garcia", "frank.garcia@company.com", "+15557890123", "2023-08-14", "1986-09-30", "Analytics", "Medior"),
    ("Grace", "Martinez", "grace.martinez@company.com", "+15558901234", "2023-09-05", "1993-01-18", "Tech", "Junior"),
    ("Henry", "Anderson", "henry.anderson@company.com", "+15559012345", "2023-10-12", "1984-06-25", "Analytics", "Senior"),
    ("Ivy", "Taylor", "ivy.taylor@company.com", "+15550123456", "2023-11-08", "1990-12-03", "Tech", "Medior"),
    ("Jack", "White", "jack.white@company.com", "+15551237890", "2023-12-01", "1995-05-20", "Analytics", "Junior"),
    ("Kate", "Lee", "kate.lee@company.com", "+15552348901", "2024-01-15", "1986-02-14", "Tech", "Senior"),
];

/// Twelve demo drafts, all valid against an empty store dated 2024-01-15
/// or later.
pub fn sample_employees() -> Vec<EmployeeDraft> {
    SAMPLE_ROWS
        .iter()
        .map(
            |&(first_name, last_name, email, phone, employed, born, department, position)| {
                EmployeeDraft {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    email: email.to_string(),
                    phone: phone.to_string(),
                    date_of_employment: parse_date(employed),
                    date_of_birth: parse_date(born),
                    department: department.to_string(),
                    position: position.to_string(),
                }
            },
        )
        .collect()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}
