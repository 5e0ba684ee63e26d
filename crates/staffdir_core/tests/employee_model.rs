use chrono::NaiveDate;
use staffdir_core::{normalize_phone, Department, Employee, EmployeeDraft, Position};

#[test]
fn employee_reads_browser_snapshot_shape() {
    let value = serde_json::json!({
        "id": "lq2x9k3abc123def",
        "firstName": "Jane",
        "lastName": "Smith",
        "email": "jane.smith@company.com",
        "phone": "+15551234567",
        "dateOfEmployment": "2023-03-10",
        "dateOfBirth": "1988-12-03",
        "department": "Analytics",
        "position": "Medior"
    });

    let employee: Employee = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(employee.id, "lq2x9k3abc123def");
    assert_eq!(employee.department, Department::Analytics);
    assert_eq!(employee.position, Position::Medior);
    assert_eq!(
        employee.date_of_employment,
        NaiveDate::from_ymd_opt(2023, 3, 10).unwrap()
    );
    assert_eq!(employee.full_name(), "Jane Smith");
    assert_eq!(serde_json::to_value(&employee).unwrap(), value);
}

#[test]
fn employee_rejects_unknown_department() {
    let value = serde_json::json!({
        "id": "x",
        "firstName": "Jane",
        "lastName": "Smith",
        "email": "jane@test.com",
        "phone": "+15551234567",
        "dateOfEmployment": "2023-03-10",
        "dateOfBirth": "1988-12-03",
        "department": "Sales",
        "position": "Medior"
    });

    assert!(serde_json::from_value::<Employee>(value).is_err());
}

#[test]
fn draft_fills_missing_fields_with_empty_values() {
    let draft: EmployeeDraft = serde_json::from_value(serde_json::json!({
        "firstName": "Test",
        "dateOfBirth": "1990-01-01"
    }))
    .unwrap();

    assert_eq!(draft.first_name, "Test");
    assert_eq!(draft.department, "");
    assert_eq!(draft.position, "");
    assert_eq!(draft.date_of_employment, None);
    assert_eq!(draft.date_of_birth, NaiveDate::from_ymd_opt(1990, 1, 1));
}

#[test]
fn draft_from_employee_round_trips_labels() {
    let employee = Employee {
        id: "id-1".to_string(),
        first_name: "Bob".to_string(),
        last_name: "Johnson".to_string(),
        email: "bob@test.com".to_string(),
        phone: "+1 (555) 987-6543".to_string(),
        date_of_employment: NaiveDate::from_ymd_opt(2019, 7, 15).unwrap(),
        date_of_birth: NaiveDate::from_ymd_opt(1988, 12, 10).unwrap(),
        department: Department::Tech,
        position: Position::Senior,
    };

    let draft = EmployeeDraft::from(&employee);
    assert_eq!(draft.department, "Tech");
    assert_eq!(draft.position, "Senior");
    assert_eq!(employee.normalized_phone(), normalize_phone(&draft.phone));
    assert_eq!(employee.normalized_phone(), "+15559876543");
}
