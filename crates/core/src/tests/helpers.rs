// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::snapshot::AssignmentRecord;
use orghist_audit::Actor;
use orghist_domain::{
    AssignmentFacts, AssignmentInterval, Department, DepartmentKind, Employee, EmployeeNumber,
    EmployeeStatus,
};
use time::{Date, Month};

/// Creates a date for tests, panicking on invalid input.
pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

/// Creates a persisted test employee hired 2024-01-10.
pub fn test_employee() -> Employee {
    Employee::with_id(
        1,
        EmployeeNumber::new("E-1042"),
        String::from("Kim Minsoo"),
        date(2024, Month::January, 10),
        None,
        EmployeeStatus::Active,
    )
}

/// Creates the test actor used across core tests.
pub fn test_actor() -> Actor {
    Actor::new(String::from("hr-admin"), String::from("operator"))
}

/// Creates a persisted current interval for the test employee starting
/// at the hire date, in department 1 / position 1.
pub fn current_interval() -> AssignmentInterval {
    let mut interval = AssignmentInterval::open(
        1,
        AssignmentFacts::new(1, 1, None, false),
        date(2024, Month::January, 10),
        String::from("employee hired"),
        None,
    );
    interval.interval_id = Some(10);
    interval
}

/// Creates a persisted department row.
pub fn dept(
    id: i64,
    code: &str,
    kind: DepartmentKind,
    parent: Option<i64>,
) -> Department {
    Department::with_id(id, code, format!("{code} dept"), kind, parent, 0, false)
}

/// Creates an assignment record for snapshot/diff tests.
pub fn record(
    employee_id: i64,
    employee_number: &str,
    department_id: i64,
    position_id: i64,
) -> AssignmentRecord {
    AssignmentRecord {
        employee_id,
        employee_number: EmployeeNumber::new(employee_number),
        employee_name: format!("Employee {employee_number}"),
        department_id,
        department_code: format!("D{department_id}"),
        department_name: format!("Department {department_id}"),
        position_id,
        position_title: format!("Position {position_id}"),
        position_code: format!("P{position_id}"),
        rank_id: None,
        rank_name: None,
        rank_code: None,
        is_manager: false,
    }
}
