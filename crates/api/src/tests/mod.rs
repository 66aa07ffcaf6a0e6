// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod migration_tests;
mod snapshot_tests;

use crate::{AuthenticatedActor, RecordTransitionRequest, Role, TargetAssignment};
use orghist_domain::{Department, DepartmentKind, Employee, EmployeeNumber, Position, Rank};
use orghist_persistence::Persistence;
use time::{Date, Month};

/// Creates a date for tests, panicking on invalid input.
pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

/// The admin actor used across API tests.
pub fn admin() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("hr-admin"), Role::Admin)
}

/// The non-admin operator actor used across API tests.
pub fn operator() -> AuthenticatedActor {
    AuthenticatedActor::new(String::from("hr-operator"), Role::Operator)
}

/// A seeded in-memory context for API tests.
///
/// Departments: HQ (company root), ENG and SALES under HQ, and the
/// terminated exception department. Positions: STAFF and LEAD. One
/// rank: SR.
pub struct TestContext {
    pub persistence: Persistence,
}

pub fn seed() -> TestContext {
    let mut persistence = Persistence::new_in_memory().unwrap();

    let hq_id = persistence
        .create_department(&Department::new(
            "HQ",
            String::from("Acme Corporation"),
            DepartmentKind::Company,
            None,
        ))
        .unwrap();
    persistence
        .create_department(&Department::new(
            "ENG",
            String::from("Engineering"),
            DepartmentKind::Department,
            Some(hq_id),
        ))
        .unwrap();
    persistence
        .create_department(&Department::new(
            "SALES",
            String::from("Sales"),
            DepartmentKind::Department,
            Some(hq_id),
        ))
        .unwrap();
    persistence
        .create_department(&Department::new_exception(
            Department::TERMINATED_CODE,
            String::from("Terminated"),
        ))
        .unwrap();

    persistence
        .create_position(&Position::new("STAFF", String::from("Staff")))
        .unwrap();
    persistence
        .create_position(&Position::new("LEAD", String::from("Team Lead")))
        .unwrap();
    persistence
        .create_rank(&Rank::new("SR", String::from("Senior")))
        .unwrap();

    TestContext { persistence }
}

impl TestContext {
    /// Creates an employee hired on the given date.
    pub fn hire(&mut self, employee_number: &str, name: &str, hire_date: Date) -> Employee {
        let employee = Employee::new(
            EmployeeNumber::new(employee_number),
            name.to_string(),
            hire_date,
        );
        let employee_id = self.persistence.create_employee(&employee).unwrap();
        self.persistence.get_employee(employee_id).unwrap()
    }

    /// Records a transition through the API for the given employee.
    pub fn assign(
        &mut self,
        employee_number: &str,
        department_code: &str,
        position_code: &str,
        effective_date: Date,
    ) {
        crate::record_transition(
            &mut self.persistence,
            &RecordTransitionRequest {
                employee_number: employee_number.to_string(),
                department_code: department_code.to_string(),
                position_code: position_code.to_string(),
                rank_code: None,
                is_manager: false,
                effective_date,
                reason: String::from("test assignment"),
            },
            &operator(),
        )
        .unwrap();
    }
}

/// Builds a target assignment record for migration tests.
pub fn target(
    employee_number: &str,
    department_code: &str,
    position_code: &str,
    is_manager: bool,
) -> TargetAssignment {
    TargetAssignment {
        employee_number: employee_number.to_string(),
        department_code: department_code.to_string(),
        position_code: position_code.to_string(),
        rank_code: None,
        is_manager,
    }
}
