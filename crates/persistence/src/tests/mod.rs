// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use orghist::{TransitionOutcome, TransitionRequest, build_transition_outcome};
use orghist_audit::Actor;
use orghist_domain::{
    AssignmentFacts, AssignmentInterval, Department, DepartmentKind, Employee, EmployeeNumber,
    Position, Rank,
};
use time::{Date, Month};

/// Creates a date for tests, panicking on invalid input.
pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

/// Creates the test actor used across persistence tests.
pub fn test_actor() -> Actor {
    Actor::new(String::from("hr-admin"), String::from("operator"))
}

/// A fully seeded in-memory test organization.
pub struct TestOrg {
    pub persistence: Persistence,
    pub hq_id: i64,
    pub eng_id: i64,
    pub sales_id: i64,
    pub terminated_id: i64,
    pub staff_id: i64,
    pub lead_id: i64,
    pub senior_rank_id: i64,
}

/// Seeds an in-memory database with a company root, two departments,
/// the terminated exception department, two positions, and one rank.
pub fn seed_org() -> TestOrg {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();

    let hq_id: i64 = persistence
        .create_department(&Department::new(
            "HQ",
            String::from("Acme Corporation"),
            DepartmentKind::Company,
            None,
        ))
        .unwrap();
    let eng_id: i64 = persistence
        .create_department(&Department::new(
            "ENG",
            String::from("Engineering"),
            DepartmentKind::Department,
            Some(hq_id),
        ))
        .unwrap();
    let sales_id: i64 = persistence
        .create_department(&Department::new(
            "SALES",
            String::from("Sales"),
            DepartmentKind::Department,
            Some(hq_id),
        ))
        .unwrap();
    let terminated_id: i64 = persistence
        .create_department(&Department::new_exception(
            Department::TERMINATED_CODE,
            String::from("Terminated"),
        ))
        .unwrap();

    let staff_id: i64 = persistence
        .create_position(&Position::new("STAFF", String::from("Staff")))
        .unwrap();
    let lead_id: i64 = persistence
        .create_position(&Position::new("LEAD", String::from("Team Lead")))
        .unwrap();
    let senior_rank_id: i64 = persistence
        .create_rank(&Rank::new("SR", String::from("Senior")))
        .unwrap();

    TestOrg {
        persistence,
        hq_id,
        eng_id,
        sales_id,
        terminated_id,
        staff_id,
        lead_id,
        senior_rank_id,
    }
}

impl TestOrg {
    /// Creates an employee hired on the given date.
    pub fn hire(&mut self, employee_number: &str, name: &str, hire_date: Date) -> Employee {
        let employee = Employee::new(
            EmployeeNumber::new(employee_number),
            name.to_string(),
            hire_date,
        );
        let employee_id: i64 = self.persistence.create_employee(&employee).unwrap();
        self.persistence.get_employee(employee_id).unwrap()
    }

    /// Plans and applies a transition for the employee, returning the
    /// new interval's ID.
    pub fn transition(
        &mut self,
        employee: &Employee,
        facts: AssignmentFacts,
        effective_date: Date,
        reason: &str,
    ) -> i64 {
        let current: Option<AssignmentInterval> = self
            .persistence
            .find_current_interval(employee.employee_id.unwrap())
            .unwrap();
        let request = TransitionRequest {
            facts,
            effective_date,
            reason: reason.to_string(),
            assigned_by: None,
        };
        let outcome: TransitionOutcome = build_transition_outcome(
            employee,
            current.as_ref(),
            &request,
            "RecordTransition",
            test_actor(),
        )
        .unwrap();
        self.persistence
            .apply_transition(&outcome)
            .unwrap()
            .interval_id
    }
}
