// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{date, operator, seed};
use crate::{TerminateEmployeeRequest, get_organization_snapshot, terminate_employee};
use time::Month;

#[test]
fn test_snapshot_builds_three_department_tree() {
    // Root HQ with children ENG and SALES; two employees in ENG, one
    // in SALES.
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));
    ctx.hire("E-1002", "Lee Jiwoo", date(2024, Month::February, 1));
    ctx.hire("E-1003", "Park Dana", date(2024, Month::March, 1));
    ctx.assign("E-1001", "ENG", "STAFF", date(2024, Month::January, 10));
    ctx.assign("E-1002", "ENG", "STAFF", date(2024, Month::February, 1));
    ctx.assign("E-1003", "SALES", "STAFF", date(2024, Month::March, 1));

    let snapshot =
        get_organization_snapshot(&mut ctx.persistence, date(2025, Month::November, 30)).unwrap();

    assert_eq!(snapshot.total_departments, 3);
    assert_eq!(snapshot.total_employees, 3);
    assert_eq!(snapshot.organization.code, "HQ");
    assert_eq!(snapshot.organization.children.len(), 2);
    assert_eq!(snapshot.organization.children[0].code, "ENG");
    assert_eq!(snapshot.organization.children[0].employees.len(), 2);
    assert_eq!(snapshot.organization.children[1].code, "SALES");
    assert_eq!(snapshot.organization.children[1].employees.len(), 1);
}

#[test]
fn test_snapshot_respects_reference_date() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));
    ctx.assign("E-1001", "ENG", "STAFF", date(2024, Month::January, 10));
    ctx.assign("E-1001", "SALES", "STAFF", date(2025, Month::December, 1));

    // Only one department is populated at each date, so the populated
    // department itself becomes the tree root.
    let november =
        get_organization_snapshot(&mut ctx.persistence, date(2025, Month::November, 30)).unwrap();
    assert_eq!(november.organization.code, "ENG");
    assert_eq!(november.organization.employees.len(), 1);
    assert_eq!(november.root_resolution, "single_root");

    let december =
        get_organization_snapshot(&mut ctx.persistence, date(2025, Month::December, 1)).unwrap();
    assert_eq!(december.organization.code, "SALES");
    assert_eq!(december.organization.employees.len(), 1);
}

#[test]
fn test_terminated_employees_leave_the_snapshot() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));
    ctx.hire("E-1002", "Lee Jiwoo", date(2024, Month::February, 1));
    ctx.assign("E-1001", "ENG", "STAFF", date(2024, Month::January, 10));
    ctx.assign("E-1002", "ENG", "STAFF", date(2024, Month::February, 1));

    terminate_employee(
        &mut ctx.persistence,
        &TerminateEmployeeRequest {
            employee_number: String::from("E-1002"),
            termination_date: date(2025, Month::June, 30),
            reason: None,
        },
        &operator(),
    )
    .unwrap();

    let snapshot =
        get_organization_snapshot(&mut ctx.persistence, date(2025, Month::November, 30)).unwrap();
    assert_eq!(snapshot.total_employees, 1);

    // Before the termination date the employee is still visible.
    let earlier =
        get_organization_snapshot(&mut ctx.persistence, date(2025, Month::June, 1)).unwrap();
    assert_eq!(earlier.total_employees, 2);
}

#[test]
fn test_snapshot_falls_back_to_synthetic_root() {
    let mut ctx = crate::tests::TestContext {
        persistence: orghist_persistence::Persistence::new_in_memory().unwrap(),
    };
    // Two parentless plain departments, no company anywhere.
    ctx.persistence
        .create_department(&orghist_domain::Department::new(
            "A",
            String::from("Alpha"),
            orghist_domain::DepartmentKind::Department,
            None,
        ))
        .unwrap();
    ctx.persistence
        .create_department(&orghist_domain::Department::new(
            "B",
            String::from("Beta"),
            orghist_domain::DepartmentKind::Department,
            None,
        ))
        .unwrap();
    ctx.persistence
        .create_position(&orghist_domain::Position::new("STAFF", String::from("Staff")))
        .unwrap();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));
    ctx.hire("E-1002", "Lee Jiwoo", date(2024, Month::February, 1));
    ctx.assign("E-1001", "A", "STAFF", date(2024, Month::January, 10));
    ctx.assign("E-1002", "B", "STAFF", date(2024, Month::February, 1));

    let snapshot =
        get_organization_snapshot(&mut ctx.persistence, date(2025, Month::November, 30)).unwrap();
    assert_eq!(snapshot.root_resolution, "synthetic_root");
    assert_eq!(snapshot.organization.code, "ROOT");
    assert_eq!(snapshot.organization.children.len(), 2);
}
