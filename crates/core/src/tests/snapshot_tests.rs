// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::snapshot::{OrganizationSnapshot, RootResolution, build_snapshot};
use crate::tests::helpers::{date, dept, record};
use orghist_domain::{Department, DepartmentKind, DomainError};
use time::Month;

#[test]
fn test_three_department_tree_with_designated_root() {
    // Root R with children A and B; two employees in A, one in B.
    let departments = vec![
        dept(1, "R", DepartmentKind::Company, None),
        dept(2, "A", DepartmentKind::Department, Some(1)),
        dept(3, "B", DepartmentKind::Department, Some(1)),
    ];
    let rows = vec![
        record(1, "E-001", 2, 1),
        record(2, "E-002", 2, 1),
        record(3, "E-003", 3, 1),
    ];

    let snapshot: OrganizationSnapshot = build_snapshot(
        date(2025, Month::November, 30),
        &rows,
        &departments,
        Some(&departments[0]),
    )
    .unwrap();

    assert_eq!(snapshot.total_departments, 3);
    assert_eq!(snapshot.total_employees, 3);
    assert_eq!(snapshot.organization.code, "R");
    assert_eq!(snapshot.organization.children.len(), 2);
    assert_eq!(snapshot.organization.children[0].code, "A");
    assert_eq!(snapshot.organization.children[1].code, "B");
    // R itself holds no employees; its children do.
    assert!(snapshot.organization.employees.is_empty());
    assert_eq!(snapshot.organization.children[0].employees.len(), 2);
    assert_eq!(snapshot.root_resolution, RootResolution::DesignatedRoot);
}

#[test]
fn test_single_populated_root_returned_as_is() {
    let departments = vec![
        dept(1, "R", DepartmentKind::Company, None),
        dept(2, "A", DepartmentKind::Department, Some(1)),
    ];
    let rows = vec![record(1, "E-001", 1, 1), record(2, "E-002", 2, 1)];

    let snapshot = build_snapshot(
        date(2025, Month::November, 30),
        &rows,
        &departments,
        Some(&departments[0]),
    )
    .unwrap();

    assert_eq!(snapshot.root_resolution, RootResolution::SingleRoot);
    assert_eq!(snapshot.organization.code, "R");
    assert_eq!(snapshot.organization.employees.len(), 1);
    assert_eq!(snapshot.organization.children.len(), 1);
    assert_eq!(snapshot.total_departments, 2);
    assert_eq!(snapshot.total_employees, 2);
}

#[test]
fn test_populated_company_root_absorbs_other_roots() {
    // Two parentless populated departments; one is the company.
    let departments = vec![
        dept(1, "HQ", DepartmentKind::Company, None),
        dept(2, "ORPHAN", DepartmentKind::Department, None),
    ];
    let rows = vec![record(1, "E-001", 1, 1), record(2, "E-002", 2, 1)];

    let snapshot = build_snapshot(date(2025, Month::November, 30), &rows, &departments, None)
        .unwrap();

    assert_eq!(snapshot.root_resolution, RootResolution::CompanyRoot);
    assert_eq!(snapshot.organization.code, "HQ");
    assert_eq!(snapshot.organization.children.len(), 1);
    assert_eq!(snapshot.organization.children[0].code, "ORPHAN");
}

#[test]
fn test_synthetic_root_is_last_resort() {
    let departments = vec![
        dept(2, "A", DepartmentKind::Department, None),
        dept(3, "B", DepartmentKind::Department, None),
    ];
    let rows = vec![record(1, "E-001", 2, 1), record(2, "E-002", 3, 1)];

    let snapshot = build_snapshot(date(2025, Month::November, 30), &rows, &departments, None)
        .unwrap();

    assert_eq!(snapshot.root_resolution, RootResolution::SyntheticRoot);
    assert_eq!(snapshot.organization.code, "ROOT");
    assert_eq!(snapshot.organization.department_id, 0);
    assert_eq!(snapshot.organization.children.len(), 2);
    // Synthetic root still counts itself in the totals.
    assert_eq!(snapshot.total_departments, 3);
    assert_eq!(snapshot.total_employees, 2);
}

#[test]
fn test_levels_follow_parent_chain_depth() {
    let departments = vec![
        dept(1, "R", DepartmentKind::Company, None),
        dept(2, "A", DepartmentKind::Department, Some(1)),
        dept(3, "T", DepartmentKind::Team, Some(2)),
    ];
    let rows = vec![
        record(1, "E-001", 1, 1),
        record(2, "E-002", 2, 1),
        record(3, "E-003", 3, 1),
    ];

    let snapshot = build_snapshot(
        date(2025, Month::November, 30),
        &rows,
        &departments,
        Some(&departments[0]),
    )
    .unwrap();

    assert_eq!(snapshot.organization.level, 0);
    let child = &snapshot.organization.children[0];
    assert_eq!(child.level, 1);
    assert_eq!(child.children[0].level, 2);
}

#[test]
fn test_department_cycle_is_fatal() {
    let departments = vec![
        dept(1, "A", DepartmentKind::Department, Some(2)),
        dept(2, "B", DepartmentKind::Department, Some(1)),
    ];
    let rows = vec![record(1, "E-001", 1, 1)];

    let result = build_snapshot(date(2025, Month::November, 30), &rows, &departments, None);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::DepartmentCycle { .. }))
    ));
}

#[test]
fn test_exception_departments_are_excluded_from_tree() {
    let mut terminated: Department = dept(9, "TERMINATED", DepartmentKind::Department, None);
    terminated.is_exception = true;
    let departments = vec![dept(1, "R", DepartmentKind::Company, None), terminated];
    let rows = vec![record(1, "E-001", 1, 1), record(2, "E-002", 9, 1)];

    let snapshot = build_snapshot(
        date(2025, Month::November, 30),
        &rows,
        &departments,
        Some(&departments[0]),
    )
    .unwrap();

    assert_eq!(snapshot.total_departments, 1);
    assert_eq!(snapshot.total_employees, 1);
}

#[test]
fn test_employees_sorted_by_employee_number() {
    let departments = vec![dept(1, "R", DepartmentKind::Company, None)];
    let rows = vec![
        record(3, "E-300", 1, 1),
        record(1, "E-100", 1, 1),
        record(2, "E-200", 1, 1),
    ];

    let snapshot = build_snapshot(
        date(2025, Month::November, 30),
        &rows,
        &departments,
        Some(&departments[0]),
    )
    .unwrap();

    let numbers: Vec<&str> = snapshot
        .organization
        .employees
        .iter()
        .map(|slot| slot.employee_number.value())
        .collect();
    assert_eq!(numbers, vec!["E-100", "E-200", "E-300"]);
}

#[test]
fn test_children_sorted_by_level_then_code() {
    let departments = vec![
        dept(1, "R", DepartmentKind::Company, None),
        dept(2, "ZED", DepartmentKind::Department, Some(1)),
        dept(3, "ALPHA", DepartmentKind::Department, Some(1)),
    ];
    let rows = vec![
        record(1, "E-001", 2, 1),
        record(2, "E-002", 3, 1),
        record(3, "E-003", 1, 1),
    ];

    let snapshot = build_snapshot(
        date(2025, Month::November, 30),
        &rows,
        &departments,
        Some(&departments[0]),
    )
    .unwrap();

    let codes: Vec<&str> = snapshot
        .organization
        .children
        .iter()
        .map(|node| node.code.as_str())
        .collect();
    assert_eq!(codes, vec!["ALPHA", "ZED"]);
}

#[test]
fn test_unpopulated_designated_root_keeps_totals_correct() {
    // The designated root has no direct assignments but still heads the
    // returned tree and counts toward totals.
    let departments = vec![
        dept(1, "R", DepartmentKind::Company, None),
        dept(2, "A", DepartmentKind::Department, Some(1)),
        dept(3, "B", DepartmentKind::Department, Some(1)),
    ];
    let rows = vec![record(1, "E-001", 2, 1), record(2, "E-002", 3, 1)];

    let snapshot = build_snapshot(
        date(2025, Month::December, 1),
        &rows,
        &departments,
        Some(&departments[0]),
    )
    .unwrap();

    assert_eq!(snapshot.root_resolution, RootResolution::DesignatedRoot);
    assert_eq!(snapshot.total_departments, 3);
    assert_eq!(snapshot.total_employees, 2);
}
