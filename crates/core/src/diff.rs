// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Structural diff between two point-in-time snapshots.
//!
//! Compares the flat employee assignment maps of two reference dates
//! and classifies each employee's movement. Employees present in only
//! one snapshot are reported separately, never dropped.

use crate::snapshot::AssignmentRecord;
use orghist_domain::{ChangeType, classify_change};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One side of an employee's assignment as seen in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeAssignmentView {
    /// The assigned department.
    pub department_id: i64,
    /// The assigned department's code.
    pub department_code: String,
    /// The assigned department's name.
    pub department_name: String,
    /// The assigned position.
    pub position_id: i64,
    /// The assigned position's title.
    pub position_title: String,
    /// The assigned position's code.
    pub position_code: String,
    /// The assigned rank's name, if any.
    pub rank_name: Option<String>,
    /// Whether the employee manages the department.
    pub is_manager: bool,
}

impl From<&AssignmentRecord> for EmployeeAssignmentView {
    fn from(record: &AssignmentRecord) -> Self {
        Self {
            department_id: record.department_id,
            department_code: record.department_code.clone(),
            department_name: record.department_name.clone(),
            position_id: record.position_id,
            position_title: record.position_title.clone(),
            position_code: record.position_code.clone(),
            rank_name: record.rank_name.clone(),
            is_manager: record.is_manager,
        }
    }
}

/// A classified change for one employee present in both snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    /// The employee's canonical identifier.
    pub employee_id: i64,
    /// The employee number.
    pub employee_number: String,
    /// The employee's name.
    pub employee_name: String,
    /// The classification of this change.
    pub change_type: ChangeType,
    /// The assignment in the earlier snapshot.
    pub before: EmployeeAssignmentView,
    /// The assignment in the later snapshot.
    pub after: EmployeeAssignmentView,
}

/// An employee present in only one of the two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeePresence {
    /// The employee's canonical identifier.
    pub employee_id: i64,
    /// The employee number.
    pub employee_number: String,
    /// The employee's name.
    pub employee_name: String,
    /// The assignment in the snapshot the employee appears in.
    pub assignment: EmployeeAssignmentView,
}

/// The full diff between two snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChangeReport {
    /// Total classified changes.
    pub total_changes: usize,
    /// Changes involving a department move (includes `BOTH_CHANGE`).
    pub department_changes: usize,
    /// Changes involving a position move (includes `BOTH_CHANGE`).
    pub position_changes: usize,
    /// Changes where both department and position moved.
    pub both_changes: usize,
    /// Manager-flag-only changes.
    pub manager_changes: usize,
    /// The classified per-employee changes, ordered by employee number.
    pub changes: Vec<ChangeRecord>,
    /// Employees present only in the later snapshot (e.g., hired
    /// between the dates), ordered by employee number.
    pub joined: Vec<EmployeePresence>,
    /// Employees present only in the earlier snapshot, ordered by
    /// employee number.
    pub departed: Vec<EmployeePresence>,
}

/// Diffs two snapshots' flat assignment rows.
///
/// # Arguments
///
/// * `earlier` - Rows valid at the earlier reference date
/// * `later` - Rows valid at the later reference date
///
/// # Returns
///
/// A `ChangeReport` with classified changes for employees present in
/// both snapshots and separate `joined`/`departed` lists for employees
/// present in only one. All lists are ordered by employee number
/// ascending.
#[must_use]
pub fn diff_snapshots(earlier: &[AssignmentRecord], later: &[AssignmentRecord]) -> ChangeReport {
    // Key by employee number: it is the stable, human-facing ordering
    // key, and BTreeMap iteration gives the required ascending order.
    let earlier_by_employee: BTreeMap<&str, &AssignmentRecord> = earlier
        .iter()
        .map(|record| (record.employee_number.value(), record))
        .collect();
    let later_by_employee: BTreeMap<&str, &AssignmentRecord> = later
        .iter()
        .map(|record| (record.employee_number.value(), record))
        .collect();

    let mut report: ChangeReport = ChangeReport::default();

    for (&number, &before) in &earlier_by_employee {
        match later_by_employee.get(number) {
            Some(&after) => {
                let Some(change_type) = classify_change(&before.facts(), &after.facts()) else {
                    continue;
                };
                match change_type {
                    ChangeType::Department => report.department_changes += 1,
                    ChangeType::Position => report.position_changes += 1,
                    ChangeType::Both => {
                        report.department_changes += 1;
                        report.position_changes += 1;
                        report.both_changes += 1;
                    }
                    ChangeType::Manager => report.manager_changes += 1,
                }
                report.changes.push(ChangeRecord {
                    employee_id: before.employee_id,
                    employee_number: number.to_string(),
                    employee_name: before.employee_name.clone(),
                    change_type,
                    before: EmployeeAssignmentView::from(before),
                    after: EmployeeAssignmentView::from(after),
                });
            }
            None => report.departed.push(EmployeePresence {
                employee_id: before.employee_id,
                employee_number: number.to_string(),
                employee_name: before.employee_name.clone(),
                assignment: EmployeeAssignmentView::from(before),
            }),
        }
    }

    for (&number, &after) in &later_by_employee {
        if !earlier_by_employee.contains_key(number) {
            report.joined.push(EmployeePresence {
                employee_id: after.employee_id,
                employee_number: number.to_string(),
                employee_name: after.employee_name.clone(),
                assignment: EmployeeAssignmentView::from(after),
            });
        }
    }

    report.total_changes = report.changes.len();
    report
}
