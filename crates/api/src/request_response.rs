// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response types for the operation boundary.
//!
//! Responses are structured objects built from domain and core types;
//! raw storage rows never cross this boundary.

use orghist::{ChangeReport, DepartmentNode};
use orghist_domain::AssignmentInterval;
use serde::{Deserialize, Serialize};
use time::Date;

/// Request to record an assignment transition for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTransitionRequest {
    /// The employee number.
    pub employee_number: String,
    /// The new department's code.
    pub department_code: String,
    /// The new position's code.
    pub position_code: String,
    /// The new rank's code, if any.
    pub rank_code: Option<String>,
    /// Whether the employee manages the department.
    pub is_manager: bool,
    /// The first day the new assignment is effective.
    pub effective_date: Date,
    /// Free-text audit note explaining the assignment.
    pub reason: String,
}

/// The closed half of an applied transition, if one existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClosedIntervalInfo {
    /// The closed interval's ID.
    pub interval_id: i64,
    /// The end date recorded on the closed interval.
    pub effective_end: Date,
    /// Whether the close was a same-day correction.
    pub same_day_correction: bool,
}

/// Response for a recorded transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordTransitionResponse {
    /// The employee number.
    pub employee_number: String,
    /// The newly opened interval's ID.
    pub interval_id: i64,
    /// The audit event recorded with the transition.
    pub event_id: i64,
    /// The new interval's first effective day.
    pub effective_start: Date,
    /// The closed previous interval, if the employee had one.
    pub closed_previous: Option<ClosedIntervalInfo>,
}

/// Response carrying a reconstructed point-in-time organization tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationSnapshotResponse {
    /// The reference date the snapshot is valid for.
    pub reference_date: Date,
    /// Total departments in the tree.
    pub total_departments: u32,
    /// Total employees in the tree.
    pub total_employees: u32,
    /// Which root-resolution strategy produced the tree root.
    pub root_resolution: String,
    /// The tree root.
    pub organization: DepartmentNode,
}

/// Response carrying the structural diff between two reference dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationDiffResponse {
    /// The earlier reference date.
    pub earlier_date: Date,
    /// The later reference date.
    pub later_date: Date,
    /// The classified changes and one-sided employee lists.
    pub report: ChangeReport,
}

/// Request to terminate an employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminateEmployeeRequest {
    /// The employee number.
    pub employee_number: String,
    /// The termination date. Must be strictly after the hire date.
    pub termination_date: Date,
    /// Optional audit note; a default termination reason is used when
    /// absent.
    pub reason: Option<String>,
}

/// Response for a terminated employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TerminateEmployeeResponse {
    /// The employee number.
    pub employee_number: String,
    /// The termination date recorded on the employee.
    pub termination_date: Date,
    /// The interval now routing the employee to the terminated
    /// department.
    pub interval_id: i64,
    /// The audit event recorded with the termination.
    pub event_id: i64,
}

/// Response for an administrative history purge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeHistoryResponse {
    /// The employee number.
    pub employee_number: String,
    /// The number of interval rows deleted.
    pub purged: usize,
    /// The audit event recording the purge.
    pub event_id: i64,
}

/// Response carrying an employee's full assignment timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentHistoryResponse {
    /// The employee number.
    pub employee_number: String,
    /// The timeline, ordered by effective start date.
    pub intervals: Vec<AssignmentInterval>,
}
