// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Queryable row structs and their conversions into domain types.
//!
//! Dates are stored as ISO 8601 text and booleans as integers; every
//! conversion back into domain types happens here so queries and
//! mutations stay thin.

use diesel::prelude::*;
use std::str::FromStr;

use crate::diesel_schema::{assignment_history, departments, employees, positions, ranks};
use crate::error::PersistenceError;
use orghist_domain::{
    AssignmentInterval, Department, DepartmentKind, Employee, EmployeeNumber, EmployeeStatus,
    Position, Rank, parse_iso_date,
};

/// Diesel Queryable struct for department rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = departments)]
pub struct DepartmentRow {
    pub department_id: i64,
    pub department_code: String,
    pub department_name: String,
    pub kind: String,
    pub parent_department_id: Option<i64>,
    pub display_order: i32,
    pub is_exception: i32,
}

impl DepartmentRow {
    /// Converts this row into a domain `Department`.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored kind string is not recognized.
    pub fn into_domain(self) -> Result<Department, PersistenceError> {
        let kind: DepartmentKind = DepartmentKind::from_str(&self.kind)
            .map_err(|e| PersistenceError::ConsistencyViolation(e.to_string()))?;
        Ok(Department::with_id(
            self.department_id,
            &self.department_code,
            self.department_name,
            kind,
            self.parent_department_id,
            self.display_order,
            self.is_exception != 0,
        ))
    }
}

/// Diesel Queryable struct for position rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = positions)]
pub struct PositionRow {
    pub position_id: i64,
    pub position_code: String,
    pub position_title: String,
    pub display_order: i32,
}

impl PositionRow {
    /// Converts this row into a domain `Position`.
    #[must_use]
    pub fn into_domain(self) -> Position {
        Position::with_id(
            self.position_id,
            &self.position_code,
            self.position_title,
            self.display_order,
        )
    }
}

/// Diesel Queryable struct for rank rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = ranks)]
pub struct RankRow {
    pub rank_id: i64,
    pub rank_code: String,
    pub rank_name: String,
}

impl RankRow {
    /// Converts this row into a domain `Rank`.
    #[must_use]
    pub fn into_domain(self) -> Rank {
        Rank::with_id(self.rank_id, &self.rank_code, self.rank_name)
    }
}

/// Diesel Queryable struct for employee rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = employees)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub employee_number: String,
    pub name: String,
    pub hire_date: String,
    pub termination_date: Option<String>,
    pub status: String,
}

impl EmployeeRow {
    /// Converts this row into a domain `Employee`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored date or status cannot be parsed.
    pub fn into_domain(self) -> Result<Employee, PersistenceError> {
        let hire_date = parse_iso_date(&self.hire_date)
            .map_err(|e| PersistenceError::DateConversion(e.to_string()))?;
        let termination_date = self
            .termination_date
            .as_deref()
            .map(parse_iso_date)
            .transpose()
            .map_err(|e| PersistenceError::DateConversion(e.to_string()))?;
        let status = EmployeeStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::ConsistencyViolation(e.to_string()))?;
        Ok(Employee::with_id(
            self.employee_id,
            EmployeeNumber::new(&self.employee_number),
            self.name,
            hire_date,
            termination_date,
            status,
        ))
    }
}

/// Diesel Queryable struct for assignment interval rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = assignment_history)]
pub struct IntervalRow {
    pub interval_id: i64,
    pub employee_id: i64,
    pub department_id: i64,
    pub position_id: i64,
    pub rank_id: Option<i64>,
    pub is_manager: i32,
    pub effective_start_date: String,
    pub effective_end_date: Option<String>,
    pub is_current: i32,
    pub reason: String,
    pub assigned_by: Option<String>,
    #[allow(dead_code)]
    pub created_at: Option<String>,
}

impl IntervalRow {
    /// Converts this row into a domain `AssignmentInterval`.
    ///
    /// # Errors
    ///
    /// Returns an error if a stored date cannot be parsed.
    pub fn into_domain(self) -> Result<AssignmentInterval, PersistenceError> {
        let effective_start = parse_iso_date(&self.effective_start_date)
            .map_err(|e| PersistenceError::DateConversion(e.to_string()))?;
        let effective_end = self
            .effective_end_date
            .as_deref()
            .map(parse_iso_date)
            .transpose()
            .map_err(|e| PersistenceError::DateConversion(e.to_string()))?;
        Ok(AssignmentInterval {
            interval_id: Some(self.interval_id),
            employee_id: self.employee_id,
            department_id: self.department_id,
            position_id: self.position_id,
            rank_id: self.rank_id,
            is_manager: self.is_manager != 0,
            effective_start,
            effective_end,
            is_current: self.is_current != 0,
            reason: self.reason,
            assigned_by: self.assigned_by,
        })
    }
}
