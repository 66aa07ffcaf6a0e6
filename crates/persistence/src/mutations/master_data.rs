// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Master-data mutations: departments, positions, ranks, employees.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::{departments, employees, positions, ranks};
use crate::error::PersistenceError;
use orghist_domain::{Department, Employee, EmployeeStatus, Position, Rank, format_iso_date};

backend_fn! {
/// Inserts a new department and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `department` - The department to insert (must not carry an ID yet)
///
/// # Errors
///
/// Returns an error if the department already has an ID or the insert
/// fails.
pub fn create_department(
    conn: &mut _,
    department: &Department,
) -> Result<i64, PersistenceError> {
    if department.department_id.is_some() {
        return Err(PersistenceError::ConsistencyViolation(
            "new department must not carry a department_id".to_string(),
        ));
    }

    diesel::insert_into(departments::table)
        .values((
            departments::department_code.eq(&department.code),
            departments::department_name.eq(&department.name),
            departments::kind.eq(department.kind.as_str()),
            departments::parent_department_id.eq(department.parent_department_id),
            departments::display_order.eq(department.display_order),
            departments::is_exception.eq(i32::from(department.is_exception)),
        ))
        .execute(conn)?;

    let department_id: i64 = conn.get_last_insert_rowid()?;
    debug!(department_id, code = %department.code, "Inserted department");
    Ok(department_id)
}
}

backend_fn! {
/// Inserts a new position and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `position` - The position to insert (must not carry an ID yet)
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_position(conn: &mut _, position: &Position) -> Result<i64, PersistenceError> {
    diesel::insert_into(positions::table)
        .values((
            positions::position_code.eq(&position.code),
            positions::position_title.eq(&position.title),
            positions::display_order.eq(position.display_order),
        ))
        .execute(conn)?;

    let position_id: i64 = conn.get_last_insert_rowid()?;
    debug!(position_id, code = %position.code, "Inserted position");
    Ok(position_id)
}
}

backend_fn! {
/// Inserts a new rank and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `rank` - The rank to insert (must not carry an ID yet)
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_rank(conn: &mut _, rank: &Rank) -> Result<i64, PersistenceError> {
    diesel::insert_into(ranks::table)
        .values((
            ranks::rank_code.eq(&rank.code),
            ranks::rank_name.eq(&rank.name),
        ))
        .execute(conn)?;

    let rank_id: i64 = conn.get_last_insert_rowid()?;
    debug!(rank_id, code = %rank.code, "Inserted rank");
    Ok(rank_id)
}
}

backend_fn! {
/// Inserts a new employee and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee` - The employee to insert (must not carry an ID yet)
///
/// # Errors
///
/// Returns an error if the employee already has an ID or the insert
/// fails.
pub fn create_employee(conn: &mut _, employee: &Employee) -> Result<i64, PersistenceError> {
    if employee.employee_id.is_some() {
        return Err(PersistenceError::ConsistencyViolation(
            "new employee must not carry an employee_id".to_string(),
        ));
    }

    let hire_date: String = format_iso_date(employee.hire_date)
        .map_err(|e| PersistenceError::DateConversion(e.to_string()))?;
    let termination_date: Option<String> = employee
        .termination_date
        .map(format_iso_date)
        .transpose()
        .map_err(|e| PersistenceError::DateConversion(e.to_string()))?;

    diesel::insert_into(employees::table)
        .values((
            employees::employee_number.eq(employee.employee_number.value()),
            employees::name.eq(&employee.name),
            employees::hire_date.eq(&hire_date),
            employees::termination_date.eq(termination_date.as_deref()),
            employees::status.eq(employee.status.as_str()),
        ))
        .execute(conn)?;

    let employee_id: i64 = conn.get_last_insert_rowid()?;
    debug!(
        employee_id,
        employee_number = %employee.employee_number,
        "Inserted employee"
    );
    Ok(employee_id)
}
}

backend_fn! {
/// Records an employee's termination date and status.
///
/// The interval-side effect of termination (routing to the terminated
/// department) goes through the transition engine; this only updates
/// the employee row.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The canonical employee ID
/// * `termination_date` - The termination date as an ISO 8601 string
///
/// # Errors
///
/// Returns an error if the employee does not exist or the update fails.
pub fn record_termination(
    conn: &mut _,
    employee_id: i64,
    termination_date: &str,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        employees::table.filter(employees::employee_id.eq(employee_id)),
    )
    .set((
        employees::termination_date.eq(termination_date),
        employees::status.eq(EmployeeStatus::Terminated.as_str()),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "employee {employee_id} not found"
        )));
    }

    debug!(employee_id, termination_date, "Recorded termination");
    Ok(())
}
}
