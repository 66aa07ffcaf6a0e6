// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Master-data lookups: departments, positions, ranks, employees.
//!
//! All queries are generated in backend-specific monomorphic versions
//! (`_sqlite` and `_mysql` suffixes) using the `backend_fn!` macro.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::{DepartmentRow, EmployeeRow, PositionRow, RankRow};
use crate::diesel_schema::{departments, employees, positions, ranks};
use crate::error::PersistenceError;
use orghist_domain::{Department, DepartmentKind, Employee, Position, Rank};

backend_fn! {
/// Finds a department by its code.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `code` - The department code (already normalized)
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_department_by_code(
    conn: &mut _,
    code: &str,
) -> Result<Option<Department>, PersistenceError> {
    let row: Option<DepartmentRow> = departments::table
        .filter(departments::department_code.eq(code))
        .select(DepartmentRow::as_select())
        .first::<DepartmentRow>(conn)
        .optional()?;

    row.map(DepartmentRow::into_domain).transpose()
}
}

backend_fn! {
/// Retrieves a department by its canonical ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `department_id` - The canonical department ID
///
/// # Errors
///
/// Returns an error if the department does not exist.
pub fn get_department(
    conn: &mut _,
    department_id: i64,
) -> Result<Department, PersistenceError> {
    let row: DepartmentRow = departments::table
        .filter(departments::department_id.eq(department_id))
        .select(DepartmentRow::as_select())
        .first::<DepartmentRow>(conn)?;

    row.into_domain()
}
}

backend_fn! {
/// Lists the full department table, ordered for deterministic output.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_departments(conn: &mut _) -> Result<Vec<Department>, PersistenceError> {
    let rows: Vec<DepartmentRow> = departments::table
        .order((departments::display_order.asc(), departments::department_code.asc()))
        .select(DepartmentRow::as_select())
        .load::<DepartmentRow>(conn)?;

    rows.into_iter().map(DepartmentRow::into_domain).collect()
}
}

backend_fn! {
/// Finds the designated organizational root: the first parentless
/// non-exception department of `Company` kind, by display order.
///
/// This lookup is independent of any snapshot's populated set; it backs
/// the third strategy of the root-resolution decision table.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_designated_root(conn: &mut _) -> Result<Option<Department>, PersistenceError> {
    let row: Option<DepartmentRow> = departments::table
        .filter(departments::parent_department_id.is_null())
        .filter(departments::kind.eq(DepartmentKind::Company.as_str()))
        .filter(departments::is_exception.eq(0))
        .order(departments::display_order.asc())
        .select(DepartmentRow::as_select())
        .first::<DepartmentRow>(conn)
        .optional()?;

    row.map(DepartmentRow::into_domain).transpose()
}
}

backend_fn! {
/// Finds the terminated exception department.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_terminated_department(
    conn: &mut _,
) -> Result<Option<Department>, PersistenceError> {
    let row: Option<DepartmentRow> = departments::table
        .filter(departments::is_exception.eq(1))
        .filter(departments::department_code.eq(Department::TERMINATED_CODE))
        .select(DepartmentRow::as_select())
        .first::<DepartmentRow>(conn)
        .optional()?;

    row.map(DepartmentRow::into_domain).transpose()
}
}

backend_fn! {
/// Finds a position by its code.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `code` - The position code (already normalized)
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_position_by_code(
    conn: &mut _,
    code: &str,
) -> Result<Option<Position>, PersistenceError> {
    let row: Option<PositionRow> = positions::table
        .filter(positions::position_code.eq(code))
        .select(PositionRow::as_select())
        .first::<PositionRow>(conn)
        .optional()?;

    Ok(row.map(PositionRow::into_domain))
}
}

backend_fn! {
/// Finds a rank by its code.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `code` - The rank code (already normalized)
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_rank_by_code(
    conn: &mut _,
    code: &str,
) -> Result<Option<Rank>, PersistenceError> {
    let row: Option<RankRow> = ranks::table
        .filter(ranks::rank_code.eq(code))
        .select(RankRow::as_select())
        .first::<RankRow>(conn)
        .optional()?;

    Ok(row.map(RankRow::into_domain))
}
}

backend_fn! {
/// Finds an employee by employee number.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_number` - The employee number (already normalized)
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn find_employee_by_number(
    conn: &mut _,
    employee_number: &str,
) -> Result<Option<Employee>, PersistenceError> {
    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_number.eq(employee_number))
        .select(EmployeeRow::as_select())
        .first::<EmployeeRow>(conn)
        .optional()?;

    row.map(EmployeeRow::into_domain).transpose()
}
}

backend_fn! {
/// Retrieves an employee by canonical ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The canonical employee ID
///
/// # Errors
///
/// Returns an error if the employee does not exist.
pub fn get_employee(conn: &mut _, employee_id: i64) -> Result<Employee, PersistenceError> {
    let row: EmployeeRow = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first::<EmployeeRow>(conn)?;

    row.into_domain()
}
}

backend_fn! {
/// Lists all employees ordered by employee number.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_employees(conn: &mut _) -> Result<Vec<Employee>, PersistenceError> {
    let rows: Vec<EmployeeRow> = employees::table
        .order(employees::employee_number.asc())
        .select(EmployeeRow::as_select())
        .load::<EmployeeRow>(conn)?;

    rows.into_iter().map(EmployeeRow::into_domain).collect()
}
}
