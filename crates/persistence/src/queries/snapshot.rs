// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The point-in-time assignment selection query.
//!
//! Selects the interval rows valid at a reference date, joined with
//! employee, department, position, and rank display fields. This is the
//! shared source for both snapshot reconstruction and snapshot diffing.
//! The read takes no lock and tolerates slightly stale state.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};
use tracing::debug;

use crate::diesel_schema::{assignment_history, departments, employees, positions, ranks};
use crate::error::PersistenceError;
use orghist::AssignmentRecord;
use orghist_domain::EmployeeNumber;

/// Joined row tuple loaded by the validity query.
type JoinedRow = (
    i64,            // employee_id
    String,         // employee_number
    String,         // employee name
    i64,            // department_id
    String,         // department_code
    String,         // department_name
    i64,            // position_id
    String,         // position_code
    String,         // position_title
    Option<i64>,    // rank_id
    Option<String>, // rank_name
    Option<String>, // rank_code
    i32,            // is_manager
);

backend_fn! {
/// Selects the assignments valid on a reference date.
///
/// An interval is valid when its start is on or before the reference
/// date and it either has no end date, ends on or after the reference
/// date, or is still flagged current (legacy rows may carry a stale end
/// date). Exception departments are excluded here, not in the tree
/// builder, so diff results skip them too.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `reference_date` - The reference date as an ISO 8601 string
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn assignments_valid_on(
    conn: &mut _,
    reference_date: &str,
) -> Result<Vec<AssignmentRecord>, PersistenceError> {
    debug!(reference_date, "Selecting assignments valid on date");

    let rows: Vec<JoinedRow> = assignment_history::table
        .inner_join(employees::table)
        .inner_join(departments::table)
        .inner_join(positions::table)
        .left_join(ranks::table)
        .filter(assignment_history::effective_start_date.le(reference_date))
        .filter(
            assignment_history::effective_end_date
                .is_null()
                .or(assignment_history::effective_end_date.ge(reference_date))
                .or(assignment_history::is_current.eq(1)),
        )
        .filter(departments::is_exception.eq(0))
        .order(employees::employee_number.asc())
        .select((
            assignment_history::employee_id,
            employees::employee_number,
            employees::name,
            assignment_history::department_id,
            departments::department_code,
            departments::department_name,
            assignment_history::position_id,
            positions::position_code,
            positions::position_title,
            assignment_history::rank_id,
            ranks::rank_name.nullable(),
            ranks::rank_code.nullable(),
            assignment_history::is_manager,
        ))
        .load::<JoinedRow>(conn)?;

    let records: Vec<AssignmentRecord> = rows
        .into_iter()
        .map(
            |(
                employee_id,
                employee_number,
                employee_name,
                department_id,
                department_code,
                department_name,
                position_id,
                position_code,
                position_title,
                rank_id,
                rank_name,
                rank_code,
                is_manager,
            )| AssignmentRecord {
                employee_id,
                employee_number: EmployeeNumber::new(&employee_number),
                employee_name,
                department_id,
                department_code,
                department_name,
                position_id,
                position_title,
                position_code,
                rank_id,
                rank_name,
                rank_code,
                is_manager: is_manager != 0,
            },
        )
        .collect();

    debug!(
        reference_date,
        row_count = records.len(),
        "Selected valid assignments"
    );

    Ok(records)
}
}
