// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Interval-store lookups.
//!
//! The current-interval and baseline lookups never silently pick one
//! row when the store holds more than expected: that state is reported
//! as a consistency violation so callers can stop before making it
//! worse.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::data_models::IntervalRow;
use crate::diesel_schema::assignment_history;
use crate::error::PersistenceError;
use orghist_domain::{AssignmentInterval, BASELINE_REASON};

backend_fn! {
/// Finds the employee's current interval.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The canonical employee ID
///
/// # Returns
///
/// * `Ok(Some(interval))` if exactly one current interval exists
/// * `Ok(None)` if the employee has no current interval
///
/// # Errors
///
/// Returns `PersistenceError::ConsistencyViolation` if more than one
/// current interval exists (corrupted state; never silently resolved),
/// or an error if the database cannot be queried.
pub fn find_current_interval(
    conn: &mut _,
    employee_id: i64,
) -> Result<Option<AssignmentInterval>, PersistenceError> {
    let rows: Vec<IntervalRow> = assignment_history::table
        .filter(assignment_history::employee_id.eq(employee_id))
        .filter(assignment_history::is_current.eq(1))
        .select(IntervalRow::as_select())
        .load::<IntervalRow>(conn)?;

    match rows.len() {
        0 => Ok(None),
        1 => rows
            .into_iter()
            .next()
            .map(IntervalRow::into_domain)
            .transpose(),
        count => Err(PersistenceError::ConsistencyViolation(format!(
            "employee {employee_id} has {count} current intervals, expected exactly one"
        ))),
    }
}
}

backend_fn! {
/// Lists an employee's full interval timeline, ordered by start date.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The canonical employee ID
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn list_intervals_for_employee(
    conn: &mut _,
    employee_id: i64,
) -> Result<Vec<AssignmentInterval>, PersistenceError> {
    let rows: Vec<IntervalRow> = assignment_history::table
        .filter(assignment_history::employee_id.eq(employee_id))
        .order(assignment_history::effective_start_date.asc())
        .select(IntervalRow::as_select())
        .load::<IntervalRow>(conn)?;

    rows.into_iter().map(IntervalRow::into_domain).collect()
}
}

backend_fn! {
/// Finds the employee's baseline interval (the designated seed record
/// flagged by the reserved reason string).
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The canonical employee ID
///
/// # Returns
///
/// * `Ok(Some(interval))` if exactly one baseline interval exists
/// * `Ok(None)` if the employee has no baseline interval
///
/// # Errors
///
/// Returns `PersistenceError::ConsistencyViolation` if more than one
/// baseline interval exists (the migration idempotency anchor is
/// ambiguous; fatal for the enclosing run), or an error if the database
/// cannot be queried.
pub fn find_baseline_interval(
    conn: &mut _,
    employee_id: i64,
) -> Result<Option<AssignmentInterval>, PersistenceError> {
    let rows: Vec<IntervalRow> = assignment_history::table
        .filter(assignment_history::employee_id.eq(employee_id))
        .filter(assignment_history::reason.eq(BASELINE_REASON))
        .select(IntervalRow::as_select())
        .load::<IntervalRow>(conn)?;

    match rows.len() {
        0 => Ok(None),
        1 => rows
            .into_iter()
            .next()
            .map(IntervalRow::into_domain)
            .transpose(),
        count => Err(PersistenceError::ConsistencyViolation(format!(
            "employee {employee_id} has {count} baseline intervals, expected at most one"
        ))),
    }
}
}

backend_fn! {
/// Counts all interval rows in the store.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn count_intervals(conn: &mut _) -> Result<i64, PersistenceError> {
    Ok(assignment_history::table.count().get_result(conn)?)
}
}
