// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Interval mutations and the atomic transition application.
//!
//! `apply_transition_*` is the only code path that closes an interval,
//! and it always does so in the same database transaction that opens
//! the replacement and records the audit event. A crash between the two
//! writes is impossible to observe as committed state.

use diesel::prelude::*;
use diesel::{Connection, MysqlConnection, SqliteConnection};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::backend::PersistenceBackend;
use crate::diesel_schema::assignment_history;
use crate::error::PersistenceError;
use crate::mutations::audit::{persist_audit_event_mysql, persist_audit_event_sqlite};
use orghist::{IntervalClose, TransitionOutcome};
use orghist_domain::{AssignmentInterval, BASELINE_REASON, format_iso_date};

/// The identifiers produced by an applied transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersistedTransition {
    /// The ID of the newly opened interval.
    pub interval_id: i64,
    /// The ID of the audit event recorded with it.
    pub event_id: i64,
}

/// The row counts produced by a reset-to-baseline pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ResetOutcome {
    /// Non-baseline interval rows deleted.
    pub deleted: usize,
    /// Baseline rows re-opened as current because they were the only
    /// interval left for their employee.
    pub reopened: usize,
}

backend_fn! {
/// Inserts a new interval row and returns its assigned ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `interval` - The interval to insert (must not carry an ID yet)
///
/// # Errors
///
/// Returns an error if the interval already has an ID, a date cannot be
/// formatted, or the insert fails.
pub fn insert_interval(
    conn: &mut _,
    interval: &AssignmentInterval,
) -> Result<i64, PersistenceError> {
    if interval.interval_id.is_some() {
        return Err(PersistenceError::ConsistencyViolation(
            "new interval must not carry an interval_id".to_string(),
        ));
    }

    let start: String = format_iso_date(interval.effective_start)
        .map_err(|e| PersistenceError::DateConversion(e.to_string()))?;
    let end: Option<String> = interval
        .effective_end
        .map(format_iso_date)
        .transpose()
        .map_err(|e| PersistenceError::DateConversion(e.to_string()))?;
    let created_at: Option<String> = time::OffsetDateTime::now_utc()
        .format(&time::format_description::well_known::Rfc3339)
        .ok();

    diesel::insert_into(assignment_history::table)
        .values((
            assignment_history::employee_id.eq(interval.employee_id),
            assignment_history::department_id.eq(interval.department_id),
            assignment_history::position_id.eq(interval.position_id),
            assignment_history::rank_id.eq(interval.rank_id),
            assignment_history::is_manager.eq(i32::from(interval.is_manager)),
            assignment_history::effective_start_date.eq(&start),
            assignment_history::effective_end_date.eq(end.as_deref()),
            assignment_history::is_current.eq(i32::from(interval.is_current)),
            assignment_history::reason.eq(&interval.reason),
            assignment_history::assigned_by.eq(interval.assigned_by.as_deref()),
            assignment_history::created_at.eq(created_at.as_deref()),
        ))
        .execute(conn)?;

    let interval_id: i64 = conn.get_last_insert_rowid()?;
    debug!(
        interval_id,
        employee_id = interval.employee_id,
        "Inserted interval"
    );
    Ok(interval_id)
}
}

backend_fn! {
/// Closes an interval: sets its end date and clears the current flag.
///
/// Only the transition engine may request this, and only inside the
/// same transaction that opens the replacement interval.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `close` - The close instruction from the transition plan
///
/// # Errors
///
/// Returns an error if the interval does not exist or the update fails.
pub fn close_interval(conn: &mut _, close: &IntervalClose) -> Result<(), PersistenceError> {
    let end: String = format_iso_date(close.effective_end)
        .map_err(|e| PersistenceError::DateConversion(e.to_string()))?;

    let updated: usize = diesel::update(
        assignment_history::table
            .filter(assignment_history::interval_id.eq(close.interval_id)),
    )
    .set((
        assignment_history::effective_end_date.eq(&end),
        assignment_history::is_current.eq(0),
    ))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotFound(format!(
            "interval {} not found",
            close.interval_id
        )));
    }

    debug!(
        interval_id = close.interval_id,
        effective_end = %end,
        same_day_correction = close.same_day_correction,
        "Closed interval"
    );
    Ok(())
}
}

/// Applies a transition outcome atomically - `SQLite` version.
///
/// Closes the superseded interval (when the plan carries one), inserts
/// the replacement, and records the audit event inside one transaction.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `outcome` - The transition outcome to apply
///
/// # Returns
///
/// The new interval ID and the audit event ID.
///
/// # Errors
///
/// Returns an error if any write fails; no partial state is committed.
pub fn apply_transition_sqlite(
    conn: &mut SqliteConnection,
    outcome: &TransitionOutcome,
) -> Result<PersistedTransition, PersistenceError> {
    let result: PersistedTransition =
        conn.transaction::<PersistedTransition, PersistenceError, _>(|conn| {
            if let Some(close) = &outcome.plan.close {
                close_interval_sqlite(conn, close)?;
            }
            let interval_id: i64 = insert_interval_sqlite(conn, &outcome.plan.open)?;
            let event_id: i64 = persist_audit_event_sqlite(
                conn,
                Some(outcome.plan.open.employee_id),
                &outcome.audit_event,
            )?;
            Ok(PersistedTransition {
                interval_id,
                event_id,
            })
        })?;

    info!(
        interval_id = result.interval_id,
        event_id = result.event_id,
        employee_id = outcome.plan.open.employee_id,
        closed_previous = outcome.plan.close.is_some(),
        "Applied transition"
    );
    Ok(result)
}

/// Applies a transition outcome atomically - `MySQL` version.
///
/// Closes the superseded interval (when the plan carries one), inserts
/// the replacement, and records the audit event inside one transaction.
///
/// # Arguments
///
/// * `conn` - The active database connection
/// * `outcome` - The transition outcome to apply
///
/// # Returns
///
/// The new interval ID and the audit event ID.
///
/// # Errors
///
/// Returns an error if any write fails; no partial state is committed.
pub fn apply_transition_mysql(
    conn: &mut MysqlConnection,
    outcome: &TransitionOutcome,
) -> Result<PersistedTransition, PersistenceError> {
    let result: PersistedTransition =
        conn.transaction::<PersistedTransition, PersistenceError, _>(|conn| {
            if let Some(close) = &outcome.plan.close {
                close_interval_mysql(conn, close)?;
            }
            let interval_id: i64 = insert_interval_mysql(conn, &outcome.plan.open)?;
            let event_id: i64 = persist_audit_event_mysql(
                conn,
                Some(outcome.plan.open.employee_id),
                &outcome.audit_event,
            )?;
            Ok(PersistedTransition {
                interval_id,
                event_id,
            })
        })?;

    info!(
        interval_id = result.interval_id,
        event_id = result.event_id,
        employee_id = outcome.plan.open.employee_id,
        closed_previous = outcome.plan.close.is_some(),
        "Applied transition"
    );
    Ok(result)
}

backend_fn! {
/// Deletes an employee's entire interval timeline.
///
/// Intervals are closed, not destroyed, under normal operation; this
/// exists for explicit administrative purges only and is audited by the
/// caller.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The canonical employee ID
///
/// # Returns
///
/// The number of deleted interval rows.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn purge_history(conn: &mut _, employee_id: i64) -> Result<usize, PersistenceError> {
    let deleted: usize = diesel::delete(
        assignment_history::table.filter(assignment_history::employee_id.eq(employee_id)),
    )
    .execute(conn)?;

    info!(employee_id, deleted, "Purged assignment history");
    Ok(deleted)
}
}

backend_fn! {
/// Resets the interval store to its baseline records.
///
/// Deletes every non-baseline interval, then re-opens the baseline row
/// (end date cleared, current flag set) for each employee left with
/// exactly one interval. Employees with zero or multiple remaining
/// rows are left untouched. Runs in one transaction.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if any statement fails; no partial state is
/// committed.
pub fn reset_history_to_baseline(conn: &mut _) -> Result<ResetOutcome, PersistenceError> {
    let outcome: ResetOutcome = conn.transaction::<ResetOutcome, PersistenceError, _>(|conn| {
        let deleted: usize = diesel::delete(
            assignment_history::table.filter(assignment_history::reason.ne(BASELINE_REASON)),
        )
        .execute(conn)?;

        // Employees left with a single (baseline) interval get it
        // re-opened as their current assignment.
        let remaining: Vec<(i64, i64)> = assignment_history::table
            .select((
                assignment_history::interval_id,
                assignment_history::employee_id,
            ))
            .load::<(i64, i64)>(conn)?;

        let mut by_employee: HashMap<i64, Vec<i64>> = HashMap::new();
        for (interval_id, employee_id) in remaining {
            by_employee.entry(employee_id).or_default().push(interval_id);
        }
        let to_reopen: Vec<i64> = by_employee
            .into_values()
            .filter(|ids| ids.len() == 1)
            .flatten()
            .collect();

        let reopened: usize = if to_reopen.is_empty() {
            0
        } else {
            diesel::update(
                assignment_history::table
                    .filter(assignment_history::interval_id.eq_any(&to_reopen)),
            )
            .set((
                assignment_history::effective_end_date.eq(None::<String>),
                assignment_history::is_current.eq(1),
            ))
            .execute(conn)?
        };

        Ok(ResetOutcome { deleted, reopened })
    })?;

    info!(
        deleted = outcome.deleted,
        reopened = outcome.reopened,
        "Reset assignment history to baseline"
    );
    Ok(outcome)
}
}
