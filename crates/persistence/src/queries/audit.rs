// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit event queries.

use diesel::prelude::*;
use diesel::{MysqlConnection, SqliteConnection};

use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;
use orghist_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};

/// Raw audit event payload columns.
type AuditPayload = (String, String, String, String, String);

/// Rebuilds an `AuditEvent` from its stored JSON payload columns.
fn event_from_payload(payload: AuditPayload) -> Result<AuditEvent, PersistenceError> {
    let (actor_json, cause_json, action_json, before_json, after_json) = payload;
    let actor: Actor = serde_json::from_str(&actor_json)?;
    let cause: Cause = serde_json::from_str(&cause_json)?;
    let action: Action = serde_json::from_str(&action_json)?;
    let before: StateSnapshot = serde_json::from_str(&before_json)?;
    let after: StateSnapshot = serde_json::from_str(&after_json)?;
    Ok(AuditEvent::new(actor, cause, action, before, after))
}

backend_fn! {
/// Retrieves an audit event by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `event_id` - The event ID to retrieve
///
/// # Errors
///
/// Returns an error if the event is not found or cannot be deserialized.
pub fn get_audit_event(conn: &mut _, event_id: i64) -> Result<AuditEvent, PersistenceError> {
    let payload: AuditPayload = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select((
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::before_snapshot_json,
            audit_events::after_snapshot_json,
        ))
        .first::<AuditPayload>(conn)?;

    event_from_payload(payload)
}
}

backend_fn! {
/// Retrieves the ordered audit timeline for one employee.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `employee_id` - The canonical employee ID
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn list_audit_events_for_employee(
    conn: &mut _,
    employee_id: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let payloads: Vec<AuditPayload> = audit_events::table
        .filter(audit_events::employee_id.eq(employee_id))
        .order(audit_events::event_id.asc())
        .select((
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::before_snapshot_json,
            audit_events::after_snapshot_json,
        ))
        .load::<AuditPayload>(conn)?;

    payloads.into_iter().map(event_from_payload).collect()
}
}

backend_fn! {
/// Retrieves the full ordered audit timeline.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if events cannot be retrieved or deserialized.
pub fn list_audit_events(conn: &mut _) -> Result<Vec<AuditEvent>, PersistenceError> {
    let payloads: Vec<AuditPayload> = audit_events::table
        .order(audit_events::event_id.asc())
        .select((
            audit_events::actor_json,
            audit_events::cause_json,
            audit_events::action_json,
            audit_events::before_snapshot_json,
            audit_events::after_snapshot_json,
        ))
        .load::<AuditPayload>(conn)?;

    payloads.into_iter().map(event_from_payload).collect()
}
}
