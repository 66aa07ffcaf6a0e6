// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use serde::{Deserialize, Serialize};

/// Represents the entity performing an action.
///
/// An actor is any identifiable entity that initiates a state change:
/// an HR operator, a migration run, or an automated process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (e.g., "operator", "migration", "system").
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }
}

/// Represents the reason or trigger for an action.
///
/// For assignment transitions the description carries the free-text
/// assignment reason that ends up on the interval row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID, batch run ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The name of the action (e.g., "`RecordTransition`",
    /// "`TerminateEmployee`", "`MigrateBaseline`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// A compact rendering of an employee's assignment state at a point in
/// time, captured before and after each transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    /// A `key=value` string representation of the assignment facts.
    pub data: String,
}

impl StateSnapshot {
    /// Creates a new `StateSnapshot`.
    ///
    /// # Arguments
    ///
    /// * `data` - A string representation of the state
    #[must_use]
    pub const fn new(data: String) -> Self {
        Self { data }
    }

    /// The snapshot used when an employee has no assignment at all.
    #[must_use]
    pub fn unassigned() -> Self {
        Self::new(String::from("unassigned"))
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change must produce exactly one audit event,
/// persisted in the same transaction as the change itself. Audit events
/// capture:
/// - Who performed the action (actor)
/// - Why it was performed (cause; carries the assignment reason)
/// - What action was performed (action)
/// - The assignment state before the transition (before)
/// - The assignment state after the transition (after)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The state before the transition.
    pub before: StateSnapshot,
    /// The state after the transition.
    pub after: StateSnapshot,
}

impl AuditEvent {
    /// Creates a new `AuditEvent`.
    ///
    /// Once created, an audit event is immutable.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `before` - The state before the transition
    /// * `after` - The state after the transition
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        before: StateSnapshot,
        after: StateSnapshot,
    ) -> Self {
        Self {
            actor,
            cause,
            action,
            before,
            after,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("hr-admin"), String::from("operator"));

        assert_eq!(actor.id, "hr-admin");
        assert_eq!(actor.actor_type, "operator");
    }

    #[test]
    fn test_cause_carries_assignment_reason() {
        let cause: Cause = Cause::new(
            String::from("req-456"),
            String::from("promoted to team lead"),
        );

        assert_eq!(cause.id, "req-456");
        assert_eq!(cause.description, "promoted to team lead");
    }

    #[test]
    fn test_action_creation_with_details() {
        let action: Action = Action::new(
            String::from("RecordTransition"),
            Some(String::from("Engineering/Team Lead")),
        );

        assert_eq!(action.name, "RecordTransition");
        assert_eq!(action.details, Some(String::from("Engineering/Team Lead")));
    }

    #[test]
    fn test_unassigned_snapshot() {
        let snapshot: StateSnapshot = StateSnapshot::unassigned();
        assert_eq!(snapshot.data, "unassigned");
    }

    #[test]
    fn test_audit_event_creation_requires_all_fields() {
        let actor: Actor = Actor::new(String::from("hr-admin"), String::from("operator"));
        let cause: Cause = Cause::new(String::from("req-456"), String::from("reassignment"));
        let action: Action = Action::new(String::from("RecordTransition"), None);
        let before: StateSnapshot = StateSnapshot::new(String::from("department_id=1"));
        let after: StateSnapshot = StateSnapshot::new(String::from("department_id=2"));

        let event: AuditEvent = AuditEvent::new(
            actor.clone(),
            cause.clone(),
            action.clone(),
            before.clone(),
            after.clone(),
        );

        assert_eq!(event.actor, actor);
        assert_eq!(event.cause, cause);
        assert_eq!(event.action, action);
        assert_eq!(event.before, before);
        assert_eq!(event.after, after);
    }

    #[test]
    fn test_audit_event_serializes_round_trip() {
        let event: AuditEvent = AuditEvent::new(
            Actor::new(String::from("migration"), String::from("migration")),
            Cause::new(String::from("run-1"), String::from("initial migration")),
            Action::new(String::from("MigrateBaseline"), None),
            StateSnapshot::unassigned(),
            StateSnapshot::new(String::from("department_id=3,position_id=1")),
        );

        let json: String = serde_json::to_string(&event).unwrap();
        let decoded: AuditEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, decoded);
    }
}
