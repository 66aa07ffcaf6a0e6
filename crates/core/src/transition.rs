// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The history transition engine.
//!
//! Planning is pure: it takes the employee, the employee's current
//! interval (if any), and the requested assignment, and returns the
//! close/open pair to be applied atomically by the persistence layer.
//! This is the only code allowed to decide that an interval closes.

use crate::error::CoreError;
use orghist_audit::{Action, Actor, AuditEvent, Cause, StateSnapshot};
use orghist_domain::{AssignmentFacts, AssignmentInterval, DomainError, Employee};
use time::Date;

/// A requested assignment change for one employee.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRequest {
    /// The new assignment facts.
    pub facts: AssignmentFacts,
    /// The first day the new assignment is effective.
    pub effective_date: Date,
    /// Free-text audit note explaining the assignment.
    pub reason: String,
    /// Identity of whoever recorded the assignment, if known.
    pub assigned_by: Option<String>,
}

/// Instruction to close an existing interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalClose {
    /// The interval to close.
    pub interval_id: i64,
    /// The last effective day to record on the closed interval.
    pub effective_end: Date,
    /// Whether this close is a same-day correction (the closed interval
    /// becomes an explicit one-day record).
    pub same_day_correction: bool,
}

/// The close/open pair produced by planning a transition.
///
/// The pair is the minimum atomic unit: applying one half without the
/// other is the failure mode the engine exists to prevent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionPlan {
    /// The interval to close, if the employee has a current interval.
    pub close: Option<IntervalClose>,
    /// The new open interval.
    pub open: AssignmentInterval,
}

/// A transition plan paired with the audit event recording it.
///
/// Persistence applies both within one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutcome {
    /// The planned close/open pair.
    pub plan: TransitionPlan,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}

/// Plans a transition for an employee.
///
/// # Arguments
///
/// * `employee` - The employee (must be persisted)
/// * `current` - The employee's current interval, if any; the caller is
///   responsible for having rejected multiple currents already
/// * `request` - The requested assignment change
///
/// # Returns
///
/// A `TransitionPlan` closing the current interval (when present) and
/// opening the replacement.
///
/// # Errors
///
/// Returns an error if:
/// - The effective date precedes the employee's hire date
/// - The effective date precedes the current interval's start date
/// - The close date cannot be computed (date arithmetic overflow)
pub fn plan_transition(
    employee: &Employee,
    current: Option<&AssignmentInterval>,
    request: &TransitionRequest,
) -> Result<TransitionPlan, CoreError> {
    let employee_id: i64 = employee.employee_id.ok_or_else(|| {
        CoreError::Internal(String::from("cannot plan a transition for an unpersisted employee"))
    })?;

    let close: Option<IntervalClose> = match current {
        None => {
            // First assignment: nothing to close, but the timeline may
            // not begin before employment does.
            if request.effective_date < employee.hire_date {
                return Err(CoreError::DomainViolation(
                    DomainError::TemporalOrderingViolation {
                        employee_id,
                        attempted: request.effective_date,
                        bound: employee.hire_date,
                        detail: String::from("the hire date"),
                    },
                ));
            }
            None
        }
        Some(current) => Some(plan_close(employee, employee_id, current, request)?),
    };

    let open: AssignmentInterval = AssignmentInterval::open(
        employee_id,
        request.facts,
        request.effective_date,
        request.reason.clone(),
        request.assigned_by.clone(),
    );

    Ok(TransitionPlan { close, open })
}

/// Computes the close instruction for the employee's current interval.
fn plan_close(
    employee: &Employee,
    employee_id: i64,
    current: &AssignmentInterval,
    request: &TransitionRequest,
) -> Result<IntervalClose, CoreError> {
    let interval_id: i64 = current.interval_id.ok_or_else(|| {
        CoreError::Internal(String::from("current interval is missing its identifier"))
    })?;

    if request.effective_date < current.effective_start {
        return Err(CoreError::DomainViolation(
            DomainError::TemporalOrderingViolation {
                employee_id,
                attempted: request.effective_date,
                bound: current.effective_start,
                detail: String::from("the current interval's start date"),
            },
        ));
    }

    if request.effective_date == current.effective_start {
        // Same-day correction: the superseded interval becomes an
        // explicit one-day record rather than being mutated in place.
        return Ok(IntervalClose {
            interval_id,
            effective_end: request.effective_date,
            same_day_correction: true,
        });
    }

    let previous_end: Date = request.effective_date.previous_day().ok_or_else(|| {
        CoreError::DomainViolation(DomainError::DateArithmeticOverflow {
            operation: String::from("computing the day before the effective date"),
        })
    })?;

    if previous_end < employee.hire_date {
        return Err(CoreError::DomainViolation(
            DomainError::TemporalOrderingViolation {
                employee_id,
                attempted: previous_end,
                bound: employee.hire_date,
                detail: String::from("the hire date"),
            },
        ));
    }

    Ok(IntervalClose {
        interval_id,
        effective_end: previous_end,
        same_day_correction: false,
    })
}

/// Renders assignment facts as an audit snapshot string.
fn facts_snapshot(facts: &AssignmentFacts) -> StateSnapshot {
    let rank: String = facts
        .rank_id
        .map_or_else(|| String::from("none"), |id| id.to_string());
    StateSnapshot::new(format!(
        "department_id={},position_id={},rank_id={},is_manager={}",
        facts.department_id, facts.position_id, rank, facts.is_manager
    ))
}

/// Builds the full transition outcome: the plan plus its audit event.
///
/// # Arguments
///
/// * `employee` - The employee being transitioned
/// * `current` - The employee's current interval, if any
/// * `request` - The requested assignment change
/// * `action_name` - The audit action name (e.g., "`RecordTransition`")
/// * `actor` - The actor performing this change
///
/// # Errors
///
/// Returns the same errors as [`plan_transition`].
pub fn build_transition_outcome(
    employee: &Employee,
    current: Option<&AssignmentInterval>,
    request: &TransitionRequest,
    action_name: &str,
    actor: Actor,
) -> Result<TransitionOutcome, CoreError> {
    let plan: TransitionPlan = plan_transition(employee, current, request)?;

    let before: StateSnapshot = current.map_or_else(
        StateSnapshot::unassigned,
        |interval| facts_snapshot(&interval.facts()),
    );
    let after: StateSnapshot = facts_snapshot(&request.facts);

    let action: Action = Action::new(
        action_name.to_string(),
        Some(format!(
            "employee {} effective {}",
            employee.employee_number, request.effective_date
        )),
    );
    let cause: Cause = Cause::new(
        format!("employee:{}", employee.employee_number),
        request.reason.clone(),
    );
    let audit_event: AuditEvent = AuditEvent::new(actor, cause, action, before, after);

    Ok(TransitionOutcome { plan, audit_event })
}
