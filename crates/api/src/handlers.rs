// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation handlers for transitions, snapshots, diffs, termination,
//! and administrative history maintenance.

use time::Date;
use tracing::info;

use crate::AuthenticatedActor;
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::request_response::{
    AssignmentHistoryResponse, ClosedIntervalInfo, OrganizationDiffResponse,
    OrganizationSnapshotResponse, PurgeHistoryResponse, RecordTransitionRequest,
    RecordTransitionResponse, TerminateEmployeeRequest, TerminateEmployeeResponse,
};
use orghist::{
    AssignmentRecord, OrganizationSnapshot, TransitionOutcome, TransitionRequest, build_snapshot,
    build_transition_outcome, diff_snapshots,
};
use orghist_audit::{Action, AuditEvent, Cause, StateSnapshot};
use orghist_domain::{
    AssignmentFacts, AssignmentInterval, Department, DomainError, Employee, EmployeeNumber,
    TERMINATION_REASON,
};
use orghist_persistence::{PersistedTransition, Persistence};

/// Resolves an employee by employee number.
pub(crate) fn resolve_employee(
    persistence: &mut Persistence,
    employee_number: &str,
) -> Result<Employee, ApiError> {
    let number = EmployeeNumber::new(employee_number);
    persistence
        .find_employee_by_number(&number)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            translate_domain_error(DomainError::EmployeeNotFound {
                employee_number: number.value().to_string(),
            })
        })
}

/// Resolves the assignment facts named by code triplet.
pub(crate) fn resolve_facts(
    persistence: &mut Persistence,
    department_code: &str,
    position_code: &str,
    rank_code: Option<&str>,
    is_manager: bool,
) -> Result<AssignmentFacts, ApiError> {
    let department_code = department_code.trim().to_uppercase();
    let department = persistence
        .find_department_by_code(&department_code)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            translate_domain_error(DomainError::DepartmentNotFound {
                code: department_code.clone(),
            })
        })?;

    let position_code = position_code.trim().to_uppercase();
    let position = persistence
        .find_position_by_code(&position_code)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            translate_domain_error(DomainError::PositionNotFound {
                code: position_code.clone(),
            })
        })?;

    let rank_id: Option<i64> = match rank_code {
        None => None,
        Some(code) => {
            let code = code.trim().to_uppercase();
            let rank = persistence
                .find_rank_by_code(&code)
                .map_err(translate_persistence_error)?
                .ok_or_else(|| {
                    translate_domain_error(DomainError::RankNotFound { code: code.clone() })
                })?;
            rank.rank_id
        }
    };

    let department_id = department.department_id.ok_or_else(|| ApiError::Internal {
        message: String::from("department loaded without an id"),
    })?;
    let position_id = position.position_id.ok_or_else(|| ApiError::Internal {
        message: String::from("position loaded without an id"),
    })?;

    Ok(AssignmentFacts::new(
        department_id,
        position_id,
        rank_id,
        is_manager,
    ))
}

/// Plans and atomically applies one transition for an employee.
pub(crate) fn execute_transition(
    persistence: &mut Persistence,
    employee: &Employee,
    facts: AssignmentFacts,
    effective_date: Date,
    reason: String,
    action_name: &str,
    actor: &AuthenticatedActor,
) -> Result<(TransitionOutcome, PersistedTransition), ApiError> {
    let employee_id = employee.employee_id.ok_or_else(|| ApiError::Internal {
        message: String::from("employee loaded without an id"),
    })?;

    let current: Option<AssignmentInterval> = persistence
        .find_current_interval(employee_id)
        .map_err(translate_persistence_error)?;

    let request = TransitionRequest {
        facts,
        effective_date,
        reason,
        assigned_by: Some(actor.id.clone()),
    };
    let outcome: TransitionOutcome = build_transition_outcome(
        employee,
        current.as_ref(),
        &request,
        action_name,
        actor.to_audit_actor(),
    )
    .map_err(translate_core_error)?;

    let persisted: PersistedTransition = persistence
        .apply_transition(&outcome)
        .map_err(translate_persistence_error)?;

    Ok((outcome, persisted))
}

/// Records an assignment transition for one employee.
///
/// Closes the current interval (when present) and opens the
/// replacement atomically, recording an audit event in the same
/// transaction.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The transition request
/// * `actor` - The authenticated actor performing the change
///
/// # Errors
///
/// Returns an error if the employee/department/position/rank cannot be
/// resolved, the effective date violates temporal ordering, or stored
/// state is inconsistent.
pub fn record_transition(
    persistence: &mut Persistence,
    request: &RecordTransitionRequest,
    actor: &AuthenticatedActor,
) -> Result<RecordTransitionResponse, ApiError> {
    let employee = resolve_employee(persistence, &request.employee_number)?;
    let facts = resolve_facts(
        persistence,
        &request.department_code,
        &request.position_code,
        request.rank_code.as_deref(),
        request.is_manager,
    )?;

    let (outcome, persisted) = execute_transition(
        persistence,
        &employee,
        facts,
        request.effective_date,
        request.reason.clone(),
        "RecordTransition",
        actor,
    )?;

    info!(
        employee_number = %employee.employee_number,
        interval_id = persisted.interval_id,
        effective_date = %request.effective_date,
        "Recorded assignment transition"
    );

    Ok(RecordTransitionResponse {
        employee_number: employee.employee_number.value().to_string(),
        interval_id: persisted.interval_id,
        event_id: persisted.event_id,
        effective_start: outcome.plan.open.effective_start,
        closed_previous: outcome.plan.close.map(|close| ClosedIntervalInfo {
            interval_id: close.interval_id,
            effective_end: close.effective_end,
            same_day_correction: close.same_day_correction,
        }),
    })
}

/// Reconstructs the organization snapshot valid at a reference date.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `reference_date` - The reference date
///
/// # Errors
///
/// Returns an error if the department hierarchy is cyclic or the
/// database cannot be queried. An unresolvable root is not an error:
/// the snapshot degrades to a synthetic root with a logged warning.
pub fn get_organization_snapshot(
    persistence: &mut Persistence,
    reference_date: Date,
) -> Result<OrganizationSnapshotResponse, ApiError> {
    let rows: Vec<AssignmentRecord> = persistence
        .assignments_valid_on(reference_date)
        .map_err(translate_persistence_error)?;
    let departments = persistence
        .list_departments()
        .map_err(translate_persistence_error)?;
    let designated_root = persistence
        .find_designated_root()
        .map_err(translate_persistence_error)?;

    let snapshot: OrganizationSnapshot = build_snapshot(
        reference_date,
        &rows,
        &departments,
        designated_root.as_ref(),
    )
    .map_err(translate_core_error)?;

    info!(
        reference_date = %reference_date,
        total_departments = snapshot.total_departments,
        total_employees = snapshot.total_employees,
        root_resolution = snapshot.root_resolution.as_str(),
        "Reconstructed organization snapshot"
    );

    Ok(OrganizationSnapshotResponse {
        reference_date,
        total_departments: snapshot.total_departments,
        total_employees: snapshot.total_employees,
        root_resolution: snapshot.root_resolution.as_str().to_string(),
        organization: snapshot.organization,
    })
}

/// Diffs the organization between two reference dates.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `earlier_date` - The earlier reference date
/// * `later_date` - The later reference date
///
/// # Errors
///
/// Returns an error if the database cannot be queried.
pub fn diff_organization(
    persistence: &mut Persistence,
    earlier_date: Date,
    later_date: Date,
) -> Result<OrganizationDiffResponse, ApiError> {
    let earlier = persistence
        .assignments_valid_on(earlier_date)
        .map_err(translate_persistence_error)?;
    let later = persistence
        .assignments_valid_on(later_date)
        .map_err(translate_persistence_error)?;

    let report = diff_snapshots(&earlier, &later);

    info!(
        earlier_date = %earlier_date,
        later_date = %later_date,
        total_changes = report.total_changes,
        joined = report.joined.len(),
        departed = report.departed.len(),
        "Diffed organization snapshots"
    );

    Ok(OrganizationDiffResponse {
        earlier_date,
        later_date,
        report,
    })
}

/// Terminates an employee: routes the current assignment into the
/// terminated exception department and records the termination date on
/// the employee row.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The termination request
/// * `actor` - The authenticated actor performing the change
///
/// # Errors
///
/// Returns an error if the termination date is not strictly after the
/// hire date, the employee has no assignment, or the terminated
/// department is missing.
pub fn terminate_employee(
    persistence: &mut Persistence,
    request: &TerminateEmployeeRequest,
    actor: &AuthenticatedActor,
) -> Result<TerminateEmployeeResponse, ApiError> {
    let employee = resolve_employee(persistence, &request.employee_number)?;
    let employee_id = employee.employee_id.ok_or_else(|| ApiError::Internal {
        message: String::from("employee loaded without an id"),
    })?;

    if request.termination_date <= employee.hire_date {
        return Err(translate_domain_error(
            DomainError::TemporalOrderingViolation {
                employee_id,
                attempted: request.termination_date,
                bound: employee.hire_date,
                detail: String::from("the hire date (termination must be after hire)"),
            },
        ));
    }

    let terminated: Department = persistence
        .find_terminated_department()
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            translate_domain_error(DomainError::DepartmentNotFound {
                code: Department::TERMINATED_CODE.to_string(),
            })
        })?;
    let terminated_id = terminated.department_id.ok_or_else(|| ApiError::Internal {
        message: String::from("department loaded without an id"),
    })?;

    // The terminated interval keeps the employee's last position so
    // history reads remain joinable.
    let current = persistence
        .find_current_interval(employee_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| {
            translate_domain_error(DomainError::NoAssignment {
                employee_number: employee.employee_number.value().to_string(),
            })
        })?;

    let facts = AssignmentFacts::new(terminated_id, current.position_id, None, false);
    let reason = request
        .reason
        .clone()
        .unwrap_or_else(|| TERMINATION_REASON.to_string());

    let (_, persisted) = execute_transition(
        persistence,
        &employee,
        facts,
        request.termination_date,
        reason,
        "TerminateEmployee",
        actor,
    )?;

    persistence
        .record_termination(employee_id, request.termination_date)
        .map_err(translate_persistence_error)?;

    info!(
        employee_number = %employee.employee_number,
        termination_date = %request.termination_date,
        "Terminated employee"
    );

    Ok(TerminateEmployeeResponse {
        employee_number: employee.employee_number.value().to_string(),
        termination_date: request.termination_date,
        interval_id: persisted.interval_id,
        event_id: persisted.event_id,
    })
}

/// Purges an employee's entire assignment history.
///
/// Admin-only. Intervals are closed, never deleted, under normal
/// operation; this is the explicit administrative escape hatch, and it
/// is audited.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `employee_number` - The employee number
/// * `actor` - The authenticated actor (must be Admin)
///
/// # Errors
///
/// Returns an error if the actor lacks the Admin role or the employee
/// does not exist.
pub fn purge_employee_history(
    persistence: &mut Persistence,
    employee_number: &str,
    actor: &AuthenticatedActor,
) -> Result<PurgeHistoryResponse, ApiError> {
    actor.require_admin("purge_employee_history")?;

    let employee = resolve_employee(persistence, employee_number)?;
    let employee_id = employee.employee_id.ok_or_else(|| ApiError::Internal {
        message: String::from("employee loaded without an id"),
    })?;

    let purged: usize = persistence
        .purge_history(employee_id)
        .map_err(translate_persistence_error)?;

    let event = AuditEvent::new(
        actor.to_audit_actor(),
        Cause::new(
            format!("employee:{}", employee.employee_number),
            String::from("administrative history purge"),
        ),
        Action::new(
            String::from("PurgeHistory"),
            Some(format!("employee {}", employee.employee_number)),
        ),
        StateSnapshot::new(format!("interval_count={purged}")),
        StateSnapshot::new(String::from("interval_count=0")),
    );
    let event_id: i64 = persistence
        .persist_audit_event(Some(employee_id), &event)
        .map_err(translate_persistence_error)?;

    info!(
        employee_number = %employee.employee_number,
        purged,
        "Purged assignment history"
    );

    Ok(PurgeHistoryResponse {
        employee_number: employee.employee_number.value().to_string(),
        purged,
        event_id,
    })
}

/// Returns an employee's full assignment timeline.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `employee_number` - The employee number
///
/// # Errors
///
/// Returns an error if the employee does not exist or the database
/// cannot be queried.
pub fn get_assignment_history(
    persistence: &mut Persistence,
    employee_number: &str,
) -> Result<AssignmentHistoryResponse, ApiError> {
    let employee = resolve_employee(persistence, employee_number)?;
    let employee_id = employee.employee_id.ok_or_else(|| ApiError::Internal {
        message: String::from("employee loaded without an id"),
    })?;

    let intervals = persistence
        .list_intervals_for_employee(employee_id)
        .map_err(translate_persistence_error)?;

    Ok(AssignmentHistoryResponse {
        employee_number: employee.employee_number.value().to_string(),
        intervals,
    })
}
