// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The bulk migration orchestrator.
//!
//! Applies an externally supplied target-state dataset against current
//! state, one employee at a time. Each employee's transition commits in
//! its own transaction; one record's failure is captured into the
//! report and never rolls back or aborts unrelated records. Consistency
//! violations (ambiguous baseline, multiple current intervals) are the
//! exception: they indicate corrupted state and abort the whole run.

use serde::{Deserialize, Serialize};
use time::Date;
use tracing::{info, warn};

use crate::error::{ApiError, translate_persistence_error};
use crate::handlers::{execute_transition, resolve_employee, resolve_facts};
use crate::{AuthenticatedActor, CancelFlag};
use orghist_audit::{Action, AuditEvent, Cause, StateSnapshot};
use orghist_domain::{AssignmentInterval, BASELINE_REASON, Employee};
use orghist_persistence::{Persistence, ResetOutcome};

/// One target record from the external loader: the desired assignment
/// for one employee.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetAssignment {
    /// The employee number.
    pub employee_number: String,
    /// The target department's code.
    pub department_code: String,
    /// The target position's code.
    pub position_code: String,
    /// The target rank's code, if any.
    pub rank_code: Option<String>,
    /// Whether the employee manages the department.
    pub is_manager: bool,
}

/// Policy for employees hired before the cutover that have no prior
/// interval when the current-period pass reaches them.
///
/// The distinction is deliberate and testable: these employees are a
/// data-quality signal (they should have been covered by the baseline
/// dataset), not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnmatchedHirePolicy {
    /// Silently count the record as skipped.
    Ignore,
    /// List the employee in the report's `unmatched` collection.
    #[default]
    Report,
}

/// Policy inputs for a migration run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MigrationPolicy {
    /// The fixed cutover date for the current-period pass. Effective
    /// dates are clamped forward to the hire date when an employee was
    /// hired later.
    pub cutover_date: Date,
    /// Handling of pre-cutover hires with no prior interval.
    pub unmatched_hires: UnmatchedHirePolicy,
}

impl MigrationPolicy {
    /// Creates a policy with the default unmatched-hire handling.
    #[must_use]
    pub const fn new(cutover_date: Date) -> Self {
        Self {
            cutover_date,
            unmatched_hires: UnmatchedHirePolicy::Report,
        }
    }
}

/// A per-record failure captured during a migration pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MigrationRecordError {
    /// The employee number of the failed record.
    pub employee_number: String,
    /// The failure message.
    pub message: String,
}

/// The accumulated result of one migration pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MigrationReport {
    /// Total records in the pass.
    pub total: usize,
    /// Records that produced a new interval.
    pub created: usize,
    /// Records skipped because the stored state already matched.
    pub skipped: usize,
    /// Employee numbers of pre-cutover hires with no prior interval
    /// (only populated under `UnmatchedHirePolicy::Report`).
    pub unmatched: Vec<String>,
    /// Whether the pass stopped early on cooperative cancellation.
    pub cancelled: bool,
    /// Per-record failures, in input order.
    pub errors: Vec<MigrationRecordError>,
}

impl MigrationReport {
    /// Creates an empty report for a pass over `total` records.
    #[must_use]
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    /// The number of failed records.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.errors.len()
    }
}

/// The aggregated result of a full migration run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FullMigrationReport {
    /// Row counts from the reset-to-baseline pass.
    pub reset: ResetOutcome,
    /// The baseline pass report.
    pub baseline: MigrationReport,
    /// The current-period pass report.
    pub current: MigrationReport,
}

/// The per-record outcome of a migration pass.
enum RecordOutcome {
    Created,
    Skipped,
    Unmatched,
}

/// Whether an error must abort the whole run rather than be isolated
/// to its record.
const fn is_fatal(err: &ApiError) -> bool {
    matches!(
        err,
        ApiError::ConsistencyViolation { .. } | ApiError::Internal { .. }
    )
}

/// Runs one migration pass over the targets, accumulating a report.
fn run_pass<F>(
    targets: &[TargetAssignment],
    cancel: &CancelFlag,
    pass_name: &str,
    mut migrate_record: F,
) -> Result<MigrationReport, ApiError>
where
    F: FnMut(&TargetAssignment) -> Result<RecordOutcome, ApiError>,
{
    info!(total = targets.len(), pass = pass_name, "Starting migration pass");
    let mut report = MigrationReport::new(targets.len());

    for target in targets {
        // Cooperative cancellation: finish the in-flight record's
        // transaction, then stop between per-employee units.
        if cancel.is_cancelled() {
            report.cancelled = true;
            warn!(pass = pass_name, "Migration pass cancelled");
            break;
        }

        match migrate_record(target) {
            Ok(RecordOutcome::Created) => report.created += 1,
            Ok(RecordOutcome::Skipped) => report.skipped += 1,
            Ok(RecordOutcome::Unmatched) => {
                report.unmatched.push(target.employee_number.clone());
            }
            Err(err) if is_fatal(&err) => return Err(err),
            Err(err) => {
                warn!(
                    pass = pass_name,
                    employee_number = %target.employee_number,
                    error = %err,
                    "Migration record failed"
                );
                report.errors.push(MigrationRecordError {
                    employee_number: target.employee_number.clone(),
                    message: err.to_string(),
                });
            }
        }
    }

    info!(
        pass = pass_name,
        total = report.total,
        created = report.created,
        skipped = report.skipped,
        unmatched = report.unmatched.len(),
        failed = report.failed(),
        cancelled = report.cancelled,
        "Migration pass finished"
    );
    Ok(report)
}

/// Runs the baseline migration pass.
///
/// For each target record, resolves the employee's baseline (seed)
/// interval. A baseline whose department, position, and manager flag
/// already match the target is left untouched and counted as skipped,
/// which makes repeated runs against unchanged data a no-op. Everything
/// else transitions at the employee's hire date.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `targets` - The externally loaded target records
/// * `actor` - The authenticated actor (must be Admin)
/// * `cancel` - Cooperative cancellation flag
///
/// # Errors
///
/// Returns an error if the actor lacks the Admin role or a consistency
/// violation (e.g., an ambiguous baseline) aborts the run. Per-record
/// failures are reported, not returned.
pub fn run_baseline_migration(
    persistence: &mut Persistence,
    targets: &[TargetAssignment],
    actor: &AuthenticatedActor,
    cancel: &CancelFlag,
) -> Result<MigrationReport, ApiError> {
    actor.require_admin("run_baseline_migration")?;

    run_pass(targets, cancel, "baseline", |target| {
        migrate_baseline_record(persistence, target, actor)
    })
}

/// Applies one baseline target record.
fn migrate_baseline_record(
    persistence: &mut Persistence,
    target: &TargetAssignment,
    actor: &AuthenticatedActor,
) -> Result<RecordOutcome, ApiError> {
    let employee: Employee = resolve_employee(persistence, &target.employee_number)?;
    let employee_id = employee.employee_id.ok_or_else(|| ApiError::Internal {
        message: String::from("employee loaded without an id"),
    })?;
    let facts = resolve_facts(
        persistence,
        &target.department_code,
        &target.position_code,
        target.rank_code.as_deref(),
        target.is_manager,
    )?;

    let baseline: Option<AssignmentInterval> = persistence
        .find_baseline_interval(employee_id)
        .map_err(translate_persistence_error)?;

    // The idempotency check compares department, position, and manager
    // flag, exactly as the seed data was cut.
    let matches_target = |stored: &AssignmentInterval| {
        let stored = stored.facts();
        stored.department_id == facts.department_id
            && stored.position_id == facts.position_id
            && stored.is_manager == facts.is_manager
    };

    if baseline.as_ref().is_some_and(&matches_target) {
        return Ok(RecordOutcome::Skipped);
    }

    // A current interval that already matches also counts as applied:
    // this is what keeps a re-run over the same dataset a no-op even
    // for employees whose seed record disagreed on the first run.
    let current: Option<AssignmentInterval> = persistence
        .find_current_interval(employee_id)
        .map_err(translate_persistence_error)?;
    if current.as_ref().is_some_and(&matches_target) {
        return Ok(RecordOutcome::Skipped);
    }

    // An employee with no history at all gets the seed record itself,
    // anchoring idempotency for later runs.
    let reason: String = if baseline.is_none() && current.is_none() {
        BASELINE_REASON.to_string()
    } else {
        String::from("baseline orgchart import")
    };

    execute_transition(
        persistence,
        &employee,
        facts,
        employee.hire_date,
        reason,
        "MigrateBaseline",
        actor,
    )?;
    Ok(RecordOutcome::Created)
}

/// Runs the current-period migration pass.
///
/// For each target record, computes the field-level diff against the
/// employee's current interval and transitions only when at least one
/// tracked field (department, position, rank, manager flag) changed.
/// Unchanged employees count as skipped. Employees with no current
/// interval are treated as new hires when hired on or after the
/// cutover; pre-cutover hires follow the policy's unmatched-hire
/// handling.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `targets` - The externally loaded target records
/// * `policy` - Cutover date and unmatched-hire handling
/// * `actor` - The authenticated actor (must be Admin)
/// * `cancel` - Cooperative cancellation flag
///
/// # Errors
///
/// Returns an error if the actor lacks the Admin role or a consistency
/// violation aborts the run. Per-record failures are reported, not
/// returned.
pub fn run_current_period_migration(
    persistence: &mut Persistence,
    targets: &[TargetAssignment],
    policy: MigrationPolicy,
    actor: &AuthenticatedActor,
    cancel: &CancelFlag,
) -> Result<MigrationReport, ApiError> {
    actor.require_admin("run_current_period_migration")?;

    run_pass(targets, cancel, "current-period", |target| {
        migrate_current_record(persistence, target, policy, actor)
    })
}

/// Applies one current-period target record.
fn migrate_current_record(
    persistence: &mut Persistence,
    target: &TargetAssignment,
    policy: MigrationPolicy,
    actor: &AuthenticatedActor,
) -> Result<RecordOutcome, ApiError> {
    let employee: Employee = resolve_employee(persistence, &target.employee_number)?;
    let employee_id = employee.employee_id.ok_or_else(|| ApiError::Internal {
        message: String::from("employee loaded without an id"),
    })?;
    let facts = resolve_facts(
        persistence,
        &target.department_code,
        &target.position_code,
        target.rank_code.as_deref(),
        target.is_manager,
    )?;

    // The cutover is the default effective date, clamped forward when
    // the employee was hired after it.
    let effective_date: Date = policy.cutover_date.max(employee.hire_date);

    let current: Option<AssignmentInterval> = persistence
        .find_current_interval(employee_id)
        .map_err(translate_persistence_error)?;

    match current {
        Some(current) => {
            let changed = current.facts().differs_from(&facts);
            if changed.is_empty() {
                return Ok(RecordOutcome::Skipped);
            }
            let fields: Vec<&str> = changed.iter().map(|field| field.as_str()).collect();
            execute_transition(
                persistence,
                &employee,
                facts,
                effective_date,
                format!("current period orgchart ({})", fields.join(", ")),
                "MigrateCurrent",
                actor,
            )?;
            Ok(RecordOutcome::Created)
        }
        None if employee.hire_date >= policy.cutover_date => {
            execute_transition(
                persistence,
                &employee,
                facts,
                effective_date,
                String::from("current period orgchart (new hire)"),
                "MigrateCurrent",
                actor,
            )?;
            Ok(RecordOutcome::Created)
        }
        None => match policy.unmatched_hires {
            UnmatchedHirePolicy::Ignore => Ok(RecordOutcome::Skipped),
            UnmatchedHirePolicy::Report => Ok(RecordOutcome::Unmatched),
        },
    }
}

/// Runs the full migration: reset to baseline, then the baseline pass,
/// then the current-period pass.
///
/// The reset is audited. Cancellation between passes is honored: a
/// cancelled baseline pass skips the current-period pass entirely.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `baseline_targets` - The baseline dataset
/// * `current_targets` - The current-period dataset
/// * `policy` - Cutover date and unmatched-hire handling
/// * `actor` - The authenticated actor (must be Admin)
/// * `cancel` - Cooperative cancellation flag
///
/// # Errors
///
/// Returns an error if the actor lacks the Admin role or a consistency
/// violation aborts the run.
pub fn run_full_migration(
    persistence: &mut Persistence,
    baseline_targets: &[TargetAssignment],
    current_targets: &[TargetAssignment],
    policy: MigrationPolicy,
    actor: &AuthenticatedActor,
    cancel: &CancelFlag,
) -> Result<FullMigrationReport, ApiError> {
    actor.require_admin("run_full_migration")?;

    let before_count: i64 = persistence
        .count_intervals()
        .map_err(translate_persistence_error)?;
    let reset: ResetOutcome = persistence
        .reset_history_to_baseline()
        .map_err(translate_persistence_error)?;
    let after_count: i64 = persistence
        .count_intervals()
        .map_err(translate_persistence_error)?;

    let reset_event = AuditEvent::new(
        actor.to_audit_actor(),
        Cause::new(
            String::from("migration:full"),
            String::from("reset history to baseline before migration"),
        ),
        Action::new(
            String::from("ResetHistory"),
            Some(format!(
                "deleted {} intervals, reopened {}",
                reset.deleted, reset.reopened
            )),
        ),
        StateSnapshot::new(format!("interval_count={before_count}")),
        StateSnapshot::new(format!("interval_count={after_count}")),
    );
    persistence
        .persist_audit_event(None, &reset_event)
        .map_err(translate_persistence_error)?;

    let baseline: MigrationReport =
        run_baseline_migration(persistence, baseline_targets, actor, cancel)?;

    let current: MigrationReport = if baseline.cancelled {
        let mut skipped_pass = MigrationReport::new(0);
        skipped_pass.cancelled = true;
        skipped_pass
    } else {
        run_current_period_migration(persistence, current_targets, policy, actor, cancel)?
    };

    info!(
        reset_deleted = reset.deleted,
        reset_reopened = reset.reopened,
        baseline_created = baseline.created,
        current_created = current.created,
        "Full migration finished"
    );

    Ok(FullMigrationReport {
        reset,
        baseline,
        current,
    })
}
