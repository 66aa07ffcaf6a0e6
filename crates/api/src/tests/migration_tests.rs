// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{admin, date, operator, seed, target};
use crate::{
    ApiError, CancelFlag, MigrationPolicy, UnmatchedHirePolicy, get_assignment_history,
    run_baseline_migration, run_current_period_migration, run_full_migration,
};
use orghist_domain::{AssignmentFacts, AssignmentInterval, BASELINE_REASON};
use time::Month;

fn policy() -> MigrationPolicy {
    MigrationPolicy::new(date(2025, Month::December, 1))
}

#[test]
fn test_baseline_migration_requires_admin() {
    let mut ctx = seed();
    let result = run_baseline_migration(&mut ctx.persistence, &[], &operator(), &CancelFlag::new());
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_baseline_migration_creates_at_hire_date() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));

    let report = run_baseline_migration(
        &mut ctx.persistence,
        &[target("E-1001", "ENG", "STAFF", false)],
        &admin(),
        &CancelFlag::new(),
    )
    .unwrap();

    assert_eq!(report.total, 1);
    assert_eq!(report.created, 1);
    assert_eq!(report.skipped, 0);
    assert_eq!(report.failed(), 0);

    let history = get_assignment_history(&mut ctx.persistence, "E-1001").unwrap();
    assert_eq!(history.intervals.len(), 1);
    assert_eq!(
        history.intervals[0].effective_start,
        date(2024, Month::January, 10)
    );
    // The first-ever record becomes the seed, anchoring idempotency.
    assert_eq!(history.intervals[0].reason, BASELINE_REASON);
}

#[test]
fn test_matching_baseline_is_skipped() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));

    let targets = [target("E-1001", "ENG", "STAFF", false)];
    run_baseline_migration(&mut ctx.persistence, &targets, &admin(), &CancelFlag::new()).unwrap();

    let report =
        run_baseline_migration(&mut ctx.persistence, &targets, &admin(), &CancelFlag::new())
            .unwrap();

    assert_eq!(report.created, 0);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed(), 0);
    assert_eq!(
        get_assignment_history(&mut ctx.persistence, "E-1001")
            .unwrap()
            .intervals
            .len(),
        1
    );
}

#[test]
fn test_migration_is_idempotent_after_a_differing_baseline() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));

    // Seed a baseline that disagrees with the target dataset.
    run_baseline_migration(
        &mut ctx.persistence,
        &[target("E-1001", "SALES", "STAFF", false)],
        &admin(),
        &CancelFlag::new(),
    )
    .unwrap();

    let targets = [target("E-1001", "ENG", "LEAD", false)];
    let first =
        run_baseline_migration(&mut ctx.persistence, &targets, &admin(), &CancelFlag::new())
            .unwrap();
    assert_eq!(first.created, 1);

    // The second run over the same targets creates nothing.
    let second =
        run_baseline_migration(&mut ctx.persistence, &targets, &admin(), &CancelFlag::new())
            .unwrap();
    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 1);
}

#[test]
fn test_per_record_errors_do_not_abort_the_run() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));
    ctx.hire("E-1003", "Park Dana", date(2024, Month::March, 1));

    let report = run_baseline_migration(
        &mut ctx.persistence,
        &[
            target("E-1001", "ENG", "STAFF", false),
            target("E-9999", "ENG", "STAFF", false),
            target("E-1003", "SALES", "STAFF", false),
        ],
        &admin(),
        &CancelFlag::new(),
    )
    .unwrap();

    assert_eq!(report.created, 2);
    assert_eq!(report.failed(), 1);
    assert_eq!(report.errors[0].employee_number, "E-9999");
}

#[test]
fn test_ambiguous_baseline_aborts_the_run() {
    let mut ctx = seed();
    let employee = ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));
    let employee_id = employee.employee_id.unwrap();
    let eng = ctx
        .persistence
        .find_department_by_code("ENG")
        .unwrap()
        .unwrap()
        .department_id
        .unwrap();
    let staff = ctx
        .persistence
        .find_position_by_code("STAFF")
        .unwrap()
        .unwrap()
        .position_id
        .unwrap();

    // Two seed records: the idempotency anchor is ambiguous.
    for (start, current) in [
        (date(2024, Month::January, 10), false),
        (date(2024, Month::June, 1), true),
    ] {
        let mut interval = AssignmentInterval::open(
            employee_id,
            AssignmentFacts::new(eng, staff, None, false),
            start,
            String::from(BASELINE_REASON),
            None,
        );
        interval.is_current = current;
        if !current {
            interval.effective_end = Some(date(2024, Month::May, 31));
        }
        ctx.persistence.insert_interval(&interval).unwrap();
    }

    let result = run_baseline_migration(
        &mut ctx.persistence,
        &[target("E-1001", "ENG", "STAFF", false)],
        &admin(),
        &CancelFlag::new(),
    );
    assert!(matches!(result, Err(ApiError::ConsistencyViolation { .. })));
}

#[test]
fn test_current_period_pass_skips_unchanged_employees() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));
    ctx.assign("E-1001", "ENG", "STAFF", date(2024, Month::January, 10));

    let report = run_current_period_migration(
        &mut ctx.persistence,
        &[target("E-1001", "ENG", "STAFF", false)],
        policy(),
        &admin(),
        &CancelFlag::new(),
    )
    .unwrap();

    assert_eq!(report.created, 0);
    assert_eq!(report.skipped, 1);
}

#[test]
fn test_current_period_pass_transitions_changed_employees_at_cutover() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));
    ctx.assign("E-1001", "ENG", "STAFF", date(2024, Month::January, 10));

    let report = run_current_period_migration(
        &mut ctx.persistence,
        &[target("E-1001", "SALES", "STAFF", true)],
        policy(),
        &admin(),
        &CancelFlag::new(),
    )
    .unwrap();
    assert_eq!(report.created, 1);

    let history = get_assignment_history(&mut ctx.persistence, "E-1001").unwrap();
    let current = history.intervals.iter().find(|i| i.is_current).unwrap();
    assert_eq!(current.effective_start, date(2025, Month::December, 1));
    assert!(current.is_manager);
    assert!(current.reason.contains("department"));
    assert!(current.reason.contains("manager"));

    let closed = history.intervals.iter().find(|i| !i.is_current).unwrap();
    assert_eq!(closed.effective_end, Some(date(2025, Month::November, 30)));
}

#[test]
fn test_current_period_pass_clamps_effective_date_to_late_hire() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2025, Month::December, 15));

    let report = run_current_period_migration(
        &mut ctx.persistence,
        &[target("E-1001", "ENG", "STAFF", false)],
        policy(),
        &admin(),
        &CancelFlag::new(),
    )
    .unwrap();
    assert_eq!(report.created, 1);

    let history = get_assignment_history(&mut ctx.persistence, "E-1001").unwrap();
    assert_eq!(
        history.intervals[0].effective_start,
        date(2025, Month::December, 15)
    );
    assert!(history.intervals[0].reason.contains("new hire"));
}

#[test]
fn test_unmatched_pre_cutover_hires_follow_policy() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));

    let targets = [target("E-1001", "ENG", "STAFF", false)];

    let reported = run_current_period_migration(
        &mut ctx.persistence,
        &targets,
        policy(),
        &admin(),
        &CancelFlag::new(),
    )
    .unwrap();
    assert_eq!(reported.created, 0);
    assert_eq!(reported.unmatched, vec![String::from("E-1001")]);

    let mut ignore_policy = policy();
    ignore_policy.unmatched_hires = UnmatchedHirePolicy::Ignore;
    let ignored = run_current_period_migration(
        &mut ctx.persistence,
        &targets,
        ignore_policy,
        &admin(),
        &CancelFlag::new(),
    )
    .unwrap();
    assert_eq!(ignored.skipped, 1);
    assert!(ignored.unmatched.is_empty());
}

#[test]
fn test_cancellation_stops_between_records() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));

    let cancel = CancelFlag::new();
    cancel.cancel();

    let report = run_baseline_migration(
        &mut ctx.persistence,
        &[target("E-1001", "ENG", "STAFF", false)],
        &admin(),
        &cancel,
    )
    .unwrap();

    assert!(report.cancelled);
    assert_eq!(report.created, 0);
    assert!(
        get_assignment_history(&mut ctx.persistence, "E-1001")
            .unwrap()
            .intervals
            .is_empty()
    );
}

#[test]
fn test_full_migration_resets_then_runs_both_passes() {
    let mut ctx = seed();
    ctx.hire("E-1001", "Kim Minsoo", date(2024, Month::January, 10));

    // Seed a baseline plus later noise that the reset must clear.
    run_baseline_migration(
        &mut ctx.persistence,
        &[target("E-1001", "ENG", "STAFF", false)],
        &admin(),
        &CancelFlag::new(),
    )
    .unwrap();
    ctx.assign("E-1001", "SALES", "STAFF", date(2025, Month::June, 1));

    let report = run_full_migration(
        &mut ctx.persistence,
        &[target("E-1001", "ENG", "STAFF", false)],
        &[target("E-1001", "SALES", "LEAD", false)],
        policy(),
        &admin(),
        &CancelFlag::new(),
    )
    .unwrap();

    assert_eq!(report.reset.deleted, 1);
    assert_eq!(report.reset.reopened, 1);
    assert_eq!(report.baseline.skipped, 1);
    assert_eq!(report.current.created, 1);

    let history = get_assignment_history(&mut ctx.persistence, "E-1001").unwrap();
    assert_eq!(history.intervals.len(), 2);
    let current = history.intervals.iter().find(|i| i.is_current).unwrap();
    assert_eq!(current.effective_start, date(2025, Month::December, 1));

    let events = ctx.persistence.list_audit_events().unwrap();
    assert!(events.iter().any(|e| e.action.name == "ResetHistory"));
}

#[test]
fn test_full_migration_requires_admin() {
    let mut ctx = seed();
    let result = run_full_migration(
        &mut ctx.persistence,
        &[],
        &[],
        policy(),
        &operator(),
        &CancelFlag::new(),
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}
