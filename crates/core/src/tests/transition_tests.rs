// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::CoreError;
use crate::tests::helpers::{current_interval, date, test_actor, test_employee};
use crate::transition::{
    TransitionOutcome, TransitionPlan, TransitionRequest, build_transition_outcome,
    plan_transition,
};
use orghist_domain::{AssignmentFacts, DomainError, Employee};
use time::Month;

fn reassignment_request() -> TransitionRequest {
    TransitionRequest {
        facts: AssignmentFacts::new(2, 2, None, false),
        effective_date: date(2025, Month::March, 1),
        reason: String::from("transferred to platform team"),
        assigned_by: Some(String::from("hr-admin")),
    }
}

#[test]
fn test_transition_closes_previous_and_opens_replacement() {
    let employee: Employee = test_employee();
    let current = current_interval();

    let plan: TransitionPlan =
        plan_transition(&employee, Some(&current), &reassignment_request()).unwrap();

    let close = plan.close.unwrap();
    assert_eq!(close.interval_id, 10);
    assert_eq!(close.effective_end, date(2025, Month::February, 28));
    assert!(!close.same_day_correction);

    assert_eq!(plan.open.effective_start, date(2025, Month::March, 1));
    assert!(plan.open.effective_end.is_none());
    assert!(plan.open.is_current);
    assert_eq!(plan.open.department_id, 2);
    assert_eq!(plan.open.position_id, 2);
}

#[test]
fn test_first_assignment_has_nothing_to_close() {
    let employee: Employee = test_employee();
    let request = TransitionRequest {
        effective_date: date(2024, Month::January, 10),
        ..reassignment_request()
    };

    let plan: TransitionPlan = plan_transition(&employee, None, &request).unwrap();

    assert!(plan.close.is_none());
    assert_eq!(plan.open.effective_start, date(2024, Month::January, 10));
}

#[test]
fn test_first_assignment_before_hire_date_is_rejected() {
    let employee: Employee = test_employee();
    let request = TransitionRequest {
        effective_date: date(2024, Month::January, 9),
        ..reassignment_request()
    };

    let result = plan_transition(&employee, None, &request);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::TemporalOrderingViolation { .. }
        ))
    ));
}

#[test]
fn test_same_day_correction_closes_as_one_day_record() {
    let employee: Employee = test_employee();
    let current = current_interval();
    let request = TransitionRequest {
        effective_date: current.effective_start,
        ..reassignment_request()
    };

    let plan: TransitionPlan = plan_transition(&employee, Some(&current), &request).unwrap();

    let close = plan.close.unwrap();
    assert!(close.same_day_correction);
    assert_eq!(close.effective_end, current.effective_start);
    assert_eq!(plan.open.effective_start, current.effective_start);
}

#[test]
fn test_effective_date_before_current_start_is_rejected() {
    let employee: Employee = test_employee();
    let current = current_interval();
    let request = TransitionRequest {
        effective_date: date(2024, Month::January, 5),
        ..reassignment_request()
    };

    let result = plan_transition(&employee, Some(&current), &request);
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::TemporalOrderingViolation { .. }
        ))
    ));
}

#[test]
fn test_close_date_before_hire_date_is_rejected() {
    let mut employee: Employee = test_employee();
    // Hire date after the current interval's start: close would land
    // before employment began.
    employee.hire_date = date(2025, Month::June, 1);
    let mut current = current_interval();
    current.effective_start = date(2025, Month::June, 1);

    let request = TransitionRequest {
        effective_date: date(2025, Month::June, 1),
        ..reassignment_request()
    };
    // Same-day correction is still fine at the hire date itself.
    assert!(plan_transition(&employee, Some(&current), &request).is_ok());

    let request = TransitionRequest {
        effective_date: date(2025, Month::May, 20),
        ..reassignment_request()
    };
    assert!(plan_transition(&employee, Some(&current), &request).is_err());
}

#[test]
fn test_unpersisted_employee_is_an_internal_error() {
    let mut employee: Employee = test_employee();
    employee.employee_id = None;

    let result = plan_transition(&employee, None, &reassignment_request());
    assert!(matches!(result, Err(CoreError::Internal(_))));
}

#[test]
fn test_outcome_carries_audit_event_with_before_and_after() {
    let employee: Employee = test_employee();
    let current = current_interval();

    let outcome: TransitionOutcome = build_transition_outcome(
        &employee,
        Some(&current),
        &reassignment_request(),
        "RecordTransition",
        test_actor(),
    )
    .unwrap();

    assert_eq!(outcome.audit_event.action.name, "RecordTransition");
    assert_eq!(outcome.audit_event.actor.id, "hr-admin");
    assert_eq!(
        outcome.audit_event.cause.description,
        "transferred to platform team"
    );
    assert!(outcome.audit_event.before.data.contains("department_id=1"));
    assert!(outcome.audit_event.after.data.contains("department_id=2"));
}

#[test]
fn test_outcome_for_first_assignment_reports_unassigned_before() {
    let employee: Employee = test_employee();
    let request = TransitionRequest {
        effective_date: date(2024, Month::January, 10),
        ..reassignment_request()
    };

    let outcome: TransitionOutcome =
        build_transition_outcome(&employee, None, &request, "RecordTransition", test_actor())
            .unwrap();

    assert_eq!(outcome.audit_event.before.data, "unassigned");
}
