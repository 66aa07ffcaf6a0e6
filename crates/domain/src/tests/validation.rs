// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::tests::{closed_interval, date, open_interval};
use crate::types::{Employee, EmployeeNumber, EmployeeStatus};
use crate::validation::{
    validate_employee_fields, validate_interval_bounds, validate_no_overlap,
    validate_single_current,
};
use time::Month;

#[test]
fn test_valid_timeline_passes_overlap_check() {
    let intervals = vec![
        closed_interval(date(2024, Month::January, 10), date(2025, Month::February, 28)),
        open_interval(date(2025, Month::March, 1)),
    ];
    assert!(validate_no_overlap(&intervals).is_ok());
}

#[test]
fn test_overlapping_timeline_is_rejected() {
    let intervals = vec![
        closed_interval(date(2024, Month::January, 10), date(2025, Month::March, 15)),
        open_interval(date(2025, Month::March, 1)),
    ];
    assert!(matches!(
        validate_no_overlap(&intervals),
        Err(DomainError::OverlappingIntervals { .. })
    ));
}

#[test]
fn test_overlap_check_handles_unsorted_input() {
    let intervals = vec![
        open_interval(date(2025, Month::March, 1)),
        closed_interval(date(2024, Month::January, 10), date(2025, Month::February, 28)),
    ];
    assert!(validate_no_overlap(&intervals).is_ok());
}

#[test]
fn test_same_day_correction_record_is_not_an_overlap() {
    // A same-day correction leaves a closed one-day record sharing the
    // replacement's start date.
    let correction = closed_interval(date(2025, Month::March, 1), date(2025, Month::March, 1));
    let replacement = open_interval(date(2025, Month::March, 1));
    assert!(validate_no_overlap(&[correction, replacement]).is_ok());
}

#[test]
fn test_one_day_record_not_sharing_successor_start_still_overlaps() {
    let record = closed_interval(date(2025, Month::March, 2), date(2025, Month::March, 2));
    let open = open_interval(date(2025, Month::March, 1));
    assert!(matches!(
        validate_no_overlap(&[open, record]),
        Err(DomainError::OverlappingIntervals { .. })
    ));
}

#[test]
fn test_single_current_accepts_one_current() {
    let intervals = vec![
        closed_interval(date(2024, Month::January, 10), date(2025, Month::February, 28)),
        open_interval(date(2025, Month::March, 1)),
    ];
    assert!(validate_single_current(&intervals).is_ok());
}

#[test]
fn test_single_current_accepts_empty_timeline() {
    assert!(validate_single_current(&[]).is_ok());
}

#[test]
fn test_multiple_currents_are_rejected() {
    let intervals = vec![
        open_interval(date(2024, Month::January, 10)),
        open_interval(date(2025, Month::March, 1)),
    ];
    assert!(matches!(
        validate_single_current(&intervals),
        Err(DomainError::MultipleCurrentIntervals { count: 2, .. })
    ));
}

#[test]
fn test_zero_currents_on_nonempty_timeline_are_rejected() {
    let intervals = vec![closed_interval(
        date(2024, Month::January, 10),
        date(2025, Month::February, 28),
    )];
    assert!(matches!(
        validate_single_current(&intervals),
        Err(DomainError::MultipleCurrentIntervals { count: 0, .. })
    ));
}

#[test]
fn test_interval_bounds_reject_negative_length() {
    let interval = closed_interval(date(2025, Month::March, 1), date(2025, Month::February, 28));
    assert!(matches!(
        validate_interval_bounds(&interval),
        Err(DomainError::NegativeLengthInterval { .. })
    ));
}

#[test]
fn test_interval_bounds_accept_same_day_record() {
    let interval = closed_interval(date(2025, Month::March, 1), date(2025, Month::March, 1));
    assert!(validate_interval_bounds(&interval).is_ok());
}

#[test]
fn test_interval_bounds_reject_current_one_day_interval() {
    let mut interval = open_interval(date(2025, Month::March, 1));
    interval.effective_end = Some(date(2025, Month::March, 1));
    assert!(validate_interval_bounds(&interval).is_err());
}

#[test]
fn test_employee_fields_reject_termination_before_hire() {
    let employee: Employee = Employee::with_id(
        1,
        EmployeeNumber::new("E-1042"),
        String::from("Kim Minsoo"),
        date(2024, Month::January, 10),
        Some(date(2024, Month::January, 10)),
        EmployeeStatus::Terminated,
    );
    assert!(matches!(
        validate_employee_fields(&employee),
        Err(DomainError::TemporalOrderingViolation { .. })
    ));
}

#[test]
fn test_employee_fields_accept_valid_employee() {
    let employee: Employee = Employee::new(
        EmployeeNumber::new("E-1042"),
        String::from("Kim Minsoo"),
        date(2024, Month::January, 10),
    );
    assert!(validate_employee_fields(&employee).is_ok());
}

#[test]
fn test_employee_fields_reject_empty_number() {
    let employee: Employee = Employee::new(
        EmployeeNumber::new("   "),
        String::from("Kim Minsoo"),
        date(2024, Month::January, 10),
    );
    assert!(matches!(
        validate_employee_fields(&employee),
        Err(DomainError::InvalidEmployeeNumber(_))
    ));
}
