// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::interval::AssignmentInterval;
use crate::types::{Department, Employee};

/// Validates that an employee's basic field constraints are met.
///
/// This function checks field shape only. It does NOT check uniqueness
/// (that requires context).
///
/// # Arguments
///
/// * `employee` - The employee to validate
///
/// # Errors
///
/// Returns an error if:
/// - The employee number is empty
/// - The name is empty
/// - The termination date is on or before the hire date
pub fn validate_employee_fields(employee: &Employee) -> Result<(), DomainError> {
    // Rule: employee number must not be empty
    if employee.employee_number.value().is_empty() {
        return Err(DomainError::InvalidEmployeeNumber(String::from(
            "Employee number cannot be empty",
        )));
    }

    // Rule: name must not be empty
    if employee.name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }

    // Rule: termination must be strictly after hire
    if let (Some(employee_id), Some(termination)) =
        (employee.employee_id, employee.termination_date)
        && termination <= employee.hire_date
    {
        return Err(DomainError::TemporalOrderingViolation {
            employee_id,
            attempted: termination,
            bound: employee.hire_date,
            detail: String::from("the hire date (termination must be after hire)"),
        });
    }

    Ok(())
}

/// Validates that a department's basic field constraints are met.
///
/// # Arguments
///
/// * `department` - The department to validate
///
/// # Errors
///
/// Returns an error if the code or name is empty.
pub fn validate_department_fields(department: &Department) -> Result<(), DomainError> {
    if department.code.is_empty() {
        return Err(DomainError::InvalidDepartmentCode(String::from(
            "Department code cannot be empty",
        )));
    }
    if department.name.is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Department name cannot be empty",
        )));
    }
    Ok(())
}

/// Validates that an interval's own bounds are coherent.
///
/// A closed interval must not end before it starts. An interval spanning
/// exactly one day is permitted only as a same-day transition record
/// (closed, not current).
///
/// # Arguments
///
/// * `interval` - The interval to validate
///
/// # Errors
///
/// Returns an error if the end date precedes the start date, or if a
/// one-day interval is still marked current.
pub fn validate_interval_bounds(interval: &AssignmentInterval) -> Result<(), DomainError> {
    if let Some(end) = interval.effective_end {
        if end < interval.effective_start {
            return Err(DomainError::NegativeLengthInterval {
                employee_id: interval.employee_id,
                start: interval.effective_start,
                end,
            });
        }
        if end == interval.effective_start && interval.is_current {
            return Err(DomainError::OverlappingIntervals {
                employee_id: interval.employee_id,
                first_start: interval.effective_start,
                second_start: interval.effective_start,
            });
        }
    }
    Ok(())
}

/// Validates that no two intervals of one employee's timeline intersect.
///
/// An absent end date is treated as extending to positive infinity.
/// One permitted exception: a closed one-day record whose start and end
/// equal its successor's start (a same-day correction) does not count as
/// an overlap.
///
/// This function is pure, deterministic, and has no side effects.
///
/// # Arguments
///
/// * `intervals` - The employee's intervals, in any order
///
/// # Errors
///
/// Returns `DomainError::OverlappingIntervals` for the first
/// intersecting pair found.
pub fn validate_no_overlap(intervals: &[AssignmentInterval]) -> Result<(), DomainError> {
    let mut sorted: Vec<&AssignmentInterval> = intervals.iter().collect();
    sorted.sort_by_key(|interval| interval.effective_start);

    for pair in sorted.windows(2) {
        let (earlier, later) = (pair[0], pair[1]);
        if !earlier.overlaps(later) {
            continue;
        }
        // A same-day correction leaves a one-day record sharing its
        // successor's start date.
        if earlier.is_same_day_record() && earlier.effective_start == later.effective_start {
            continue;
        }
        return Err(DomainError::OverlappingIntervals {
            employee_id: earlier.employee_id,
            first_start: earlier.effective_start,
            second_start: later.effective_start,
        });
    }
    Ok(())
}

/// Validates that exactly one interval is current, and that the current
/// interval is open-ended.
///
/// An empty timeline is valid: an employee who was never assigned (or
/// whose history was purged) has no current interval.
///
/// # Arguments
///
/// * `intervals` - The employee's intervals, in any order
///
/// # Errors
///
/// Returns `DomainError::MultipleCurrentIntervals` if more than one
/// interval is current, or `DomainError::NoAssignment`-adjacent
/// violations are left to the caller. A current interval carrying an end
/// date earlier than its start is reported via
/// `DomainError::NegativeLengthInterval` by bound validation, not here.
pub fn validate_single_current(intervals: &[AssignmentInterval]) -> Result<(), DomainError> {
    let current: Vec<&AssignmentInterval> = intervals
        .iter()
        .filter(|interval| interval.is_current)
        .collect();

    if intervals.is_empty() {
        return Ok(());
    }

    match current.len() {
        1 => Ok(()),
        count => {
            let employee_id = intervals[0].employee_id;
            Err(DomainError::MultipleCurrentIntervals { employee_id, count })
        }
    }
}
