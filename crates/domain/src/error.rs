// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Date;

/// Errors that can occur during domain validation.
///
/// Invariant violations (`MultipleCurrentIntervals`,
/// `OverlappingIntervals`, `DepartmentCycle`, `AmbiguousBaseline`)
/// indicate corrupted state rather than bad input and must stop the
/// enclosing operation; the other variants are ordinary input errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Employee does not exist.
    EmployeeNotFound {
        /// The employee number that was looked up.
        employee_number: String,
    },
    /// Department does not exist.
    DepartmentNotFound {
        /// The department code that was looked up.
        code: String,
    },
    /// Position does not exist.
    PositionNotFound {
        /// The position code that was looked up.
        code: String,
    },
    /// Rank does not exist.
    RankNotFound {
        /// The rank code that was looked up.
        code: String,
    },
    /// The employee has no assignment interval at all.
    NoAssignment {
        /// The employee number.
        employee_number: String,
    },
    /// Employee number already exists.
    DuplicateEmployeeNumber(String),
    /// Employee number is empty or invalid.
    InvalidEmployeeNumber(String),
    /// Employee name is empty or invalid.
    InvalidName(String),
    /// Department code is empty or invalid.
    InvalidDepartmentCode(String),
    /// Employment status string is not recognized.
    InvalidEmployeeStatus(String),
    /// Department kind string is not recognized.
    InvalidDepartmentKind(String),
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
        /// The parsing error message.
        error: String,
    },
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
    /// A new effective date precedes existing interval bounds or the
    /// employee's hire date. Never auto-corrected.
    TemporalOrderingViolation {
        /// The affected employee.
        employee_id: i64,
        /// The effective date that was attempted.
        attempted: Date,
        /// The bound the attempted date must not precede.
        bound: Date,
        /// What the bound represents.
        detail: String,
    },
    /// More than one current interval exists for an employee. Corrupted
    /// state; fatal.
    MultipleCurrentIntervals {
        /// The affected employee.
        employee_id: i64,
        /// How many current intervals were found.
        count: usize,
    },
    /// Two intervals of the same employee intersect. Corrupted state;
    /// fatal.
    OverlappingIntervals {
        /// The affected employee.
        employee_id: i64,
        /// Start date of the earlier interval.
        first_start: Date,
        /// Start date of the later interval.
        second_start: Date,
    },
    /// An interval ends before it starts.
    NegativeLengthInterval {
        /// The affected employee.
        employee_id: i64,
        /// The interval's start date.
        start: Date,
        /// The interval's end date.
        end: Date,
    },
    /// A department's parent chain loops back on itself. Corrupted
    /// configuration; fatal.
    DepartmentCycle {
        /// The department at which the cycle was detected.
        department_id: i64,
    },
    /// More than one baseline interval exists for an employee. Fatal in
    /// batch contexts.
    AmbiguousBaseline {
        /// The affected employee.
        employee_id: i64,
        /// How many baseline intervals were found.
        count: usize,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmployeeNotFound { employee_number } => {
                write!(f, "Employee '{employee_number}' not found")
            }
            Self::DepartmentNotFound { code } => {
                write!(f, "Department '{code}' not found")
            }
            Self::PositionNotFound { code } => {
                write!(f, "Position '{code}' not found")
            }
            Self::RankNotFound { code } => {
                write!(f, "Rank '{code}' not found")
            }
            Self::NoAssignment { employee_number } => {
                write!(f, "Employee '{employee_number}' has no assignment history")
            }
            Self::DuplicateEmployeeNumber(number) => {
                write!(f, "Employee number '{number}' already exists")
            }
            Self::InvalidEmployeeNumber(msg) => write!(f, "Invalid employee number: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidDepartmentCode(msg) => write!(f, "Invalid department code: {msg}"),
            Self::InvalidEmployeeStatus(msg) => write!(f, "Invalid employee status: {msg}"),
            Self::InvalidDepartmentKind(msg) => write!(f, "Invalid department kind: {msg}"),
            Self::DateParseError { date_string, error } => {
                write!(f, "Failed to parse date '{date_string}': {error}")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
            Self::TemporalOrderingViolation {
                employee_id,
                attempted,
                bound,
                detail,
            } => {
                write!(
                    f,
                    "Temporal ordering violation for employee {employee_id}: \
                     effective date {attempted} precedes {detail} ({bound})"
                )
            }
            Self::MultipleCurrentIntervals { employee_id, count } => {
                write!(
                    f,
                    "Consistency violation: employee {employee_id} has {count} current \
                     intervals, expected exactly one"
                )
            }
            Self::OverlappingIntervals {
                employee_id,
                first_start,
                second_start,
            } => {
                write!(
                    f,
                    "Consistency violation: intervals starting {first_start} and \
                     {second_start} overlap for employee {employee_id}"
                )
            }
            Self::NegativeLengthInterval {
                employee_id,
                start,
                end,
            } => {
                write!(
                    f,
                    "Interval for employee {employee_id} ends ({end}) before it starts ({start})"
                )
            }
            Self::DepartmentCycle { department_id } => {
                write!(
                    f,
                    "Consistency violation: department {department_id} participates in a \
                     parent-chain cycle"
                )
            }
            Self::AmbiguousBaseline { employee_id, count } => {
                write!(
                    f,
                    "Employee {employee_id} has {count} baseline intervals, expected at most one"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
