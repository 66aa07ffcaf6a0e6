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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod change;
mod dates;
mod error;
mod interval;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use change::{ChangeType, ChangedField, classify_change};
pub use dates::{format_iso_date, parse_iso_date};
pub use error::DomainError;
pub use interval::{AssignmentFacts, AssignmentInterval, BASELINE_REASON, TERMINATION_REASON};
pub use types::{
    Department, DepartmentKind, Employee, EmployeeNumber, EmployeeStatus, Position, Rank,
};
pub use validation::{
    validate_department_fields, validate_employee_fields, validate_interval_bounds,
    validate_no_overlap, validate_single_current,
};
