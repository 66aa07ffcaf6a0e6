// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Represents an employee's employment status.
///
/// Status governs which employees participate in snapshot reconstruction:
/// terminated employees remain in history but are routed into the
/// terminated exception department.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum EmployeeStatus {
    /// Actively employed.
    #[default]
    Active,
    /// On an approved leave of absence. Still assigned.
    OnLeave,
    /// Employment ended. Current interval points at the terminated
    /// exception department.
    Terminated,
}

impl FromStr for EmployeeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Active" => Ok(Self::Active),
            "OnLeave" => Ok(Self::OnLeave),
            "Terminated" => Ok(Self::Terminated),
            _ => Err(DomainError::InvalidEmployeeStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for EmployeeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl EmployeeStatus {
    /// Converts this status to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::OnLeave => "OnLeave",
            Self::Terminated => "Terminated",
        }
    }
}

/// Represents the structural kind of a department node.
///
/// Exactly one `Company` node is expected at the top of a healthy
/// hierarchy; root resolution falls back through the other kinds when
/// that expectation does not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepartmentKind {
    /// The organizational root.
    Company,
    /// A division grouping departments.
    Division,
    /// A regular department.
    Department,
    /// A team under a department.
    Team,
}

impl FromStr for DepartmentKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "COMPANY" => Ok(Self::Company),
            "DIVISION" => Ok(Self::Division),
            "DEPARTMENT" => Ok(Self::Department),
            "TEAM" => Ok(Self::Team),
            _ => Err(DomainError::InvalidDepartmentKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for DepartmentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl DepartmentKind {
    /// Converts this kind to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Company => "COMPANY",
            Self::Division => "DIVISION",
            Self::Department => "DEPARTMENT",
            Self::Team => "TEAM",
        }
    }
}

/// Represents an employee number.
///
/// Employee numbers are the human-facing unique identifier for an
/// employee and the stable sort key for deterministic output.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EmployeeNumber {
    /// The employee number value (normalized to uppercase, no
    /// surrounding whitespace).
    value: String,
}

impl EmployeeNumber {
    /// Creates a new `EmployeeNumber`.
    ///
    /// The value is trimmed and normalized to uppercase to ensure
    /// case-insensitive uniqueness.
    ///
    /// # Arguments
    ///
    /// * `value` - The employee number value
    #[must_use]
    pub fn new(value: &str) -> Self {
        Self {
            value: value.trim().to_uppercase(),
        }
    }

    /// Returns the employee number value.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl std::fmt::Display for EmployeeNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}

/// Represents an employee.
///
/// `employee_id` is the canonical internal identifier assigned by the
/// database. The employee number remains unique but is not the primary
/// identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// `None` indicates the employee has not been persisted yet.
    pub employee_id: Option<i64>,
    /// The employee number (unique, display and ordering key).
    pub employee_number: EmployeeNumber,
    /// The employee's name (informational, not unique).
    pub name: String,
    /// The date employment began. No interval may end before this date.
    pub hire_date: Date,
    /// The date employment ended, if terminated.
    pub termination_date: Option<Date>,
    /// The employment status.
    pub status: EmployeeStatus,
}

// Two employees are equal if they share an employee number, regardless
// of their database IDs.
impl PartialEq for Employee {
    fn eq(&self, other: &Self) -> bool {
        self.employee_number == other.employee_number
    }
}

impl Eq for Employee {}

impl std::hash::Hash for Employee {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.employee_number.hash(state);
    }
}

impl Employee {
    /// Creates a new `Employee` without a persisted `employee_id`.
    ///
    /// # Arguments
    ///
    /// * `employee_number` - The employee number
    /// * `name` - The employee's name
    /// * `hire_date` - The date employment began
    #[must_use]
    pub const fn new(employee_number: EmployeeNumber, name: String, hire_date: Date) -> Self {
        Self {
            employee_id: None,
            employee_number,
            name,
            hire_date,
            termination_date: None,
            status: EmployeeStatus::Active,
        }
    }

    /// Creates an `Employee` with an existing `employee_id` (from
    /// persistence).
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The canonical internal identifier
    /// * `employee_number` - The employee number
    /// * `name` - The employee's name
    /// * `hire_date` - The date employment began
    /// * `termination_date` - The date employment ended, if any
    /// * `status` - The employment status
    #[must_use]
    pub const fn with_id(
        employee_id: i64,
        employee_number: EmployeeNumber,
        name: String,
        hire_date: Date,
        termination_date: Option<Date>,
        status: EmployeeStatus,
    ) -> Self {
        Self {
            employee_id: Some(employee_id),
            employee_number,
            name,
            hire_date,
            termination_date,
            status,
        }
    }
}

/// Represents a department.
///
/// Departments form a tree through `parent_department_id`. Exception
/// departments (such as the terminated sentinel) hold history rows but
/// are excluded from populated organization trees.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Department {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the department has not been persisted yet.
    pub department_id: Option<i64>,
    /// The department code (normalized to uppercase, unique).
    pub code: String,
    /// The department display name.
    pub name: String,
    /// The structural kind of this department.
    pub kind: DepartmentKind,
    /// The parent department, or `None` for a root.
    pub parent_department_id: Option<i64>,
    /// Display ordering among siblings.
    pub display_order: i32,
    /// Whether this is an exception department excluded from snapshot
    /// trees (e.g., the terminated sentinel).
    pub is_exception: bool,
}

// Two departments are equal if they share a code, regardless of their
// database IDs.
impl PartialEq for Department {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Department {}

impl std::hash::Hash for Department {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl Department {
    /// The canonical code of the terminated exception department.
    ///
    /// Termination routes an employee's final interval here; the
    /// department never appears in a populated snapshot tree.
    pub const TERMINATED_CODE: &'static str = "TERMINATED";

    /// Creates a new regular `Department` without a persisted ID.
    ///
    /// Department codes are normalized to uppercase to ensure
    /// case-insensitive uniqueness.
    ///
    /// # Arguments
    ///
    /// * `code` - The department code (will be normalized to uppercase)
    /// * `name` - The department display name
    /// * `kind` - The structural kind
    /// * `parent_department_id` - The parent department, if any
    #[must_use]
    pub fn new(
        code: &str,
        name: String,
        kind: DepartmentKind,
        parent_department_id: Option<i64>,
    ) -> Self {
        Self {
            department_id: None,
            code: code.to_uppercase(),
            name,
            kind,
            parent_department_id,
            display_order: 0,
            is_exception: false,
        }
    }

    /// Creates a new exception `Department` (e.g., the terminated
    /// sentinel) without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `code` - The department code (will be normalized to uppercase)
    /// * `name` - The department display name
    #[must_use]
    pub fn new_exception(code: &str, name: String) -> Self {
        Self {
            department_id: None,
            code: code.to_uppercase(),
            name,
            kind: DepartmentKind::Department,
            parent_department_id: None,
            display_order: 0,
            is_exception: true,
        }
    }

    /// Creates a `Department` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `department_id` - The canonical numeric identifier
    /// * `code` - The department code
    /// * `name` - The department display name
    /// * `kind` - The structural kind
    /// * `parent_department_id` - The parent department, if any
    /// * `display_order` - Display ordering among siblings
    /// * `is_exception` - Whether this is an exception department
    #[must_use]
    pub fn with_id(
        department_id: i64,
        code: &str,
        name: String,
        kind: DepartmentKind,
        parent_department_id: Option<i64>,
        display_order: i32,
        is_exception: bool,
    ) -> Self {
        Self {
            department_id: Some(department_id),
            code: code.to_uppercase(),
            name,
            kind,
            parent_department_id,
            display_order,
            is_exception,
        }
    }

    /// Returns whether this department is a candidate organizational
    /// root: parentless and of `Company` kind.
    #[must_use]
    pub const fn is_designated_root(&self) -> bool {
        self.parent_department_id.is_none() && matches!(self.kind, DepartmentKind::Company)
    }
}

/// Represents a position (job function within a department).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the position has not been persisted yet.
    pub position_id: Option<i64>,
    /// The position code (normalized to uppercase, unique).
    pub code: String,
    /// The position title.
    pub title: String,
    /// Display ordering.
    pub display_order: i32,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Position {}

impl Position {
    /// Creates a new `Position` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `code` - The position code (will be normalized to uppercase)
    /// * `title` - The position title
    #[must_use]
    pub fn new(code: &str, title: String) -> Self {
        Self {
            position_id: None,
            code: code.to_uppercase(),
            title,
            display_order: 0,
        }
    }

    /// Creates a `Position` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `position_id` - The canonical numeric identifier
    /// * `code` - The position code
    /// * `title` - The position title
    /// * `display_order` - Display ordering
    #[must_use]
    pub fn with_id(position_id: i64, code: &str, title: String, display_order: i32) -> Self {
        Self {
            position_id: Some(position_id),
            code: code.to_uppercase(),
            title,
            display_order,
        }
    }
}

/// Represents a rank (pay/seniority grade). Optional on an assignment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rank {
    /// The canonical numeric identifier assigned by the database.
    /// `None` indicates the rank has not been persisted yet.
    pub rank_id: Option<i64>,
    /// The rank code (normalized to uppercase, unique).
    pub code: String,
    /// The rank display name.
    pub name: String,
}

impl PartialEq for Rank {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Eq for Rank {}

impl Rank {
    /// Creates a new `Rank` without a persisted ID.
    ///
    /// # Arguments
    ///
    /// * `code` - The rank code (will be normalized to uppercase)
    /// * `name` - The rank display name
    #[must_use]
    pub fn new(code: &str, name: String) -> Self {
        Self {
            rank_id: None,
            code: code.to_uppercase(),
            name,
        }
    }

    /// Creates a `Rank` with an existing persisted ID.
    ///
    /// # Arguments
    ///
    /// * `rank_id` - The canonical numeric identifier
    /// * `code` - The rank code
    /// * `name` - The rank display name
    #[must_use]
    pub fn with_id(rank_id: i64, code: &str, name: String) -> Self {
        Self {
            rank_id: Some(rank_id),
            code: code.to_uppercase(),
            name,
        }
    }
}
