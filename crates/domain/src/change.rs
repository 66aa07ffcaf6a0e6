// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::interval::AssignmentFacts;
use serde::{Deserialize, Serialize};

/// A single assignment field that differs between two assignments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangedField {
    /// The department differs.
    Department,
    /// The position differs.
    Position,
    /// The rank differs.
    Rank,
    /// The manager flag differs.
    Manager,
}

impl ChangedField {
    /// Converts this field to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Position => "position",
            Self::Rank => "rank",
            Self::Manager => "manager",
        }
    }
}

/// Classification of an employee's change between two snapshots.
///
/// Department and position are the primary classification pair. A
/// manager-flag change with no department or position movement is
/// classified separately; rank differences are carried in the
/// before/after facts without their own class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeType {
    /// The department changed; the position did not.
    Department,
    /// The position changed; the department did not.
    Position,
    /// Both the department and the position changed.
    Both,
    /// Only the manager flag changed.
    Manager,
}

impl ChangeType {
    /// Converts this change type to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Department => "DEPARTMENT_CHANGE",
            Self::Position => "POSITION_CHANGE",
            Self::Both => "BOTH_CHANGE",
            Self::Manager => "MANAGER_CHANGE",
        }
    }
}

impl std::fmt::Display for ChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classifies the change between two assignments.
///
/// Returns `None` when the assignments are equal on the classified
/// dimensions (department, position, manager flag). A rank-only
/// difference does not produce a change row.
#[must_use]
pub fn classify_change(before: &AssignmentFacts, after: &AssignmentFacts) -> Option<ChangeType> {
    let department_changed = before.department_id != after.department_id;
    let position_changed = before.position_id != after.position_id;

    match (department_changed, position_changed) {
        (true, true) => Some(ChangeType::Both),
        (true, false) => Some(ChangeType::Department),
        (false, true) => Some(ChangeType::Position),
        (false, false) => {
            if before.is_manager == after.is_manager {
                None
            } else {
                Some(ChangeType::Manager)
            }
        }
    }
}
