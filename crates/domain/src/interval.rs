// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::change::ChangedField;
use serde::{Deserialize, Serialize};
use time::Date;

/// Reserved reason string marking an employee's initial baseline
/// interval.
///
/// Baseline intervals are the idempotency anchor for bulk migration:
/// a migration run that finds a baseline matching the target facts
/// creates nothing.
pub const BASELINE_REASON: &str = "initial migration";

/// Reason string recorded when an employee is routed to the terminated
/// department.
pub const TERMINATION_REASON: &str = "employee terminated";

/// The comparable facts of an assignment.
///
/// This is the tuple that decides idempotent skips in migration and
/// change classification in diffs. Identity fields (interval ID, dates,
/// reason) are deliberately excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentFacts {
    /// The assigned department.
    pub department_id: i64,
    /// The assigned position.
    pub position_id: i64,
    /// The assigned rank, if any.
    pub rank_id: Option<i64>,
    /// Whether the employee manages the department.
    pub is_manager: bool,
}

impl AssignmentFacts {
    /// Creates new `AssignmentFacts`.
    ///
    /// # Arguments
    ///
    /// * `department_id` - The assigned department
    /// * `position_id` - The assigned position
    /// * `rank_id` - The assigned rank, if any
    /// * `is_manager` - Whether the employee manages the department
    #[must_use]
    pub const fn new(
        department_id: i64,
        position_id: i64,
        rank_id: Option<i64>,
        is_manager: bool,
    ) -> Self {
        Self {
            department_id,
            position_id,
            rank_id,
            is_manager,
        }
    }

    /// Returns the fields on which `other` differs from `self`.
    ///
    /// An empty result means the two assignments are identical for
    /// idempotency purposes.
    #[must_use]
    pub fn differs_from(&self, other: &Self) -> Vec<ChangedField> {
        let mut changed: Vec<ChangedField> = Vec::new();
        if self.department_id != other.department_id {
            changed.push(ChangedField::Department);
        }
        if self.position_id != other.position_id {
            changed.push(ChangedField::Position);
        }
        if self.rank_id != other.rank_id {
            changed.push(ChangedField::Rank);
        }
        if self.is_manager != other.is_manager {
            changed.push(ChangedField::Manager);
        }
        changed
    }
}

/// An effective-dated assignment record for one employee.
///
/// For a given employee, intervals are totally ordered by
/// `effective_start` and never overlap; at most one interval is current
/// and the current interval is open-ended. The transition engine is the
/// only writer permitted to close an interval.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentInterval {
    /// Canonical internal identifier (opaque, stable, immutable).
    /// `None` indicates the interval has not been persisted yet.
    pub interval_id: Option<i64>,
    /// The employee this interval belongs to.
    pub employee_id: i64,
    /// The assigned department.
    pub department_id: i64,
    /// The assigned position.
    pub position_id: i64,
    /// The assigned rank, if any.
    pub rank_id: Option<i64>,
    /// Whether the employee manages the department during this interval.
    pub is_manager: bool,
    /// The first day this assignment is effective.
    pub effective_start: Date,
    /// The last day this assignment is effective. `None` means
    /// open-ended.
    pub effective_end: Option<Date>,
    /// Whether this interval represents the employee's present
    /// assignment.
    pub is_current: bool,
    /// Free-text audit note explaining the assignment.
    pub reason: String,
    /// Identity of whoever recorded the assignment, if known.
    pub assigned_by: Option<String>,
}

impl AssignmentInterval {
    /// Creates a new open-ended current interval.
    ///
    /// # Arguments
    ///
    /// * `employee_id` - The employee this interval belongs to
    /// * `facts` - The assignment facts
    /// * `effective_start` - The first effective day
    /// * `reason` - Free-text audit note
    /// * `assigned_by` - Recording identity, if known
    #[must_use]
    pub const fn open(
        employee_id: i64,
        facts: AssignmentFacts,
        effective_start: Date,
        reason: String,
        assigned_by: Option<String>,
    ) -> Self {
        Self {
            interval_id: None,
            employee_id,
            department_id: facts.department_id,
            position_id: facts.position_id,
            rank_id: facts.rank_id,
            is_manager: facts.is_manager,
            effective_start,
            effective_end: None,
            is_current: true,
            reason,
            assigned_by,
        }
    }

    /// Returns the comparable facts of this interval.
    #[must_use]
    pub const fn facts(&self) -> AssignmentFacts {
        AssignmentFacts::new(
            self.department_id,
            self.position_id,
            self.rank_id,
            self.is_manager,
        )
    }

    /// Returns whether this interval is open-ended.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.effective_end.is_none()
    }

    /// Returns whether this interval was valid on the given date.
    ///
    /// An interval is valid on `date` when its start is on or before
    /// `date` and it either has no end, ends on or after `date`, or is
    /// the current interval. The `is_current` escape keeps reads
    /// resilient to legacy rows carrying a stale end date.
    #[must_use]
    pub fn valid_on(&self, date: Date) -> bool {
        if self.effective_start > date {
            return false;
        }
        match self.effective_end {
            None => true,
            Some(end) => end >= date || self.is_current,
        }
    }

    /// Returns whether this interval's date range intersects another's.
    ///
    /// An absent end date is treated as extending to positive infinity.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        let self_ends_before_other = match self.effective_end {
            Some(end) => end < other.effective_start,
            None => false,
        };
        let other_ends_before_self = match other.effective_end {
            Some(end) => end < self.effective_start,
            None => false,
        };
        !(self_ends_before_other || other_ends_before_self)
    }

    /// Returns whether this is a one-day same-day-transition record:
    /// a closed interval whose start and end fall on the same day.
    #[must_use]
    pub fn is_same_day_record(&self) -> bool {
        !self.is_current && self.effective_end == Some(self.effective_start)
    }
}
