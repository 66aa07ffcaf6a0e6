// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod validation;

use crate::interval::{AssignmentFacts, AssignmentInterval};
use time::{Date, Month};

/// Creates a date for tests, panicking on invalid input.
pub fn date(year: i32, month: Month, day: u8) -> Date {
    Date::from_calendar_date(year, month, day).unwrap()
}

/// Creates a closed interval for employee 1 in department/position 1.
pub fn closed_interval(start: Date, end: Date) -> AssignmentInterval {
    AssignmentInterval {
        interval_id: Some(1),
        employee_id: 1,
        department_id: 1,
        position_id: 1,
        rank_id: None,
        is_manager: false,
        effective_start: start,
        effective_end: Some(end),
        is_current: false,
        reason: String::from("reassignment"),
        assigned_by: None,
    }
}

/// Creates an open current interval for employee 1.
pub fn open_interval(start: Date) -> AssignmentInterval {
    AssignmentInterval::open(
        1,
        AssignmentFacts::new(1, 1, None, false),
        start,
        String::from("reassignment"),
        None,
    )
}
