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

mod diff;
mod error;
mod snapshot;
mod transition;

#[cfg(test)]
mod tests;

pub use diff::{ChangeRecord, ChangeReport, EmployeeAssignmentView, diff_snapshots};
pub use error::CoreError;
pub use snapshot::{
    AssignmentRecord, DepartmentNode, EmployeeSlot, OrganizationSnapshot, RootResolution,
    build_snapshot,
};
pub use transition::{
    IntervalClose, TransitionOutcome, TransitionPlan, TransitionRequest, build_transition_outcome,
    plan_transition,
};
