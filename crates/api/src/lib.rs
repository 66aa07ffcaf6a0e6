// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operation boundary for the Organization Assignment History System.
//!
//! This crate exposes the operations a controller layer consumes:
//! recording assignment transitions, reconstructing point-in-time
//! organization snapshots, diffing two snapshots, terminating
//! employees, purging history, and the bulk migration orchestrator.
//! All operations return structured result objects, never raw storage
//! rows, and translate lower-layer errors explicitly.

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

mod error;
mod handlers;
mod migration;
mod request_response;

#[cfg(test)]
mod tests;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use orghist_audit::Actor;

pub use error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    diff_organization, get_assignment_history, get_organization_snapshot, purge_employee_history,
    record_transition, terminate_employee,
};
pub use migration::{
    FullMigrationReport, MigrationPolicy, MigrationRecordError, MigrationReport, TargetAssignment,
    UnmatchedHirePolicy, run_baseline_migration, run_current_period_migration, run_full_migration,
};
pub use request_response::{
    AssignmentHistoryResponse, ClosedIntervalInfo, OrganizationDiffResponse,
    OrganizationSnapshotResponse, PurgeHistoryResponse, RecordTransitionRequest,
    RecordTransitionResponse, TerminateEmployeeRequest, TerminateEmployeeResponse,
};

/// Actor roles for authorization.
///
/// Roles determine what actions an authenticated actor may perform.
/// Roles apply only to actors (system operators), never to the
/// employees the records describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// Admin role: operators with structural and corrective authority.
    ///
    /// Admins may additionally perform:
    /// - administrative history purges
    /// - bulk migration runs (including the reset pass)
    Admin,
    /// Operator role: HR operators recording day-to-day assignment
    /// changes and terminations, and reading snapshots and diffs.
    Operator,
}

impl Role {
    /// Converts this role to its string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Operator => "operator",
        }
    }
}

/// An authenticated actor with an associated role.
///
/// Authentication itself lives outside this crate; this type is the
/// boundary it hands in. The actor identity is attributed on every
/// audit event the operations produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role assigned to this actor.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `role` - The role assigned to this actor
    #[must_use]
    pub const fn new(id: String, role: Role) -> Self {
        Self { id, role }
    }

    /// Converts this authenticated actor into an audit Actor.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role.as_str().to_string())
    }

    /// Requires the Admin role for an action.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Unauthorized` if the actor is not an admin.
    pub fn require_admin(&self, action: &str) -> Result<(), ApiError> {
        if self.role == Role::Admin {
            Ok(())
        } else {
            Err(ApiError::Unauthorized {
                action: action.to_string(),
                required_role: Role::Admin.as_str().to_string(),
            })
        }
    }
}

/// Cooperative cancellation flag for batch operations.
///
/// Migration loops check the flag between per-employee units: the
/// current employee's transaction always finishes, then the loop stops
/// and the partial report is returned with `cancelled` set.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Creates a new, unset cancellation flag.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests cancellation.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Returns whether cancellation has been requested.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}
