// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use orghist::CoreError;
use orghist_domain::DomainError;
use orghist_persistence::PersistenceError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. `ConsistencyViolation` is kept separate from
/// `ResourceNotFound` because it reports corrupted stored state, which
/// callers must surface as a terminal failure rather than bad input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Stored state violates a system invariant. Fatal for the
    /// enclosing operation.
    ConsistencyViolation {
        /// A human-readable description of the violation.
        message: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ConsistencyViolation { message } => {
                write!(f, "Consistency violation: {message}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not
/// leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmployeeNotFound { employee_number } => ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!("Employee '{employee_number}' does not exist"),
        },
        DomainError::DepartmentNotFound { code } => ApiError::ResourceNotFound {
            resource_type: String::from("Department"),
            message: format!("Department '{code}' does not exist"),
        },
        DomainError::PositionNotFound { code } => ApiError::ResourceNotFound {
            resource_type: String::from("Position"),
            message: format!("Position '{code}' does not exist"),
        },
        DomainError::RankNotFound { code } => ApiError::ResourceNotFound {
            resource_type: String::from("Rank"),
            message: format!("Rank '{code}' does not exist"),
        },
        DomainError::NoAssignment { employee_number } => ApiError::ResourceNotFound {
            resource_type: String::from("Assignment"),
            message: format!("Employee '{employee_number}' has no assignment history"),
        },
        DomainError::DuplicateEmployeeNumber(number) => ApiError::DomainRuleViolation {
            rule: String::from("unique_employee_number"),
            message: format!("Employee number '{number}' already exists"),
        },
        DomainError::InvalidEmployeeNumber(msg) => ApiError::InvalidInput {
            field: String::from("employee_number"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidDepartmentCode(msg) => ApiError::InvalidInput {
            field: String::from("department_code"),
            message: msg,
        },
        DomainError::InvalidEmployeeStatus(msg) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown employee status: {msg}"),
        },
        DomainError::InvalidDepartmentKind(msg) => ApiError::InvalidInput {
            field: String::from("kind"),
            message: format!("Unknown department kind: {msg}"),
        },
        DomainError::DateParseError { date_string, error } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': {error}"),
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
        DomainError::TemporalOrderingViolation {
            employee_id,
            attempted,
            bound,
            detail,
        } => ApiError::DomainRuleViolation {
            rule: String::from("temporal_ordering"),
            message: format!(
                "Effective date {attempted} for employee {employee_id} precedes {detail} ({bound})"
            ),
        },
        DomainError::MultipleCurrentIntervals { employee_id, count } => {
            ApiError::ConsistencyViolation {
                message: format!(
                    "employee {employee_id} has {count} current intervals, expected exactly one"
                ),
            }
        }
        DomainError::OverlappingIntervals {
            employee_id,
            first_start,
            second_start,
        } => ApiError::ConsistencyViolation {
            message: format!(
                "intervals starting {first_start} and {second_start} overlap for \
                 employee {employee_id}"
            ),
        },
        DomainError::NegativeLengthInterval {
            employee_id,
            start,
            end,
        } => ApiError::ConsistencyViolation {
            message: format!(
                "interval for employee {employee_id} ends ({end}) before it starts ({start})"
            ),
        },
        DomainError::DepartmentCycle { department_id } => ApiError::ConsistencyViolation {
            message: format!("department {department_id} participates in a parent-chain cycle"),
        },
        DomainError::AmbiguousBaseline { employee_id, count } => ApiError::ConsistencyViolation {
            message: format!(
                "employee {employee_id} has {count} baseline intervals, expected at most one"
            ),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::Internal(msg) => ApiError::Internal {
            message: format!("Internal error: {msg}"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Consistency violations keep their identity; everything else
/// infrastructure-shaped becomes `Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::ConsistencyViolation(message) => {
            ApiError::ConsistencyViolation { message }
        }
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
