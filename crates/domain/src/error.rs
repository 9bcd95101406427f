// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};

/// A single field-level validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// The payload field that failed validation (wire name, e.g. `customerName`).
    pub field: String,
    /// A human-readable description of the violation.
    pub message: String,
}

impl FieldError {
    /// Creates a new field error.
    #[must_use]
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more payload fields violated their constraints.
    ValidationFailed {
        /// Every violation found, in field declaration order.
        field_errors: Vec<FieldError>,
    },
    /// A status transition was requested that the booking lifecycle does not allow.
    InvalidTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition was rejected.
        reason: String,
    },
    /// The booking is in a terminal status and accepts no further transitions.
    AlreadyFinal {
        /// The terminal status the booking is in.
        status: String,
    },
    /// A status string is not one of the declared booking statuses.
    InvalidStatus(String),
    /// A role string is not one of the declared roles.
    InvalidRole(String),
    /// A pagination parameter is out of range.
    InvalidPagination {
        /// The query parameter name.
        field: &'static str,
        /// The rejected value.
        value: i64,
    },
}

impl DomainError {
    /// Builds a `ValidationFailed` error holding a single field violation.
    #[must_use]
    pub fn single_field(field: &str, message: &str) -> Self {
        Self::ValidationFailed {
            field_errors: vec![FieldError::new(field, message)],
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { field_errors } => {
                let joined: Vec<String> = field_errors.iter().map(ToString::to_string).collect();
                write!(f, "Validation failed: {}", joined.join("; "))
            }
            Self::InvalidTransition { from, to, reason } => {
                write!(f, "Invalid status transition from '{from}' to '{to}': {reason}")
            }
            Self::AlreadyFinal { status } => {
                write!(f, "Booking is already {status} and cannot change status")
            }
            Self::InvalidStatus(status) => write!(f, "Invalid booking status: {status}"),
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidPagination { field, value } => {
                write!(
                    f,
                    "Invalid {field}: {value}. Must be between 1 and {}",
                    u32::MAX
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
