// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use bookwise_domain::{DomainError, FieldError};
use bookwise_persistence::PersistenceError;
use tracing::{debug, error};

use crate::auth::TokenError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// `Display` output is the message callers see.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or more payload fields were rejected.
    ValidationFailed {
        /// Every violation found.
        field_errors: Vec<FieldError>,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// A unique value is already taken.
    Conflict {
        message: String,
    },
    /// The resource cannot be removed while other records reference it.
    ResourceInUse {
        message: String,
    },
    /// Credentials were missing or did not match.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// A bearer token was presented but does not verify.
    InvalidToken {
        /// Why verification failed. Logged, not shown to callers.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The booking lifecycle has no such transition.
    InvalidTransition {
        message: String,
    },
    /// The booking is in a terminal status.
    AlreadyFinal {
        message: String,
    },
    /// The record store failed.
    StoreUnavailable {
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { .. } => write!(f, "Validation failed"),
            Self::ResourceNotFound { message, .. }
            | Self::Conflict { message }
            | Self::ResourceInUse { message }
            | Self::InvalidTransition { message }
            | Self::AlreadyFinal { message } => write!(f, "{message}"),
            Self::AuthenticationFailed { reason } => write!(f, "{reason}"),
            Self::InvalidToken { .. } => write!(f, "Invalid token."),
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::StoreUnavailable { message } => write!(f, "Server error: {message}"),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

/// Translates a domain error into an API error.
///
/// Parse failures for status, role and pagination become field-level
/// validation failures so callers always see which input was wrong.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::ValidationFailed { field_errors } => ApiError::ValidationFailed { field_errors },
        DomainError::InvalidTransition { .. } => ApiError::InvalidTransition {
            message: err.to_string(),
        },
        DomainError::AlreadyFinal { .. } => ApiError::AlreadyFinal {
            message: err.to_string(),
        },
        DomainError::InvalidStatus(_) => ApiError::ValidationFailed {
            field_errors: vec![FieldError::new("status", &err.to_string())],
        },
        DomainError::InvalidRole(_) => ApiError::ValidationFailed {
            field_errors: vec![FieldError::new("role", &err.to_string())],
        },
        DomainError::InvalidPagination { field, .. } => ApiError::ValidationFailed {
            field_errors: vec![FieldError::new(field, &err.to_string())],
        },
    }
}

/// Translates a persistence error into an API error.
///
/// Store failures that are not about the request itself are logged here
/// and reported as `StoreUnavailable`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateKey(msg) => {
            debug!(detail = %msg, "Unique constraint rejected write");
            ApiError::Conflict {
                message: String::from("Record already exists"),
            }
        }
        PersistenceError::RecordReferenced(msg) => {
            debug!(detail = %msg, "Foreign key constraint rejected write");
            ApiError::ResourceInUse {
                message: String::from("Record is referenced by other records"),
            }
        }
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message: msg,
        },
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::StoreUnavailable {
                message: other.to_string(),
            }
        }
    }
}

/// Translates a token error into an API error.
///
/// A missing token is an authentication failure; a token that is present
/// but does not verify is an invalid token.
#[must_use]
pub fn translate_token_error(err: TokenError) -> ApiError {
    match err {
        TokenError::Missing => ApiError::AuthenticationFailed {
            reason: String::from("Access denied. No token provided."),
        },
        TokenError::Encoding(msg) => {
            error!(error = %msg, "Token signing failed");
            ApiError::StoreUnavailable {
                message: String::from("Failed to issue token"),
            }
        }
        TokenError::Malformed(_) | TokenError::Expired | TokenError::InvalidSignature => {
            debug!(reason = %err, "Token rejected");
            ApiError::InvalidToken {
                reason: err.to_string(),
            }
        }
    }
}
