// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status tracking and transition logic.
//!
//! A booking starts `pending`, may be `confirmed`, and ends either
//! `completed` or `cancelled`. Status only changes when an admin asks
//! for it; nothing advances a booking on its own.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle states of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Submitted by a customer, not yet reviewed.
    #[default]
    Pending,
    /// Accepted by the business.
    Confirmed,
    /// Service delivered.
    Completed,
    /// Withdrawn by either party.
    Cancelled,
}

impl BookingStatus {
    /// Every declared status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Confirmed,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns true if a new booking may be created directly in this status.
    ///
    /// `cancelled` is only reachable through a transition.
    #[must_use]
    pub const fn allowed_at_creation(&self) -> bool {
        !matches!(self, Self::Cancelled)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::AlreadyFinal` if this status is terminal, or
    /// `DomainError::InvalidTransition` if the lifecycle has no such edge.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::AlreadyFinal {
                status: self.as_str().to_string(),
            });
        }

        let valid = match self {
            Self::Pending => matches!(
                new_status,
                Self::Confirmed | Self::Completed | Self::Cancelled
            ),
            Self::Confirmed => matches!(new_status, Self::Completed | Self::Cancelled),
            Self::Completed | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by booking lifecycle rules".to_string(),
            })
        }
    }

    /// Resolves a caller-supplied status string into the next status.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if `requested` names no
    /// declared status, and otherwise whatever `validate_transition` returns.
    pub fn transition(&self, requested: &str) -> Result<Self, DomainError> {
        let target: Self =
            Self::parse_str(requested).map_err(|_| DomainError::InvalidTransition {
                from: self.as_str().to_string(),
                to: requested.to_string(),
                reason: "unknown status".to_string(),
            })?;
        self.validate_transition(target)?;
        Ok(target)
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
