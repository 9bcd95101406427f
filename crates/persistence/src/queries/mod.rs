// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries, one module per table.
//!
//! Lookups by id return `Ok(None)` when the row does not exist. Lists are
//! ordered by id, which is insertion order.

pub mod bookings;
pub mod clients;
pub mod services;
pub mod users;

use crate::error::PersistenceError;

/// Maps a stored enum column that no longer parses into a persistence error.
pub(crate) fn corrupt_column(column: &str, err: &impl std::fmt::Display) -> PersistenceError {
    PersistenceError::DatabaseError(format!("Stored {column} value is invalid: {err}"))
}
