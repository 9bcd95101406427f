// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write operations, one module per table.
//!
//! Inserts return the new row id. Updates and deletes return the number of
//! rows affected so the adapter can tell a missing id from a write.

pub mod bookings;
pub mod clients;
pub mod services;
pub mod users;

use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::PersistenceError;

/// Current UTC time as RFC 3339 text, the format every `created_at` column holds.
pub(crate) fn now_rfc3339() -> Result<String, PersistenceError> {
    OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::Other(format!("Failed to format timestamp: {e}")))
}
