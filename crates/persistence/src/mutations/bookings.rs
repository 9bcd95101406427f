// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookwise_domain::NewBooking;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use crate::mutations::now_rfc3339;

/// Inserts a booking and returns its new ID.
///
/// # Errors
///
/// Returns `PersistenceError::RecordReferenced` if the service does not
/// exist, or an error if the insert fails.
pub fn insert_booking(
    conn: &mut SqliteConnection,
    booking: &NewBooking,
) -> Result<i64, PersistenceError> {
    let created_at: String = now_rfc3339()?;

    let booking_id: i64 = diesel::insert_into(bookings::table)
        .values((
            bookings::service_id.eq(booking.service_id),
            bookings::customer_name.eq(&booking.customer_name),
            bookings::email.eq(&booking.email),
            bookings::phone.eq(booking.phone.as_deref()),
            bookings::preferred_date.eq(&booking.preferred_date),
            bookings::status.eq(booking.status.as_str()),
            bookings::created_at.eq(&created_at),
        ))
        .returning(bookings::booking_id)
        .get_result(conn)?;
    info!(booking_id, status = %booking.status, "Booking created");
    Ok(booking_id)
}

/// Overwrites a booking's fields, status included.
///
/// Lifecycle rules are enforced before this is called.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
    booking: &NewBooking,
) -> Result<usize, PersistenceError> {
    debug!(booking_id, status = %booking.status, "Updating booking");

    let affected: usize = diesel::update(bookings::table)
        .filter(bookings::booking_id.eq(booking_id))
        .set((
            bookings::service_id.eq(booking.service_id),
            bookings::customer_name.eq(&booking.customer_name),
            bookings::email.eq(&booking.email),
            bookings::phone.eq(booking.phone.as_deref()),
            bookings::preferred_date.eq(&booking.preferred_date),
            bookings::status.eq(booking.status.as_str()),
        ))
        .execute(conn)?;

    Ok(affected)
}
