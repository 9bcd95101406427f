// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookwise_domain::{Booking, BookingStatus, Pagination};
use diesel::prelude::*;
use diesel::SqliteConnection;
use std::str::FromStr;
use tracing::debug;

use crate::diesel_schema::bookings;
use crate::error::PersistenceError;
use crate::queries::corrupt_column;

#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
struct BookingRow {
    booking_id: i64,
    service_id: i64,
    customer_name: String,
    email: String,
    phone: Option<String>,
    preferred_date: String,
    status: String,
    created_at: String,
}

impl TryFrom<BookingRow> for Booking {
    type Error = PersistenceError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        let status: BookingStatus =
            BookingStatus::from_str(&row.status).map_err(|e| corrupt_column("status", &e))?;
        Ok(Self {
            booking_id: row.booking_id,
            service: row.service_id,
            customer_name: row.customer_name,
            email: row.email,
            phone: row.phone,
            preferred_date: row.preferred_date,
            status,
            created_at: row.created_at,
        })
    }
}

/// Retrieves a booking by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the stored status is
/// not a known booking status.
/// Returns `Ok(None)` if the booking does not exist.
pub fn get_booking(
    conn: &mut SqliteConnection,
    booking_id: i64,
) -> Result<Option<Booking>, PersistenceError> {
    debug!(booking_id, "Looking up booking");

    let result: Result<BookingRow, diesel::result::Error> = bookings::table
        .filter(bookings::booking_id.eq(booking_id))
        .select(BookingRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Booking::try_from(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists one page of bookings in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_bookings(
    conn: &mut SqliteConnection,
    pagination: Pagination,
) -> Result<Vec<Booking>, PersistenceError> {
    let rows: Vec<BookingRow> = bookings::table
        .order(bookings::booking_id.asc())
        .limit(i64::from(pagination.limit()))
        .offset(pagination.offset())
        .select(BookingRow::as_select())
        .load(conn)?;

    rows.into_iter().map(Booking::try_from).collect()
}

/// Counts all bookings.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_bookings(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(bookings::table.count().get_result(conn)?)
}

/// Counts the bookings that reference a service.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_bookings_for_service(
    conn: &mut SqliteConnection,
    service_id: i64,
) -> Result<i64, PersistenceError> {
    Ok(bookings::table
        .filter(bookings::service_id.eq(service_id))
        .count()
        .get_result(conn)?)
}
