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

mod booking_status;
mod error;
mod pagination;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use booking_status::BookingStatus;
pub use error::{DomainError, FieldError};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, MAX_LIMIT, Page, Pagination};
pub use types::{
    Booking, BookingPayload, Client, ClientPayload, NewBooking, NewClient, NewService, NewUser,
    PriceInput, RecordRef, Role, Service, ServicePayload, User,
};
pub use validation::{
    MIN_PASSWORD_LENGTH, is_valid_email, normalize_preferred_date, validate_booking,
    validate_client, validate_login, validate_registration, validate_service,
};
