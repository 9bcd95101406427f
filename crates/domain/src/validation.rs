// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::error::{DomainError, FieldError};
use crate::types::{
    BookingPayload, ClientPayload, NewBooking, NewClient, NewService, NewUser, Role,
    ServicePayload,
};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

/// Minimum number of characters in a password.
pub const MIN_PASSWORD_LENGTH: usize = 6;

// `local@domain.tld`, each part one or more characters.
#[allow(clippy::expect_used)]
static EMAIL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.+@.+\..+$").expect("email pattern is valid"));

/// Returns true if `email` has the basic `local@domain.tld` shape.
#[must_use]
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Parses a preferred date and normalizes it to RFC 3339 in UTC.
///
/// Accepts a full RFC 3339 timestamp or a bare `YYYY-MM-DD` date, which is
/// taken as midnight UTC. Returns `None` if neither form parses.
#[must_use]
pub fn normalize_preferred_date(input: &str) -> Option<String> {
    let input: &str = input.trim();
    let instant: OffsetDateTime = OffsetDateTime::parse(input, &Rfc3339)
        .ok()
        .or_else(|| {
            Date::parse(input, format_description!("[year]-[month]-[day]"))
                .ok()
                .map(|date| date.midnight().assume_utc())
        })?;
    instant.to_offset(UtcOffset::UTC).format(&Rfc3339).ok()
}

fn is_blank(value: Option<&String>) -> bool {
    value.is_none_or(|v| v.trim().is_empty())
}

fn check_required(errors: &mut Vec<FieldError>, field: &str, value: Option<&String>, label: &str) {
    if is_blank(value) {
        errors.push(FieldError::new(field, &format!("{label} is required")));
    }
}

fn check_email(errors: &mut Vec<FieldError>, email: Option<&String>) {
    match email {
        Some(email) if !email.trim().is_empty() => {
            if !is_valid_email(email) {
                errors.push(FieldError::new(
                    "email",
                    "Email must be a valid email address",
                ));
            }
        }
        _ => errors.push(FieldError::new("email", "Email is required")),
    }
}

fn finish<T>(errors: Vec<FieldError>, value: impl FnOnce() -> T) -> Result<T, DomainError> {
    if errors.is_empty() {
        Ok(value())
    } else {
        Err(DomainError::ValidationFailed {
            field_errors: errors,
        })
    }
}

/// Validates a client payload.
///
/// # Errors
///
/// Returns `DomainError::ValidationFailed` listing every violation if:
/// - `name` is missing or blank
/// - `email` is missing, blank, or not shaped like `local@domain.tld`
pub fn validate_client(payload: &ClientPayload) -> Result<NewClient, DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();

    check_required(&mut errors, "name", payload.name.as_ref(), "Name");
    check_email(&mut errors, payload.email.as_ref());

    finish(errors, || NewClient {
        name: payload.name.clone().unwrap_or_default(),
        email: payload.email.clone().unwrap_or_default(),
        phone: payload.phone.clone().flatten(),
        address: payload.address.clone().flatten(),
    })
}

/// Validates a service payload.
///
/// # Errors
///
/// Returns `DomainError::ValidationFailed` listing every violation if:
/// - `name` is missing or blank
/// - `price` is missing, not numeric, or negative
pub fn validate_service(payload: &ServicePayload) -> Result<NewService, DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();

    check_required(&mut errors, "name", payload.name.as_ref(), "Name");

    let price: Option<f64> = match &payload.price {
        None => {
            errors.push(FieldError::new("price", "Price is required"));
            None
        }
        Some(input) => match input.resolve() {
            Some(price) if price >= 0.0 => Some(price),
            Some(_) => {
                errors.push(FieldError::new("price", "Price must not be negative"));
                None
            }
            None => {
                errors.push(FieldError::new("price", "Price must be a number"));
                None
            }
        },
    };

    finish(errors, || NewService {
        name: payload.name.clone().unwrap_or_default(),
        description: payload.description.clone().flatten(),
        price: price.unwrap_or_default(),
        estimated_time: payload.estimated_time.clone().flatten(),
        category: payload.category.clone().flatten(),
    })
}

/// Validates a booking payload for creation.
///
/// This checks field shape only; whether the referenced service exists is
/// a store question answered by the caller.
///
/// # Errors
///
/// Returns `DomainError::ValidationFailed` listing every violation if:
/// - `service` is missing or not a record id
/// - `customerName` is missing or blank
/// - `email` is missing, blank, or malformed
/// - `preferredDate` is missing or not a date
/// - `status` is present but not `pending`, `confirmed` or `completed`
pub fn validate_booking(payload: &BookingPayload) -> Result<NewBooking, DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();

    let service_id: Option<i64> = match &payload.service {
        None => {
            errors.push(FieldError::new("service", "Service is required"));
            None
        }
        Some(reference) => {
            let id = reference.resolve();
            if id.is_none() {
                errors.push(FieldError::new(
                    "service",
                    "Service must be a valid service id",
                ));
            }
            id
        }
    };

    check_required(
        &mut errors,
        "customerName",
        payload.customer_name.as_ref(),
        "Customer name",
    );
    check_email(&mut errors, payload.email.as_ref());

    let preferred_date: Option<String> = if is_blank(payload.preferred_date.as_ref()) {
        errors.push(FieldError::new(
            "preferredDate",
            "Preferred date is required",
        ));
        None
    } else {
        let normalized = payload
            .preferred_date
            .as_deref()
            .and_then(normalize_preferred_date);
        if normalized.is_none() {
            errors.push(FieldError::new(
                "preferredDate",
                "Preferred date must be a date (YYYY-MM-DD) or RFC 3339 timestamp",
            ));
        }
        normalized
    };

    let status: BookingStatus = match payload.status.as_deref() {
        None => BookingStatus::default(),
        Some(raw) => match BookingStatus::from_str(raw) {
            Ok(status) if status.allowed_at_creation() => status,
            _ => {
                errors.push(FieldError::new(
                    "status",
                    "Status must be one of: pending, confirmed, completed",
                ));
                BookingStatus::default()
            }
        },
    };

    finish(errors, || NewBooking {
        service_id: service_id.unwrap_or_default(),
        customer_name: payload.customer_name.clone().unwrap_or_default(),
        email: payload.email.clone().unwrap_or_default(),
        phone: payload.phone.clone().flatten(),
        preferred_date: preferred_date.unwrap_or_default(),
        status,
    })
}

/// Validates a registration request.
///
/// # Errors
///
/// Returns `DomainError::ValidationFailed` listing every violation if:
/// - `username` is missing or blank
/// - `password` is shorter than `MIN_PASSWORD_LENGTH` characters
/// - `role` is present but not `admin` or `user`
pub fn validate_registration(
    username: Option<&String>,
    password: Option<&String>,
    role: Option<&String>,
) -> Result<NewUser, DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();

    check_required(&mut errors, "username", username, "Username");

    if password.is_none_or(|p| p.chars().count() < MIN_PASSWORD_LENGTH) {
        errors.push(FieldError::new(
            "password",
            &format!("Password must be at least {MIN_PASSWORD_LENGTH} characters long"),
        ));
    }

    let role: Role = match role {
        None => Role::default(),
        Some(raw) => Role::from_str(raw).unwrap_or_else(|_| {
            errors.push(FieldError::new(
                "role",
                "Role must be either admin or user",
            ));
            Role::default()
        }),
    };

    finish(errors, || NewUser {
        username: username.cloned().unwrap_or_default(),
        password: password.cloned().unwrap_or_default(),
        role,
    })
}

/// Validates that login credentials were supplied.
///
/// # Errors
///
/// Returns `DomainError::ValidationFailed` if either field is missing or blank.
pub fn validate_login(
    username: Option<&String>,
    password: Option<&String>,
) -> Result<(), DomainError> {
    let mut errors: Vec<FieldError> = Vec::new();
    check_required(&mut errors, "username", username, "Username");
    check_required(&mut errors, "password", password, "Password");
    finish(errors, || ())
}
