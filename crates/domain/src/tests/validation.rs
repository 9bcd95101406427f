// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    BookingPayload, BookingStatus, ClientPayload, DomainError, FieldError, NewBooking, NewClient,
    NewService, NewUser, PriceInput, RecordRef, Role, ServicePayload, is_valid_email,
    normalize_preferred_date, validate_booking, validate_client, validate_login,
    validate_registration, validate_service,
};

fn field_errors(result: Result<impl std::fmt::Debug, DomainError>) -> Vec<FieldError> {
    match result {
        Err(DomainError::ValidationFailed { field_errors }) => field_errors,
        other => panic!("Expected ValidationFailed, got {other:?}"),
    }
}

fn fields(errors: &[FieldError]) -> Vec<&str> {
    errors.iter().map(|e| e.field.as_str()).collect()
}

fn valid_booking_payload() -> BookingPayload {
    BookingPayload {
        service: Some(RecordRef::Id(1)),
        customer_name: Some(String::from("Grace Hopper")),
        email: Some(String::from("grace@example.com")),
        phone: None,
        preferred_date: Some(String::from("2026-02-01")),
        status: None,
    }
}

#[test]
fn test_email_shape() {
    assert!(is_valid_email("a@b.co"));
    assert!(is_valid_email("first.last@sub.example.org"));
    assert!(!is_valid_email("plainaddress"));
    assert!(!is_valid_email("missing@tld"));
    assert!(!is_valid_email("@example.com"));
}

#[test]
fn test_preferred_date_accepts_plain_date() {
    assert_eq!(
        normalize_preferred_date("2026-02-01").as_deref(),
        Some("2026-02-01T00:00:00Z")
    );
}

#[test]
fn test_preferred_date_normalizes_offset_to_utc() {
    assert_eq!(
        normalize_preferred_date("2026-02-01T10:30:00+02:00").as_deref(),
        Some("2026-02-01T08:30:00Z")
    );
}

#[test]
fn test_preferred_date_rejects_garbage() {
    assert_eq!(normalize_preferred_date("next tuesday"), None);
    assert_eq!(normalize_preferred_date("2026-13-01"), None);
}

#[test]
fn test_validate_client_accepts_valid_payload() {
    let payload: ClientPayload = ClientPayload {
        name: Some(String::from("Ada")),
        email: Some(String::from("ada@example.com")),
        phone: Some(Some(String::from("555-0100"))),
        address: Some(None),
    };

    let client: NewClient = validate_client(&payload).unwrap();

    assert_eq!(client.name, "Ada");
    assert_eq!(client.email, "ada@example.com");
    assert_eq!(client.phone.as_deref(), Some("555-0100"));
}

#[test]
fn test_validate_client_collects_every_violation() {
    let payload: ClientPayload = ClientPayload {
        name: Some(String::from("   ")),
        email: None,
        ..ClientPayload::default()
    };

    let errors: Vec<FieldError> = field_errors(validate_client(&payload));

    assert_eq!(fields(&errors), vec!["name", "email"]);
}

#[test]
fn test_validate_client_rejects_malformed_email() {
    let payload: ClientPayload = ClientPayload {
        name: Some(String::from("Ada")),
        email: Some(String::from("not-an-email")),
        ..ClientPayload::default()
    };

    let errors: Vec<FieldError> = field_errors(validate_client(&payload));

    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].message, "Email must be a valid email address");
}

#[test]
fn test_validate_service_accepts_numeric_string_price() {
    let payload: ServicePayload = ServicePayload {
        name: Some(String::from("Massage")),
        price: Some(PriceInput::Text(String::from("60"))),
        ..ServicePayload::default()
    };

    let service: NewService = validate_service(&payload).unwrap();

    assert!((service.price - 60.0).abs() < f64::EPSILON);
}

#[test]
fn test_validate_service_accepts_zero_price() {
    let payload: ServicePayload = ServicePayload {
        name: Some(String::from("Consultation")),
        price: Some(PriceInput::Number(0.0)),
        ..ServicePayload::default()
    };

    assert!(validate_service(&payload).is_ok());
}

#[test]
fn test_validate_service_rejects_missing_price() {
    let payload: ServicePayload = ServicePayload {
        name: Some(String::from("Massage")),
        ..ServicePayload::default()
    };

    let errors: Vec<FieldError> = field_errors(validate_service(&payload));

    assert_eq!(fields(&errors), vec!["price"]);
}

#[test]
fn test_validate_service_rejects_negative_and_non_numeric_price() {
    for price in [
        PriceInput::Number(-1.0),
        PriceInput::Text(String::from("free")),
    ] {
        let payload: ServicePayload = ServicePayload {
            name: Some(String::from("Massage")),
            price: Some(price),
            ..ServicePayload::default()
        };

        let errors: Vec<FieldError> = field_errors(validate_service(&payload));
        assert_eq!(fields(&errors), vec!["price"]);
    }
}

#[test]
fn test_validate_booking_defaults_to_pending() {
    let booking: NewBooking = validate_booking(&valid_booking_payload()).unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.service_id, 1);
    assert_eq!(booking.preferred_date, "2026-02-01T00:00:00Z");
}

#[test]
fn test_validate_booking_accepts_explicit_creation_status() {
    let payload: BookingPayload = BookingPayload {
        status: Some(String::from("confirmed")),
        ..valid_booking_payload()
    };

    let booking: NewBooking = validate_booking(&payload).unwrap();

    assert_eq!(booking.status, BookingStatus::Confirmed);
}

#[test]
fn test_validate_booking_rejects_cancelled_at_creation() {
    let payload: BookingPayload = BookingPayload {
        status: Some(String::from("cancelled")),
        ..valid_booking_payload()
    };

    let errors: Vec<FieldError> = field_errors(validate_booking(&payload));

    assert_eq!(fields(&errors), vec!["status"]);
}

#[test]
fn test_validate_booking_rejects_unknown_status() {
    let payload: BookingPayload = BookingPayload {
        status: Some(String::from("archived")),
        ..valid_booking_payload()
    };

    let errors: Vec<FieldError> = field_errors(validate_booking(&payload));

    assert_eq!(fields(&errors), vec!["status"]);
}

#[test]
fn test_validate_booking_reports_all_missing_fields() {
    let errors: Vec<FieldError> = field_errors(validate_booking(&BookingPayload::default()));

    assert_eq!(
        fields(&errors),
        vec!["service", "customerName", "email", "preferredDate"]
    );
}

#[test]
fn test_validate_booking_rejects_non_numeric_service_reference() {
    let payload: BookingPayload = BookingPayload {
        service: Some(RecordRef::Text(String::from("64b7f0c2"))),
        ..valid_booking_payload()
    };

    let errors: Vec<FieldError> = field_errors(validate_booking(&payload));

    assert_eq!(fields(&errors), vec!["service"]);
}

#[test]
fn test_validate_booking_rejects_bad_date() {
    let payload: BookingPayload = BookingPayload {
        preferred_date: Some(String::from("someday")),
        ..valid_booking_payload()
    };

    let errors: Vec<FieldError> = field_errors(validate_booking(&payload));

    assert_eq!(fields(&errors), vec!["preferredDate"]);
}

#[test]
fn test_validate_registration_defaults_role_to_user() {
    let username: String = String::from("alice");
    let password: String = String::from("secret1");

    let user: NewUser = validate_registration(Some(&username), Some(&password), None).unwrap();

    assert_eq!(user.username, "alice");
    assert_eq!(user.role, Role::User);
}

#[test]
fn test_validate_registration_accepts_admin_role() {
    let username: String = String::from("root");
    let password: String = String::from("secret1");
    let role: String = String::from("admin");

    let user: NewUser =
        validate_registration(Some(&username), Some(&password), Some(&role)).unwrap();

    assert_eq!(user.role, Role::Admin);
}

#[test]
fn test_validate_registration_password_length_boundary() {
    let username: String = String::from("alice");
    let five: String = String::from("12345");
    let six: String = String::from("123456");

    let errors: Vec<FieldError> =
        field_errors(validate_registration(Some(&username), Some(&five), None));
    assert_eq!(fields(&errors), vec!["password"]);

    assert!(validate_registration(Some(&username), Some(&six), None).is_ok());
}

#[test]
fn test_validate_registration_rejects_unknown_role() {
    let username: String = String::from("alice");
    let password: String = String::from("secret1");
    let role: String = String::from("superuser");

    let errors: Vec<FieldError> = field_errors(validate_registration(
        Some(&username),
        Some(&password),
        Some(&role),
    ));

    assert_eq!(fields(&errors), vec!["role"]);
}

#[test]
fn test_validate_login_requires_both_fields() {
    let username: String = String::from("alice");

    let errors: Vec<FieldError> = field_errors(validate_login(Some(&username), None));
    assert_eq!(fields(&errors), vec!["password"]);

    let errors: Vec<FieldError> = field_errors(validate_login(None, None));
    assert_eq!(fields(&errors), vec!["username", "password"]);
}

#[test]
fn test_validate_client_stores_cleared_field_as_absent() {
    let payload: ClientPayload = ClientPayload {
        name: Some(String::from("Ada")),
        email: Some(String::from("ada@example.com")),
        phone: Some(None),
        address: None,
    };

    let client: NewClient = validate_client(&payload).unwrap();

    assert_eq!(client.phone, None);
    assert_eq!(client.address, None);
}
