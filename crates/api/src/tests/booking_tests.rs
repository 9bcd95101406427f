// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookwise_domain::{Booking, BookingPayload, BookingStatus, Page, RecordRef, Service};
use bookwise_persistence::Persistence;

use crate::{
    ApiError, ListQuery, WritePolicy, create_booking, create_service, get_booking, list_bookings,
    update_booking,
};

use super::helpers::{booking_payload, create_test_persistence, create_test_user, service_payload};

fn setup() -> (Persistence, Service) {
    let mut persistence: Persistence = create_test_persistence();
    let service: Service = create_service(
        &mut persistence,
        WritePolicy::Open,
        None,
        &service_payload("Deep Clean", 80.0),
    )
    .unwrap();
    (persistence, service)
}

fn status_update(status: &str) -> BookingPayload {
    BookingPayload {
        status: Some(String::from(status)),
        ..BookingPayload::default()
    }
}

fn set_status(
    persistence: &mut Persistence,
    booking_id: i64,
    status: &str,
) -> Result<Booking, ApiError> {
    update_booking(
        persistence,
        WritePolicy::Open,
        None,
        booking_id,
        status_update(status),
    )
}

// ============================================================================
// Creation
// ============================================================================

#[test]
fn test_create_booking_defaults_to_pending() {
    let (mut persistence, service) = setup();
    let booking: Booking =
        create_booking(&mut persistence, &booking_payload(service.service_id, "Grace")).unwrap();

    assert_eq!(booking.status, BookingStatus::Pending);
    assert_eq!(booking.service, service.service_id);
    assert_eq!(booking.preferred_date, "2026-03-01T00:00:00Z");
}

#[test]
fn test_create_booking_accepts_string_service_reference() {
    let (mut persistence, service) = setup();
    let payload: BookingPayload = BookingPayload {
        service: Some(RecordRef::Text(service.service_id.to_string())),
        ..booking_payload(0, "Grace")
    };

    let booking: Booking = create_booking(&mut persistence, &payload).unwrap();
    assert_eq!(booking.service, service.service_id);
}

#[test]
fn test_create_booking_unknown_service_fails_validation() {
    let (mut persistence, _service) = setup();
    let result: Result<Booking, ApiError> =
        create_booking(&mut persistence, &booking_payload(9999, "Grace"));

    let Err(ApiError::ValidationFailed { field_errors }) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    assert_eq!(field_errors[0].field, "service");
    assert_eq!(field_errors[0].message, "Service does not exist");

    let page: Page<Booking> = list_bookings(&mut persistence, ListQuery::default()).unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn test_create_booking_cancelled_status_rejected() {
    let (mut persistence, service) = setup();
    let payload: BookingPayload = BookingPayload {
        status: Some(String::from("cancelled")),
        ..booking_payload(service.service_id, "Grace")
    };

    let result: Result<Booking, ApiError> = create_booking(&mut persistence, &payload);
    let Err(ApiError::ValidationFailed { field_errors }) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    assert_eq!(field_errors[0].field, "status");
}

#[test]
fn test_create_booking_bad_date_fails_validation() {
    let (mut persistence, service) = setup();
    let payload: BookingPayload = BookingPayload {
        preferred_date: Some(String::from("next tuesday")),
        ..booking_payload(service.service_id, "Grace")
    };

    let result: Result<Booking, ApiError> = create_booking(&mut persistence, &payload);
    let Err(ApiError::ValidationFailed { field_errors }) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    assert_eq!(field_errors[0].field, "preferredDate");

    let page: Page<Booking> = list_bookings(&mut persistence, ListQuery::default()).unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn test_create_booking_ignores_admin_policy() {
    // Booking creation is the public customer form; the handler takes no actor.
    let (mut persistence, service) = setup();
    assert!(create_booking(&mut persistence, &booking_payload(service.service_id, "Grace")).is_ok());
}

// ============================================================================
// Lifecycle
// ============================================================================

#[test]
fn test_pending_to_confirmed_to_completed() {
    let (mut persistence, service) = setup();
    let booking: Booking =
        create_booking(&mut persistence, &booking_payload(service.service_id, "Grace")).unwrap();

    let confirmed: Booking = set_status(&mut persistence, booking.booking_id, "confirmed").unwrap();
    assert_eq!(confirmed.status, BookingStatus::Confirmed);

    let completed: Booking = set_status(&mut persistence, booking.booking_id, "completed").unwrap();
    assert_eq!(completed.status, BookingStatus::Completed);
}

#[test]
fn test_completed_booking_cannot_change_status() {
    let (mut persistence, service) = setup();
    let booking: Booking =
        create_booking(&mut persistence, &booking_payload(service.service_id, "Grace")).unwrap();
    set_status(&mut persistence, booking.booking_id, "completed").unwrap();

    let err: ApiError = set_status(&mut persistence, booking.booking_id, "pending").unwrap_err();
    assert!(matches!(err, ApiError::AlreadyFinal { .. }));
    assert_eq!(
        err.to_string(),
        "Booking is already completed and cannot change status"
    );
}

#[test]
fn test_cancelled_booking_cannot_be_confirmed() {
    let (mut persistence, service) = setup();
    let booking: Booking =
        create_booking(&mut persistence, &booking_payload(service.service_id, "Grace")).unwrap();
    set_status(&mut persistence, booking.booking_id, "cancelled").unwrap();

    let result: Result<Booking, ApiError> =
        set_status(&mut persistence, booking.booking_id, "confirmed");
    assert!(matches!(result, Err(ApiError::AlreadyFinal { .. })));
}

#[test]
fn test_confirmed_booking_cannot_return_to_pending() {
    let (mut persistence, service) = setup();
    let booking: Booking =
        create_booking(&mut persistence, &booking_payload(service.service_id, "Grace")).unwrap();
    set_status(&mut persistence, booking.booking_id, "confirmed").unwrap();

    let result: Result<Booking, ApiError> =
        set_status(&mut persistence, booking.booking_id, "pending");
    assert!(matches!(result, Err(ApiError::InvalidTransition { .. })));
    assert_eq!(
        get_booking(&mut persistence, booking.booking_id).unwrap().status,
        BookingStatus::Confirmed
    );
}

#[test]
fn test_unknown_status_is_invalid_transition() {
    let (mut persistence, service) = setup();
    let booking: Booking =
        create_booking(&mut persistence, &booking_payload(service.service_id, "Grace")).unwrap();

    let result: Result<Booking, ApiError> =
        set_status(&mut persistence, booking.booking_id, "archived");
    assert!(matches!(result, Err(ApiError::InvalidTransition { .. })));
}

#[test]
fn test_restating_current_status_is_not_a_transition() {
    let (mut persistence, service) = setup();
    let booking: Booking =
        create_booking(&mut persistence, &booking_payload(service.service_id, "Grace")).unwrap();
    set_status(&mut persistence, booking.booking_id, "completed").unwrap();

    let payload: BookingPayload = BookingPayload {
        phone: Some(Some(String::from("555-0199"))),
        status: Some(String::from("completed")),
        ..BookingPayload::default()
    };
    let updated: Booking = update_booking(
        &mut persistence,
        WritePolicy::Open,
        None,
        booking.booking_id,
        payload,
    )
    .unwrap();

    assert_eq!(updated.status, BookingStatus::Completed);
    assert_eq!(updated.phone.as_deref(), Some("555-0199"));
}

#[test]
fn test_update_without_status_keeps_status_and_created_at() {
    let (mut persistence, service) = setup();
    let booking: Booking =
        create_booking(&mut persistence, &booking_payload(service.service_id, "Grace")).unwrap();

    let updated: Booking = update_booking(
        &mut persistence,
        WritePolicy::Open,
        None,
        booking.booking_id,
        BookingPayload {
            customer_name: Some(String::from("Grace Hopper")),
            ..BookingPayload::default()
        },
    )
    .unwrap();

    assert_eq!(updated.customer_name, "Grace Hopper");
    assert_eq!(updated.status, BookingStatus::Pending);
    assert_eq!(updated.created_at, booking.created_at);
}

#[test]
fn test_update_booking_admin_only_rejects_plain_user() {
    let (mut persistence, service) = setup();
    let booking: Booking =
        create_booking(&mut persistence, &booking_payload(service.service_id, "Grace")).unwrap();
    let user = create_test_user();

    let result: Result<Booking, ApiError> = update_booking(
        &mut persistence,
        WritePolicy::AdminOnly,
        Some(&user),
        booking.booking_id,
        status_update("confirmed"),
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_update_missing_booking_is_not_found() {
    let (mut persistence, _service) = setup();
    let err: ApiError = set_status(&mut persistence, 31337, "confirmed").unwrap_err();
    assert_eq!(err.to_string(), "Booking not found");
}

#[test]
fn test_list_bookings_counts_all() {
    let (mut persistence, service) = setup();
    for name in ["Grace", "Ada", "Edsger"] {
        create_booking(&mut persistence, &booking_payload(service.service_id, name)).unwrap();
    }

    let page: Page<Booking> = list_bookings(&mut persistence, ListQuery::default()).unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.page, 1);
    assert_eq!(page.limit, 10);
}
