// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    Booking, BookingPayload, BookingStatus, Client, ClientPayload, DomainError, PriceInput,
    RecordRef, Role, Service, ServicePayload,
};
use std::str::FromStr;

fn sample_client() -> Client {
    Client {
        client_id: 7,
        name: String::from("Ada Lovelace"),
        email: String::from("ada@example.com"),
        phone: Some(String::from("555-0100")),
        address: None,
        created_at: String::from("2026-01-05T10:00:00Z"),
    }
}

fn sample_booking() -> Booking {
    Booking {
        booking_id: 3,
        service: 2,
        customer_name: String::from("Grace Hopper"),
        email: String::from("grace@example.com"),
        phone: None,
        preferred_date: String::from("2026-02-01T00:00:00Z"),
        status: BookingStatus::Confirmed,
        created_at: String::from("2026-01-05T10:00:00Z"),
    }
}

#[test]
fn test_role_parses_known_names() {
    assert_eq!(Role::from_str("admin"), Ok(Role::Admin));
    assert_eq!(Role::from_str("user"), Ok(Role::User));
    assert_eq!(
        Role::from_str("root"),
        Err(DomainError::InvalidRole(String::from("root")))
    );
    assert_eq!(Role::default(), Role::User);
}

#[test]
fn test_client_serializes_with_wire_names() {
    let json: serde_json::Value = serde_json::to_value(sample_client()).unwrap();

    assert_eq!(json["_id"], 7);
    assert_eq!(json["name"], "Ada Lovelace");
    assert_eq!(json["createdAt"], "2026-01-05T10:00:00Z");
    assert!(json.get("address").is_none());
}

#[test]
fn test_booking_serializes_status_and_camel_case_fields() {
    let json: serde_json::Value = serde_json::to_value(sample_booking()).unwrap();

    assert_eq!(json["customerName"], "Grace Hopper");
    assert_eq!(json["preferredDate"], "2026-02-01T00:00:00Z");
    assert_eq!(json["status"], "confirmed");
    assert_eq!(json["service"], 2);
}

#[test]
fn test_price_input_accepts_number_or_numeric_text() {
    let number: PriceInput = serde_json::from_str("49.5").unwrap();
    let text: PriceInput = serde_json::from_str("\"12.25\"").unwrap();
    let junk: PriceInput = serde_json::from_str("\"cheap\"").unwrap();

    assert_eq!(number.resolve(), Some(49.5));
    assert_eq!(text.resolve(), Some(12.25));
    assert_eq!(junk.resolve(), None);
}

#[test]
fn test_record_ref_accepts_number_or_numeric_text() {
    let id: RecordRef = serde_json::from_str("4").unwrap();
    let text: RecordRef = serde_json::from_str("\"4\"").unwrap();
    let junk: RecordRef = serde_json::from_str("\"abc\"").unwrap();

    assert_eq!(id.resolve(), Some(4));
    assert_eq!(text.resolve(), Some(4));
    assert_eq!(junk.resolve(), None);
}

#[test]
fn test_client_overlay_keeps_absent_fields() {
    let payload: ClientPayload = ClientPayload {
        email: Some(String::from("ada@newmail.com")),
        ..ClientPayload::default()
    };

    let merged: ClientPayload = payload.overlay(&sample_client());

    assert_eq!(merged.name.as_deref(), Some("Ada Lovelace"));
    assert_eq!(merged.email.as_deref(), Some("ada@newmail.com"));
    assert_eq!(merged.phone, Some(Some(String::from("555-0100"))));
    assert_eq!(merged.address, Some(None));
}

#[test]
fn test_service_overlay_keeps_existing_price() {
    let existing: Service = Service {
        service_id: 1,
        name: String::from("Haircut"),
        description: None,
        price: 30.0,
        estimated_time: Some(String::from("30 min")),
        category: None,
    };
    let payload: ServicePayload = ServicePayload {
        name: Some(String::from("Deluxe haircut")),
        ..ServicePayload::default()
    };

    let merged: ServicePayload = payload.overlay(&existing);

    assert_eq!(merged.name.as_deref(), Some("Deluxe haircut"));
    assert_eq!(merged.price.as_ref().and_then(PriceInput::resolve), Some(30.0));
    assert_eq!(merged.estimated_time, Some(Some(String::from("30 min"))));
    assert_eq!(merged.description, Some(None));
}

#[test]
fn test_booking_overlay_carries_current_status() {
    let payload: BookingPayload = BookingPayload {
        phone: Some(Some(String::from("555-0199"))),
        ..BookingPayload::default()
    };

    let merged: BookingPayload = payload.overlay(&sample_booking());

    assert_eq!(merged.status.as_deref(), Some("confirmed"));
    assert_eq!(merged.service, Some(RecordRef::Id(2)));
    assert_eq!(merged.phone, Some(Some(String::from("555-0199"))));
}

#[test]
fn test_payload_deserializes_camel_case_and_ignores_missing() {
    let payload: BookingPayload =
        serde_json::from_str(r#"{"customerName":"Linus","preferredDate":"2026-03-01"}"#).unwrap();

    assert_eq!(payload.customer_name.as_deref(), Some("Linus"));
    assert_eq!(payload.preferred_date.as_deref(), Some("2026-03-01"));
    assert!(payload.service.is_none());
    assert!(payload.status.is_none());
}

#[test]
fn test_explicit_null_is_distinct_from_absent() {
    let cleared: ClientPayload = serde_json::from_str(r#"{"phone":null}"#).unwrap();
    let absent: ClientPayload = serde_json::from_str(r#"{"email":"ada@example.com"}"#).unwrap();

    assert_eq!(cleared.phone, Some(None));
    assert_eq!(cleared.address, None);
    assert_eq!(absent.phone, None);
}

#[test]
fn test_client_overlay_clears_nulled_field() {
    let payload: ClientPayload = serde_json::from_str(r#"{"phone":null}"#).unwrap();

    let merged: ClientPayload = payload.overlay(&sample_client());

    assert_eq!(merged.phone, Some(None));
    assert_eq!(merged.name.as_deref(), Some("Ada Lovelace"));
}

#[test]
fn test_service_payload_null_category_clears_it() {
    let existing: Service = Service {
        service_id: 1,
        name: String::from("Haircut"),
        description: Some(String::from("Wash and cut")),
        price: 30.0,
        estimated_time: None,
        category: Some(String::from("Hair")),
    };
    let payload: ServicePayload = serde_json::from_str(r#"{"category":null}"#).unwrap();

    let merged: ServicePayload = payload.overlay(&existing);

    assert_eq!(merged.category, Some(None));
    assert_eq!(merged.description, Some(Some(String::from("Wash and cut"))));
}
