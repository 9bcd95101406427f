// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookwise_domain::{Page, PriceInput, Service, ServicePayload};
use bookwise_persistence::Persistence;

use crate::{
    ApiError, DeleteConfirmation, ListQuery, WritePolicy, create_booking, create_service,
    delete_service, get_service, list_services, update_service,
};

use super::helpers::{
    booking_payload, create_test_admin, create_test_persistence, create_test_user,
    service_payload,
};

fn seed_service(persistence: &mut Persistence, name: &str, price: f64) -> Service {
    create_service(
        persistence,
        WritePolicy::Open,
        None,
        &service_payload(name, price),
    )
    .unwrap()
}

#[test]
fn test_create_service_accepts_numeric_string_price() {
    let mut persistence: Persistence = create_test_persistence();
    let service: Service = create_service(
        &mut persistence,
        WritePolicy::Open,
        None,
        &ServicePayload {
            price: Some(PriceInput::Text(String::from("49.50"))),
            ..service_payload("Deep Clean", 0.0)
        },
    )
    .unwrap();

    assert!((service.price - 49.5).abs() < f64::EPSILON);
}

#[test]
fn test_create_service_zero_price_is_allowed() {
    let mut persistence: Persistence = create_test_persistence();
    let service: Service = seed_service(&mut persistence, "Consultation", 0.0);
    assert!(service.price.abs() < f64::EPSILON);
}

#[test]
fn test_create_service_negative_price_fails() {
    let mut persistence: Persistence = create_test_persistence();
    let result: Result<Service, ApiError> = create_service(
        &mut persistence,
        WritePolicy::Open,
        None,
        &service_payload("Refund", -1.0),
    );

    let Err(ApiError::ValidationFailed { field_errors }) = result else {
        panic!("expected validation failure, got {result:?}");
    };
    assert_eq!(field_errors[0].field, "price");
    assert_eq!(field_errors[0].message, "Price must not be negative");

    let page: Page<Service> = list_services(&mut persistence, ListQuery::default()).unwrap();
    assert_eq!(page.total, 0);
}

#[test]
fn test_create_service_admin_only_rejects_anonymous() {
    let mut persistence: Persistence = create_test_persistence();
    let result: Result<Service, ApiError> = create_service(
        &mut persistence,
        WritePolicy::AdminOnly,
        None,
        &service_payload("Deep Clean", 80.0),
    );
    assert!(matches!(result, Err(ApiError::AuthenticationFailed { .. })));
}

#[test]
fn test_update_service_price_only() {
    let mut persistence: Persistence = create_test_persistence();
    let created: Service = seed_service(&mut persistence, "Deep Clean", 80.0);
    let admin = create_test_admin();

    let updated: Service = update_service(
        &mut persistence,
        WritePolicy::AdminOnly,
        Some(&admin),
        created.service_id,
        ServicePayload {
            price: Some(PriceInput::Number(95.0)),
            ..ServicePayload::default()
        },
    )
    .unwrap();

    assert_eq!(updated.name, "Deep Clean");
    assert!((updated.price - 95.0).abs() < f64::EPSILON);
    assert_eq!(updated.category, created.category);
}

#[test]
fn test_update_service_plain_user_is_forbidden() {
    let mut persistence: Persistence = create_test_persistence();
    let created: Service = seed_service(&mut persistence, "Deep Clean", 80.0);
    let user = create_test_user();

    let result: Result<Service, ApiError> = update_service(
        &mut persistence,
        WritePolicy::AdminOnly,
        Some(&user),
        created.service_id,
        ServicePayload::default(),
    );
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_list_services_clamps_limit() {
    let mut persistence: Persistence = create_test_persistence();
    seed_service(&mut persistence, "Deep Clean", 80.0);

    let page: Page<Service> = list_services(
        &mut persistence,
        ListQuery {
            page: None,
            limit: Some(1000),
        },
    )
    .unwrap();
    assert_eq!(page.limit, 100);
    assert_eq!(page.total, 1);
}

#[test]
fn test_delete_unreferenced_service() {
    let mut persistence: Persistence = create_test_persistence();
    let created: Service = seed_service(&mut persistence, "Deep Clean", 80.0);

    let confirmation: DeleteConfirmation =
        delete_service(&mut persistence, WritePolicy::Open, None, created.service_id).unwrap();
    assert_eq!(confirmation.message, "Service deleted successfully");
    assert!(matches!(
        get_service(&mut persistence, created.service_id),
        Err(ApiError::ResourceNotFound { .. })
    ));
}

#[test]
fn test_delete_referenced_service_is_in_use() {
    let mut persistence: Persistence = create_test_persistence();
    let created: Service = seed_service(&mut persistence, "Deep Clean", 80.0);
    create_booking(&mut persistence, &booking_payload(created.service_id, "Grace")).unwrap();

    let err: ApiError =
        delete_service(&mut persistence, WritePolicy::Open, None, created.service_id).unwrap_err();

    assert!(matches!(err, ApiError::ResourceInUse { .. }));
    assert_eq!(
        err.to_string(),
        "Service is referenced by 1 booking(s) and cannot be deleted"
    );
    assert!(get_service(&mut persistence, created.service_id).is_ok());
}

#[test]
fn test_delete_missing_service_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();
    let err: ApiError = delete_service(&mut persistence, WritePolicy::Open, None, 7).unwrap_err();
    assert_eq!(err.to_string(), "Service not found");
}
