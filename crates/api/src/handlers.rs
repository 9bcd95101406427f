// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Resource handlers for clients, services and bookings.
//!
//! Writes check `AuthorizationService::authorize_manage_records` first,
//! except booking creation, which is the public customer form.

use bookwise_domain::{
    Booking, BookingPayload, BookingStatus, Client, ClientPayload, DomainError, NewBooking,
    NewClient, NewService, Page, Pagination, Service, ServicePayload, validate_booking,
    validate_client, validate_service,
};
use bookwise_persistence::Persistence;
use tracing::info;

use crate::auth::{AuthenticatedActor, AuthorizationService, WritePolicy};
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::request_response::{DeleteConfirmation, ListQuery};

/// Parses a record ID from a path segment.
///
/// Anything that is not an integer cannot name a record.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if `raw` is not an integer.
pub fn parse_record_id(raw: &str, resource_type: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| not_found(resource_type))
}

fn not_found(resource_type: &str) -> ApiError {
    ApiError::ResourceNotFound {
        resource_type: String::from(resource_type),
        message: format!("{resource_type} not found"),
    }
}

fn pagination(query: ListQuery) -> Result<Pagination, ApiError> {
    Pagination::new(query.page, query.limit).map_err(translate_domain_error)
}

fn ensure_service_exists(persistence: &mut Persistence, service_id: i64) -> Result<(), ApiError> {
    if persistence
        .get_service(service_id)
        .map_err(translate_persistence_error)?
        .is_none()
    {
        return Err(translate_domain_error(DomainError::single_field(
            "service",
            "Service does not exist",
        )));
    }
    Ok(())
}

// ============================================================================
// Clients
// ============================================================================

/// Lists one page of clients.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a page or limit below 1, or
/// `ApiError::StoreUnavailable` if the store fails.
pub fn list_clients(
    persistence: &mut Persistence,
    query: ListQuery,
) -> Result<Page<Client>, ApiError> {
    let pagination: Pagination = pagination(query)?;
    persistence
        .list_clients(pagination)
        .map_err(translate_persistence_error)
}

/// Retrieves a client.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the client does not exist.
pub fn get_client(persistence: &mut Persistence, client_id: i64) -> Result<Client, ApiError> {
    persistence
        .get_client(client_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Client"))
}

/// Creates a client.
///
/// # Errors
///
/// Returns an authorization error under an admin-only policy,
/// `ApiError::ValidationFailed` for a bad payload, or
/// `ApiError::StoreUnavailable` if the store fails.
pub fn create_client(
    persistence: &mut Persistence,
    policy: WritePolicy,
    actor: Option<&AuthenticatedActor>,
    payload: &ClientPayload,
) -> Result<Client, ApiError> {
    AuthorizationService::authorize_manage_records(policy, actor, "create_client")?;

    let new_client: NewClient = validate_client(payload).map_err(translate_domain_error)?;
    let client: Client = persistence
        .create_client(&new_client)
        .map_err(translate_persistence_error)?;

    info!(client_id = client.client_id, "Client created via API");
    Ok(client)
}

/// Merges a partial payload over a client and stores the result.
///
/// The merged record is validated as a whole, so clearing a required
/// field fails the same way it would on create.
///
/// # Errors
///
/// Returns an authorization error under an admin-only policy,
/// `ApiError::ResourceNotFound` if the client does not exist, or
/// `ApiError::ValidationFailed` if the merged record is invalid.
pub fn update_client(
    persistence: &mut Persistence,
    policy: WritePolicy,
    actor: Option<&AuthenticatedActor>,
    client_id: i64,
    payload: ClientPayload,
) -> Result<Client, ApiError> {
    AuthorizationService::authorize_manage_records(policy, actor, "update_client")?;

    let existing: Client = get_client(persistence, client_id)?;
    let merged: ClientPayload = payload.overlay(&existing);
    let new_client: NewClient = validate_client(&merged).map_err(translate_domain_error)?;

    persistence
        .update_client(client_id, &new_client)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Client"))
}

/// Deletes a client.
///
/// # Errors
///
/// Returns an authorization error under an admin-only policy, or
/// `ApiError::ResourceNotFound` if the client does not exist.
pub fn delete_client(
    persistence: &mut Persistence,
    policy: WritePolicy,
    actor: Option<&AuthenticatedActor>,
    client_id: i64,
) -> Result<DeleteConfirmation, ApiError> {
    AuthorizationService::authorize_manage_records(policy, actor, "delete_client")?;

    if !persistence
        .delete_client(client_id)
        .map_err(translate_persistence_error)?
    {
        return Err(not_found("Client"));
    }

    info!(client_id, "Client deleted via API");
    Ok(DeleteConfirmation {
        id: client_id,
        message: String::from("Client deleted successfully"),
    })
}

// ============================================================================
// Services
// ============================================================================

/// Lists one page of services.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a page or limit below 1, or
/// `ApiError::StoreUnavailable` if the store fails.
pub fn list_services(
    persistence: &mut Persistence,
    query: ListQuery,
) -> Result<Page<Service>, ApiError> {
    let pagination: Pagination = pagination(query)?;
    persistence
        .list_services(pagination)
        .map_err(translate_persistence_error)
}

/// Retrieves a service.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the service does not exist.
pub fn get_service(persistence: &mut Persistence, service_id: i64) -> Result<Service, ApiError> {
    persistence
        .get_service(service_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Service"))
}

/// Creates a service.
///
/// # Errors
///
/// Returns an authorization error under an admin-only policy,
/// `ApiError::ValidationFailed` for a bad payload, or
/// `ApiError::StoreUnavailable` if the store fails.
pub fn create_service(
    persistence: &mut Persistence,
    policy: WritePolicy,
    actor: Option<&AuthenticatedActor>,
    payload: &ServicePayload,
) -> Result<Service, ApiError> {
    AuthorizationService::authorize_manage_records(policy, actor, "create_service")?;

    let new_service: NewService = validate_service(payload).map_err(translate_domain_error)?;
    let service: Service = persistence
        .create_service(&new_service)
        .map_err(translate_persistence_error)?;

    info!(service_id = service.service_id, "Service created via API");
    Ok(service)
}

/// Merges a partial payload over a service and stores the result.
///
/// # Errors
///
/// Returns an authorization error under an admin-only policy,
/// `ApiError::ResourceNotFound` if the service does not exist, or
/// `ApiError::ValidationFailed` if the merged record is invalid.
pub fn update_service(
    persistence: &mut Persistence,
    policy: WritePolicy,
    actor: Option<&AuthenticatedActor>,
    service_id: i64,
    payload: ServicePayload,
) -> Result<Service, ApiError> {
    AuthorizationService::authorize_manage_records(policy, actor, "update_service")?;

    let existing: Service = get_service(persistence, service_id)?;
    let merged: ServicePayload = payload.overlay(&existing);
    let new_service: NewService = validate_service(&merged).map_err(translate_domain_error)?;

    persistence
        .update_service(service_id, &new_service)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Service"))
}

/// Deletes a service that no booking references.
///
/// # Errors
///
/// Returns an authorization error under an admin-only policy,
/// `ApiError::ResourceNotFound` if the service does not exist, or
/// `ApiError::ResourceInUse` if bookings still reference it.
pub fn delete_service(
    persistence: &mut Persistence,
    policy: WritePolicy,
    actor: Option<&AuthenticatedActor>,
    service_id: i64,
) -> Result<DeleteConfirmation, ApiError> {
    AuthorizationService::authorize_manage_records(policy, actor, "delete_service")?;

    get_service(persistence, service_id)?;

    let references: i64 = persistence
        .count_bookings_for_service(service_id)
        .map_err(translate_persistence_error)?;
    if references > 0 {
        return Err(ApiError::ResourceInUse {
            message: format!(
                "Service is referenced by {references} booking(s) and cannot be deleted"
            ),
        });
    }

    if !persistence
        .delete_service(service_id)
        .map_err(translate_persistence_error)?
    {
        return Err(not_found("Service"));
    }

    info!(service_id, "Service deleted via API");
    Ok(DeleteConfirmation {
        id: service_id,
        message: String::from("Service deleted successfully"),
    })
}

// ============================================================================
// Bookings
// ============================================================================

/// Lists one page of bookings.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a page or limit below 1, or
/// `ApiError::StoreUnavailable` if the store fails.
pub fn list_bookings(
    persistence: &mut Persistence,
    query: ListQuery,
) -> Result<Page<Booking>, ApiError> {
    let pagination: Pagination = pagination(query)?;
    persistence
        .list_bookings(pagination)
        .map_err(translate_persistence_error)
}

/// Retrieves a booking.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the booking does not exist.
pub fn get_booking(persistence: &mut Persistence, booking_id: i64) -> Result<Booking, ApiError> {
    persistence
        .get_booking(booking_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Booking"))
}

/// Creates a booking from the customer form. No credential is needed.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a bad payload or a service
/// that does not exist, or `ApiError::StoreUnavailable` if the store fails.
pub fn create_booking(
    persistence: &mut Persistence,
    payload: &BookingPayload,
) -> Result<Booking, ApiError> {
    let new_booking: NewBooking = validate_booking(payload).map_err(translate_domain_error)?;
    ensure_service_exists(persistence, new_booking.service_id)?;

    let booking: Booking = persistence
        .create_booking(&new_booking)
        .map_err(translate_persistence_error)?;

    info!(
        booking_id = booking.booking_id,
        service_id = booking.service,
        "Booking created via API"
    );
    Ok(booking)
}

/// Updates a booking, applying lifecycle rules to any status change.
///
/// A `status` equal to the current one is not a transition. Any other
/// status must be reachable from the current one. Other fields merge over
/// the stored booking and may be edited in any status.
///
/// # Errors
///
/// Returns an authorization error under an admin-only policy,
/// `ApiError::ResourceNotFound` if the booking does not exist,
/// `ApiError::InvalidTransition` for an unknown or unreachable status,
/// `ApiError::AlreadyFinal` if the booking is completed or cancelled, or
/// `ApiError::ValidationFailed` if the merged record is invalid.
pub fn update_booking(
    persistence: &mut Persistence,
    policy: WritePolicy,
    actor: Option<&AuthenticatedActor>,
    booking_id: i64,
    payload: BookingPayload,
) -> Result<Booking, ApiError> {
    AuthorizationService::authorize_manage_records(policy, actor, "update_booking")?;

    let existing: Booking = get_booking(persistence, booking_id)?;

    let next_status: BookingStatus = match payload.status.as_deref() {
        None => existing.status,
        Some(requested) if requested == existing.status.as_str() => existing.status,
        Some(requested) => existing
            .status
            .transition(requested)
            .map_err(translate_domain_error)?,
    };

    // Status is settled above; validate the remaining fields as a fresh booking.
    let merged: BookingPayload = BookingPayload {
        status: None,
        ..payload.overlay(&existing)
    };
    let mut new_booking: NewBooking = validate_booking(&merged).map_err(translate_domain_error)?;
    new_booking.status = next_status;

    if new_booking.service_id != existing.service {
        ensure_service_exists(persistence, new_booking.service_id)?;
    }

    let booking: Booking = persistence
        .update_booking(booking_id, &new_booking)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| not_found("Booking"))?;

    if booking.status != existing.status {
        info!(
            booking_id,
            from = %existing.status,
            to = %booking.status,
            "Booking status changed"
        );
    }
    Ok(booking)
}
