// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookwise_domain::NewService;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::diesel_schema::services;
use crate::error::PersistenceError;

/// Inserts a service and returns its new ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_service(
    conn: &mut SqliteConnection,
    service: &NewService,
) -> Result<i64, PersistenceError> {
    let service_id: i64 = diesel::insert_into(services::table)
        .values((
            services::name.eq(&service.name),
            services::description.eq(service.description.as_deref()),
            services::price.eq(service.price),
            services::estimated_time.eq(service.estimated_time.as_deref()),
            services::category.eq(service.category.as_deref()),
        ))
        .returning(services::service_id)
        .get_result(conn)?;
    info!(service_id, "Service created");
    Ok(service_id)
}

/// Overwrites a service's fields.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_service(
    conn: &mut SqliteConnection,
    service_id: i64,
    service: &NewService,
) -> Result<usize, PersistenceError> {
    debug!(service_id, "Updating service");

    let affected: usize = diesel::update(services::table)
        .filter(services::service_id.eq(service_id))
        .set((
            services::name.eq(&service.name),
            services::description.eq(service.description.as_deref()),
            services::price.eq(service.price),
            services::estimated_time.eq(service.estimated_time.as_deref()),
            services::category.eq(service.category.as_deref()),
        ))
        .execute(conn)?;

    Ok(affected)
}

/// Deletes a service.
///
/// # Errors
///
/// Returns `PersistenceError::RecordReferenced` if bookings still reference
/// the service, or an error if the delete fails.
pub fn delete_service(
    conn: &mut SqliteConnection,
    service_id: i64,
) -> Result<usize, PersistenceError> {
    info!(service_id, "Deleting service");

    let affected: usize = diesel::delete(services::table)
        .filter(services::service_id.eq(service_id))
        .execute(conn)?;

    Ok(affected)
}
