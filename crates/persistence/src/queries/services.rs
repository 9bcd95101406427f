// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookwise_domain::{Pagination, Service};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::services;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = services)]
struct ServiceRow {
    service_id: i64,
    name: String,
    description: Option<String>,
    price: f64,
    estimated_time: Option<String>,
    category: Option<String>,
}

impl From<ServiceRow> for Service {
    fn from(row: ServiceRow) -> Self {
        Self {
            service_id: row.service_id,
            name: row.name,
            description: row.description,
            price: row.price,
            estimated_time: row.estimated_time,
            category: row.category,
        }
    }
}

/// Retrieves a service by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the service does not exist.
pub fn get_service(
    conn: &mut SqliteConnection,
    service_id: i64,
) -> Result<Option<Service>, PersistenceError> {
    debug!(service_id, "Looking up service");

    let result: Result<ServiceRow, diesel::result::Error> = services::table
        .filter(services::service_id.eq(service_id))
        .select(ServiceRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Service::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists one page of services in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_services(
    conn: &mut SqliteConnection,
    pagination: Pagination,
) -> Result<Vec<Service>, PersistenceError> {
    let rows: Vec<ServiceRow> = services::table
        .order(services::service_id.asc())
        .limit(i64::from(pagination.limit()))
        .offset(pagination.offset())
        .select(ServiceRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Service::from).collect())
}

/// Counts all services.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_services(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(services::table.count().get_result(conn)?)
}
