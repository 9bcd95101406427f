// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookwise_domain::NewClient;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::diesel_schema::clients;
use crate::error::PersistenceError;
use crate::mutations::now_rfc3339;

/// Inserts a client and returns its new ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn insert_client(
    conn: &mut SqliteConnection,
    client: &NewClient,
) -> Result<i64, PersistenceError> {
    let created_at: String = now_rfc3339()?;

    let client_id: i64 = diesel::insert_into(clients::table)
        .values((
            clients::name.eq(&client.name),
            clients::email.eq(&client.email),
            clients::phone.eq(client.phone.as_deref()),
            clients::address.eq(client.address.as_deref()),
            clients::created_at.eq(&created_at),
        ))
        .returning(clients::client_id)
        .get_result(conn)?;
    info!(client_id, "Client created");
    Ok(client_id)
}

/// Overwrites a client's editable fields. `created_at` is left alone.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn update_client(
    conn: &mut SqliteConnection,
    client_id: i64,
    client: &NewClient,
) -> Result<usize, PersistenceError> {
    debug!(client_id, "Updating client");

    let affected: usize = diesel::update(clients::table)
        .filter(clients::client_id.eq(client_id))
        .set((
            clients::name.eq(&client.name),
            clients::email.eq(&client.email),
            clients::phone.eq(client.phone.as_deref()),
            clients::address.eq(client.address.as_deref()),
        ))
        .execute(conn)?;

    Ok(affected)
}

/// Deletes a client.
///
/// # Errors
///
/// Returns an error if the delete fails.
pub fn delete_client(conn: &mut SqliteConnection, client_id: i64) -> Result<usize, PersistenceError> {
    info!(client_id, "Deleting client");

    let affected: usize = diesel::delete(clients::table)
        .filter(clients::client_id.eq(client_id))
        .execute(conn)?;

    Ok(affected)
}
