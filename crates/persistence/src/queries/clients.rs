// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookwise_domain::{Client, Pagination};
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::diesel_schema::clients;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = clients)]
struct ClientRow {
    client_id: i64,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
    created_at: String,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            client_id: row.client_id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            created_at: row.created_at,
        }
    }
}

/// Retrieves a client by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the client does not exist.
pub fn get_client(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<Option<Client>, PersistenceError> {
    debug!(client_id, "Looking up client");

    let result: Result<ClientRow, diesel::result::Error> = clients::table
        .filter(clients::client_id.eq(client_id))
        .select(ClientRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(Client::from(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists one page of clients in insertion order.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_clients(
    conn: &mut SqliteConnection,
    pagination: Pagination,
) -> Result<Vec<Client>, PersistenceError> {
    let rows: Vec<ClientRow> = clients::table
        .order(clients::client_id.asc())
        .limit(i64::from(pagination.limit()))
        .offset(pagination.offset())
        .select(ClientRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(Client::from).collect())
}

/// Counts all clients.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_clients(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(clients::table.count().get_result(conn)?)
}
