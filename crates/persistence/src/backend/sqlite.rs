// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` connection setup.
//!
//! Every connection goes through [`open`]: session PRAGMAs first, then a
//! read-back of the foreign key setting, then pending migrations.

use diesel::prelude::*;
use diesel::sql_types::Integer;
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

/// Schema migrations compiled into the binary.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Where a database lives. Decides which session PRAGMAs apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Storage {
    /// A private shared-cache in-memory database.
    Memory,
    /// A database file on disk, journaled with WAL.
    File,
}

impl Storage {
    const fn pragmas(self) -> &'static [&'static str] {
        match self {
            Self::Memory => &["PRAGMA foreign_keys = ON"],
            Self::File => &["PRAGMA foreign_keys = ON", "PRAGMA journal_mode = WAL"],
        }
    }
}

#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Reports whether `conn` currently enforces foreign keys.
///
/// Bookings reference services, so a connection without enforcement could
/// delete a service out from under its bookings.
///
/// # Errors
///
/// Returns an error if the PRAGMA cannot be read.
pub fn foreign_keys_enforced(conn: &mut SqliteConnection) -> Result<bool, PersistenceError> {
    let row: ForeignKeysPragma = diesel::sql_query("PRAGMA foreign_keys").get_result(conn)?;
    Ok(row.foreign_keys != 0)
}

/// Opens `database_url` ready for use.
///
/// # Errors
///
/// Returns `PersistenceError::DatabaseConnectionFailed` if the database
/// cannot be opened, `PersistenceError::QueryFailed` if a PRAGMA is refused,
/// `PersistenceError::ForeignKeyEnforcementNotEnabled` if the foreign key
/// setting did not take, and `PersistenceError::MigrationFailed` if the
/// schema cannot be brought up to date.
pub fn open(database_url: &str, storage: Storage) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, ?storage, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)
        .map_err(|e| PersistenceError::DatabaseConnectionFailed(e.to_string()))?;

    for pragma in storage.pragmas() {
        diesel::sql_query(*pragma)
            .execute(&mut conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }

    if !foreign_keys_enforced(&mut conn)? {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    debug!(applied, "Schema is up to date");

    Ok(conn)
}
