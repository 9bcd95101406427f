// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for Bookwise.
//!
//! Stores users, clients, services and bookings in `SQLite` through Diesel.
//! The schema is embedded with `diesel_migrations` and applied when a
//! `Persistence` is constructed.
//!
//! ## Database Backend
//!
//! - File databases run in WAL mode.
//! - In-memory databases get a unique shared-cache name per instance, so
//!   tests never see each other's rows.
//! - Foreign key enforcement is verified at start-up. A booking cannot point
//!   at a missing service, and a service with bookings cannot be deleted.
//!
//! ## Layout
//!
//! - `queries/` holds reads, `mutations/` holds writes, one module per table.
//! - `Persistence` wraps both and is the only public entry point.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use bookwise_domain::{
    Booking, Client, NewBooking, NewClient, NewService, NewUser, Page, Pagination, Service, User,
};
use diesel::{Connection, SqliteConnection};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::UserData;
pub use error::PersistenceError;

use backend::sqlite::Storage;

/// bcrypt cost used unless `with_password_hash_cost` overrides it.
pub const DEFAULT_PASSWORD_HASH_COST: u32 = 10;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter for every Bookwise record type.
pub struct Persistence {
    conn: SqliteConnection,
    password_hash_cost: u32,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_bookwise_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::open(&shared_memory_url, Storage::Memory)?;

        Ok(Self {
            conn,
            password_hash_cost: DEFAULT_PASSWORD_HASH_COST,
        })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = backend::sqlite::open(path_str, Storage::File)?;

        Ok(Self {
            conn,
            password_hash_cost: DEFAULT_PASSWORD_HASH_COST,
        })
    }

    /// Opens the database named by a connection string.
    ///
    /// Accepts a bare path, a `sqlite://` or `sqlite:` URL, or `:memory:`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::InitializationError` for an empty string,
    /// or an error if the database cannot be opened or initialized.
    pub fn from_database_url(database_url: &str) -> Result<Self, PersistenceError> {
        let location: &str = database_url
            .strip_prefix("sqlite://")
            .or_else(|| database_url.strip_prefix("sqlite:"))
            .unwrap_or(database_url)
            .trim();

        if location.is_empty() {
            return Err(PersistenceError::InitializationError(
                "Database URL is empty".to_string(),
            ));
        }

        if location == ":memory:" {
            info!("Using in-memory database; records will not survive a restart");
            Self::new_in_memory()
        } else {
            Self::new_with_file(location)
        }
    }

    /// Sets the bcrypt cost for passwords hashed from now on.
    #[must_use]
    pub const fn with_password_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = cost;
        self
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        if backend::sqlite::foreign_keys_enforced(&mut self.conn)? {
            Ok(())
        } else {
            Err(PersistenceError::ForeignKeyEnforcementNotEnabled)
        }
    }

    // ========================================================================
    // Users
    // ========================================================================

    /// Stores a new account with a bcrypt hash of its password.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateKey` if the username is taken, or
    /// an error if hashing or the insert fails.
    pub fn create_user(&mut self, user: &NewUser) -> Result<User, PersistenceError> {
        let cost: u32 = self.password_hash_cost;
        self.conn.transaction(|conn| {
            let user_id: i64 = mutations::users::create_user(conn, user, cost)?;
            queries::users::get_user_by_id(conn, user_id)?
                .map(UserData::into_user)
                .ok_or_else(|| PersistenceError::NotFound(format!("User {user_id}")))
        })
    }

    /// Retrieves an account, including its password hash, by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_username(
        &mut self,
        username: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::users::get_user_by_username(&mut self.conn, username)
    }

    /// Retrieves an account by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<User>, PersistenceError> {
        Ok(queries::users::get_user_by_id(&mut self.conn, user_id)?.map(UserData::into_user))
    }

    /// Checks a plain-text password against a stored bcrypt hash.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::PasswordHashFailed` if the hash is malformed.
    pub fn verify_password(password: &str, password_hash: &str) -> Result<bool, PersistenceError> {
        Ok(bcrypt::verify(password, password_hash)?)
    }

    // ========================================================================
    // Clients
    // ========================================================================

    /// Stores a client and returns it with its generated fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_client(&mut self, client: &NewClient) -> Result<Client, PersistenceError> {
        self.conn.transaction(|conn| {
            let client_id: i64 = mutations::clients::insert_client(conn, client)?;
            queries::clients::get_client(conn, client_id)?
                .ok_or_else(|| PersistenceError::NotFound(format!("Client {client_id}")))
        })
    }

    /// Retrieves a client by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_client(&mut self, client_id: i64) -> Result<Option<Client>, PersistenceError> {
        queries::clients::get_client(&mut self.conn, client_id)
    }

    /// Lists one page of clients plus the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_clients(&mut self, pagination: Pagination) -> Result<Page<Client>, PersistenceError> {
        self.conn.transaction(|conn| {
            let items: Vec<Client> = queries::clients::list_clients(conn, pagination)?;
            let total: i64 = queries::clients::count_clients(conn)?;
            Ok(Page::new(items, pagination, total))
        })
    }

    /// Replaces a client's editable fields.
    ///
    /// Returns `Ok(None)` if the client does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_client(
        &mut self,
        client_id: i64,
        client: &NewClient,
    ) -> Result<Option<Client>, PersistenceError> {
        self.conn.transaction(|conn| {
            if mutations::clients::update_client(conn, client_id, client)? == 0 {
                return Ok(None);
            }
            queries::clients::get_client(conn, client_id)
        })
    }

    /// Deletes a client. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_client(&mut self, client_id: i64) -> Result<bool, PersistenceError> {
        Ok(mutations::clients::delete_client(&mut self.conn, client_id)? > 0)
    }

    // ========================================================================
    // Services
    // ========================================================================

    /// Stores a service and returns it with its generated ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_service(&mut self, service: &NewService) -> Result<Service, PersistenceError> {
        self.conn.transaction(|conn| {
            let service_id: i64 = mutations::services::insert_service(conn, service)?;
            queries::services::get_service(conn, service_id)?
                .ok_or_else(|| PersistenceError::NotFound(format!("Service {service_id}")))
        })
    }

    /// Retrieves a service by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_service(&mut self, service_id: i64) -> Result<Option<Service>, PersistenceError> {
        queries::services::get_service(&mut self.conn, service_id)
    }

    /// Lists one page of services plus the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_services(
        &mut self,
        pagination: Pagination,
    ) -> Result<Page<Service>, PersistenceError> {
        self.conn.transaction(|conn| {
            let items: Vec<Service> = queries::services::list_services(conn, pagination)?;
            let total: i64 = queries::services::count_services(conn)?;
            Ok(Page::new(items, pagination, total))
        })
    }

    /// Replaces a service's fields.
    ///
    /// Returns `Ok(None)` if the service does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_service(
        &mut self,
        service_id: i64,
        service: &NewService,
    ) -> Result<Option<Service>, PersistenceError> {
        self.conn.transaction(|conn| {
            if mutations::services::update_service(conn, service_id, service)? == 0 {
                return Ok(None);
            }
            queries::services::get_service(conn, service_id)
        })
    }

    /// Deletes a service. Returns `false` if it did not exist.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RecordReferenced` if bookings still
    /// reference the service, or an error if the delete fails.
    pub fn delete_service(&mut self, service_id: i64) -> Result<bool, PersistenceError> {
        Ok(mutations::services::delete_service(&mut self.conn, service_id)? > 0)
    }

    // ========================================================================
    // Bookings
    // ========================================================================

    /// Stores a booking and returns it with its generated fields.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RecordReferenced` if the service does not
    /// exist, or an error if the insert fails.
    pub fn create_booking(&mut self, booking: &NewBooking) -> Result<Booking, PersistenceError> {
        self.conn.transaction(|conn| {
            let booking_id: i64 = mutations::bookings::insert_booking(conn, booking)?;
            queries::bookings::get_booking(conn, booking_id)?
                .ok_or_else(|| PersistenceError::NotFound(format!("Booking {booking_id}")))
        })
    }

    /// Retrieves a booking by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_booking(&mut self, booking_id: i64) -> Result<Option<Booking>, PersistenceError> {
        queries::bookings::get_booking(&mut self.conn, booking_id)
    }

    /// Lists one page of bookings plus the total count.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_bookings(
        &mut self,
        pagination: Pagination,
    ) -> Result<Page<Booking>, PersistenceError> {
        self.conn.transaction(|conn| {
            let items: Vec<Booking> = queries::bookings::list_bookings(conn, pagination)?;
            let total: i64 = queries::bookings::count_bookings(conn)?;
            Ok(Page::new(items, pagination, total))
        })
    }

    /// Replaces a booking's fields, status included.
    ///
    /// Returns `Ok(None)` if the booking does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_booking(
        &mut self,
        booking_id: i64,
        booking: &NewBooking,
    ) -> Result<Option<Booking>, PersistenceError> {
        self.conn.transaction(|conn| {
            if mutations::bookings::update_booking(conn, booking_id, booking)? == 0 {
                return Ok(None);
            }
            queries::bookings::get_booking(conn, booking_id)
        })
    }

    /// Counts the bookings that reference a service.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_bookings_for_service(&mut self, service_id: i64) -> Result<i64, PersistenceError> {
        queries::bookings::count_bookings_for_service(&mut self.conn, service_id)
    }
}
