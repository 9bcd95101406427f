// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookwise_domain::NewUser;
use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use crate::diesel_schema::users;
use crate::error::PersistenceError;
use crate::mutations::now_rfc3339;

/// Creates an account, hashing the password with bcrypt.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user` - The validated registration
/// * `hash_cost` - The bcrypt cost factor
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateKey` if the username is taken, or an
/// error if hashing or the insert fails.
pub fn create_user(
    conn: &mut SqliteConnection,
    user: &NewUser,
    hash_cost: u32,
) -> Result<i64, PersistenceError> {
    info!(username = %user.username, role = %user.role, "Creating user");

    let password_hash: String = bcrypt::hash(&user.password, hash_cost)?;
    let created_at: String = now_rfc3339()?;

    let user_id: i64 = diesel::insert_into(users::table)
        .values((
            users::username.eq(&user.username),
            users::password_hash.eq(&password_hash),
            users::role.eq(user.role.as_str()),
            users::created_at.eq(&created_at),
        ))
        .returning(users::user_id)
        .get_result(conn)?;

    info!(user_id, "User created");
    Ok(user_id)
}
