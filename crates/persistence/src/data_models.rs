// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use bookwise_domain::{Role, User};

/// A stored account, including its password hash.
///
/// Only the authentication path sees this type; everything else gets a
/// `User` via `into_user`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserData {
    pub user_id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: Role,
    pub created_at: String,
}

impl UserData {
    /// Drops the password hash.
    #[must_use]
    pub fn into_user(self) -> User {
        User {
            user_id: self.user_id,
            username: self.username,
            role: self.role,
            created_at: self.created_at,
        }
    }
}
