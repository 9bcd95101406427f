// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Record payloads (`ClientPayload` and friends) live in the domain crate;
//! this module holds the auth and listing shapes.

use bookwise_domain::{Role, User};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::auth::{Claims, IssuedToken};

/// API request to register an account.
///
/// Every field is optional at the wire level so that missing fields are
/// reported as validation failures rather than body parse errors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    /// `admin` or `user`; defaults to `user`.
    #[serde(default)]
    pub role: Option<String>,
}

/// API request to log in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    /// The bearer token to send as `Authorization: Bearer <token>`.
    pub token: String,
    /// When the token stops being accepted (RFC 3339).
    pub expires_at: String,
    pub user_id: i64,
    pub role: Role,
    pub username: String,
}

impl LoginResponse {
    /// Builds the response for a token issued to `user`.
    #[must_use]
    pub fn new(issued: IssuedToken, user: User) -> Self {
        let expires_at: String = OffsetDateTime::from_unix_timestamp(issued.claims.exp)
            .ok()
            .and_then(|t| t.format(&Rfc3339).ok())
            .unwrap_or_default();

        Self {
            token: issued.token,
            expires_at,
            user_id: user.user_id,
            role: user.role,
            username: user.username,
        }
    }
}

/// API response for a token that verified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenValidationResponse {
    pub valid: bool,
    /// The decoded claims.
    pub user: Claims,
}

/// Page and limit as sent on a list request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Confirmation that a record was deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteConfirmation {
    /// The deleted record's ID.
    #[serde(rename = "_id")]
    pub id: i64,
    /// A success message.
    #[serde(skip)]
    pub message: String,
}
