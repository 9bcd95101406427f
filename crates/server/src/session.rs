// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Bearer credential extraction for the server.
//!
//! Both extractors treat a missing `Authorization` header as "no credential"
//! rather than an error. Whether a credential is required is decided later
//! by the write policy, so public routes keep working without one.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};
use bookwise_api::{ApiError, AuthenticatedActor, Claims, translate_token_error};
use tracing::{debug, warn};

use crate::{AppState, HttpError};

/// The raw token from an `Authorization: Bearer <token>` header, if any.
///
/// # Errors
///
/// Rejects with 400 if the header is present but is not a bearer credential.
pub struct BearerToken(pub Option<String>);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = HttpError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Self(None));
        };

        let header: &str = value.to_str().map_err(|_| {
            warn!("Authorization header is not valid ASCII");
            malformed_header()
        })?;

        let token: &str = header.strip_prefix("Bearer ").ok_or_else(|| {
            warn!("Authorization header does not start with 'Bearer '");
            malformed_header()
        })?;

        Ok(Self(Some(token.trim().to_string())))
    }
}

/// The caller proven by a verified bearer token, if one was presented.
///
/// # Usage
///
/// ```ignore
/// async fn handler(OptionalActor(actor): OptionalActor) { /* actor: Option<AuthenticatedActor> */ }
/// ```
///
/// # Errors
///
/// Rejects with 400 if a token is presented but is malformed, expired, or
/// signed with another secret.
pub struct OptionalActor(pub Option<AuthenticatedActor>);

impl FromRequestParts<AppState> for OptionalActor {
    type Rejection = HttpError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let BearerToken(token) = BearerToken::from_request_parts(parts, state).await?;
        let Some(token) = token else {
            return Ok(Self(None));
        };

        let claims: Claims = state
            .tokens
            .verify(&token)
            .map_err(|e| HttpError::from(translate_token_error(e)))?;

        debug!(user_id = claims.user_id, role = %claims.role, "Bearer token verified");
        Ok(Self(Some(AuthenticatedActor::from(&claims))))
    }
}

fn malformed_header() -> HttpError {
    HttpError::from(ApiError::InvalidToken {
        reason: String::from("Expected 'Authorization: Bearer <token>'"),
    })
}
