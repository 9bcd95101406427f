// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for Bookwise.
//!
//! Handlers here are synchronous and transport-agnostic: they take a
//! `Persistence`, validate input through the domain crate, enforce the
//! booking lifecycle and return typed results or an `ApiError`. The HTTP
//! server maps those onto status codes and the response envelope.

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

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{
    AuthenticatedActor, AuthenticationService, AuthorizationService, Claims, IssuedToken,
    TokenError, TokenService, WritePolicy,
};
pub use error::{
    ApiError, AuthError, translate_domain_error, translate_persistence_error,
    translate_token_error,
};
pub use handlers::{
    create_booking, create_client, create_service, delete_client, delete_service, get_booking,
    get_client, get_service, list_bookings, list_clients, list_services, parse_record_id,
    update_booking, update_client, update_service,
};
pub use request_response::{
    DeleteConfirmation, ListQuery, LoginRequest, LoginResponse, RegisterRequest,
    TokenValidationResponse,
};

pub use bookwise_domain::Role;
