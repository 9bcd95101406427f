// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use bookwise_domain::{
    BookingPayload, ClientPayload, PriceInput, RecordRef, Role, ServicePayload,
};
use bookwise_persistence::Persistence;

use crate::{AuthenticatedActor, RegisterRequest, TokenService};

pub const TEST_SECRET: &[u8] = b"test-secret";

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory()
        .expect("in-memory database")
        .with_password_hash_cost(4)
}

pub fn create_test_tokens() -> TokenService {
    TokenService::new(TEST_SECRET, TokenService::DEFAULT_TTL)
}

pub const fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new(1, Role::Admin)
}

pub const fn create_test_user() -> AuthenticatedActor {
    AuthenticatedActor::new(2, Role::User)
}

pub fn register_request(username: &str, password: &str, role: Option<&str>) -> RegisterRequest {
    RegisterRequest {
        username: Some(String::from(username)),
        password: Some(String::from(password)),
        role: role.map(String::from),
    }
}

pub fn client_payload(name: &str, email: &str) -> ClientPayload {
    ClientPayload {
        name: Some(String::from(name)),
        email: Some(String::from(email)),
        phone: Some(Some(String::from("555-0100"))),
        address: None,
    }
}

pub fn service_payload(name: &str, price: f64) -> ServicePayload {
    ServicePayload {
        name: Some(String::from(name)),
        description: Some(Some(String::from("Standard visit"))),
        price: Some(PriceInput::Number(price)),
        estimated_time: Some(Some(String::from("1 hour"))),
        category: Some(Some(String::from("Cleaning"))),
    }
}

pub fn booking_payload(service_id: i64, customer_name: &str) -> BookingPayload {
    BookingPayload {
        service: Some(RecordRef::Id(service_id)),
        customer_name: Some(String::from(customer_name)),
        email: Some(String::from("customer@example.com")),
        phone: None,
        preferred_date: Some(String::from("2026-03-01")),
        status: None,
    }
}
