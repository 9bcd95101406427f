// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use crate::Persistence;
use bookwise_domain::{BookingStatus, NewBooking, NewClient, NewService};

/// bcrypt's minimum cost; keeps the suite fast.
pub const TEST_HASH_COST: u32 = 4;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory()
        .expect("in-memory database")
        .with_password_hash_cost(TEST_HASH_COST)
}

pub fn create_test_client(name: &str) -> NewClient {
    NewClient {
        name: String::from(name),
        email: format!("{}@example.com", name.to_lowercase().replace(' ', ".")),
        phone: Some(String::from("555-0100")),
        address: None,
    }
}

pub fn create_test_service(name: &str, price: f64) -> NewService {
    NewService {
        name: String::from(name),
        description: Some(String::from("Test service")),
        price,
        estimated_time: Some(String::from("1 hour")),
        category: None,
    }
}

pub fn create_test_booking(service_id: i64, customer_name: &str) -> NewBooking {
    NewBooking {
        service_id,
        customer_name: String::from(customer_name),
        email: String::from("customer@example.com"),
        phone: None,
        preferred_date: String::from("2026-03-01T00:00:00Z"),
        status: BookingStatus::Pending,
    }
}
