// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::booking_status::BookingStatus;
use crate::error::DomainError;
use serde::{Deserialize, Deserializer, Serialize};
use std::str::FromStr;

/// Caller roles for authorization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May manage clients, services and booking status.
    Admin,
    /// Registered account with no management rights.
    #[default]
    User,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::User => "user",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "user" => Ok(Self::User),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered account. The password hash never leaves the persistence layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub user_id: i64,
    /// Unique login name.
    pub username: String,
    /// Authorization role.
    pub role: Role,
    /// Creation timestamp (RFC 3339).
    pub created_at: String,
}

/// A customer of the business.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub client_id: i64,
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Creation timestamp (RFC 3339), set once at insert.
    pub created_at: String,
}

/// A service the business offers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub service_id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimated_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// A customer's request for a service on a preferred date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Store-assigned identifier.
    #[serde(rename = "_id")]
    pub booking_id: i64,
    /// Identifier of the booked service.
    pub service: i64,
    pub customer_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Preferred date (RFC 3339, UTC).
    pub preferred_date: String,
    pub status: BookingStatus,
    /// Creation timestamp (RFC 3339), set once at insert.
    pub created_at: String,
}

/// A price as sent by a caller: a JSON number or a numeric string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PriceInput {
    Number(f64),
    Text(String),
}

impl PriceInput {
    /// Returns the numeric value, if the input is numeric.
    #[must_use]
    pub fn resolve(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        }
        .filter(|value| value.is_finite())
    }
}

/// A reference to another record as sent by a caller: a number or a numeric string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordRef {
    Id(i64),
    Text(String),
}

impl RecordRef {
    /// Returns the referenced identifier, if the input is a valid integer id.
    #[must_use]
    pub fn resolve(&self) -> Option<i64> {
        match self {
            Self::Id(id) => Some(*id),
            Self::Text(text) => text.trim().parse::<i64>().ok(),
        }
    }
}

/// Reads an optional text field that a caller may explicitly clear.
///
/// An absent key leaves the outer `Option` as `None` through `#[serde(default)]`,
/// while `null` becomes `Some(None)`.
#[allow(clippy::option_option)]
fn clearable<'de, D>(deserializer: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(Some)
}

/// Client fields as sent by a caller, for both create and partial update.
///
/// `phone` and `address` are cleared by sending `null`.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub address: Option<Option<String>>,
}

impl ClientPayload {
    /// Merges this partial payload over an existing client.
    ///
    /// Fields present in the payload win, `null` clears an optional field,
    /// and absent fields keep the stored value.
    #[must_use]
    pub fn overlay(self, existing: &Client) -> Self {
        Self {
            name: self.name.or_else(|| Some(existing.name.clone())),
            email: self.email.or_else(|| Some(existing.email.clone())),
            phone: Some(self.phone.unwrap_or_else(|| existing.phone.clone())),
            address: Some(self.address.unwrap_or_else(|| existing.address.clone())),
        }
    }
}

/// Service fields as sent by a caller, for both create and partial update.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceInput>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub estimated_time: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub category: Option<Option<String>>,
}

impl ServicePayload {
    /// Merges this partial payload over an existing service.
    #[must_use]
    pub fn overlay(self, existing: &Service) -> Self {
        Self {
            name: self.name.or_else(|| Some(existing.name.clone())),
            description: Some(
                self.description
                    .unwrap_or_else(|| existing.description.clone()),
            ),
            price: self.price.or(Some(PriceInput::Number(existing.price))),
            estimated_time: Some(
                self.estimated_time
                    .unwrap_or_else(|| existing.estimated_time.clone()),
            ),
            category: Some(self.category.unwrap_or_else(|| existing.category.clone())),
        }
    }
}

/// Booking fields as sent by a caller, for both create and partial update.
///
/// `status` stays a raw string so that unknown values reach the lifecycle
/// rules instead of failing deserialization.
#[allow(clippy::option_option)]
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingPayload {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<RecordRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(
        default,
        deserialize_with = "clearable",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl BookingPayload {
    /// Merges this partial payload over an existing booking.
    #[must_use]
    pub fn overlay(self, existing: &Booking) -> Self {
        Self {
            service: self.service.or(Some(RecordRef::Id(existing.service))),
            customer_name: self
                .customer_name
                .or_else(|| Some(existing.customer_name.clone())),
            email: self.email.or_else(|| Some(existing.email.clone())),
            phone: Some(self.phone.unwrap_or_else(|| existing.phone.clone())),
            preferred_date: self
                .preferred_date
                .or_else(|| Some(existing.preferred_date.clone())),
            status: self
                .status
                .or_else(|| Some(existing.status.as_str().to_string())),
        }
    }
}

/// A client that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
}

/// A service that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NewService {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub estimated_time: Option<String>,
    pub category: Option<String>,
}

/// A booking that passed validation and is ready to be stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBooking {
    pub service_id: i64,
    pub customer_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub preferred_date: String,
    pub status: BookingStatus,
}

/// A registration that passed validation. The password is still plain text
/// here; hashing happens when the account is stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub role: Role,
}
