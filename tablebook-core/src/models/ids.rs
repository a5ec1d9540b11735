//! Integer identities for bookings and patrons
//!
//! Both map to Postgres `integer` (serial) columns.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Store-generated booking identity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct BookingId(pub i32);

/// Identity of the patron a booking belongs to
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, sqlx::Type,
)]
#[sqlx(transparent)]
#[serde(transparent)]
pub struct PatronId(pub i32);

impl BookingId {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl PatronId {
    pub fn get(self) -> i32 {
        self.0
    }
}

impl From<i32> for BookingId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl From<i32> for PatronId {
    fn from(id: i32) -> Self {
        Self(id)
    }
}

impl fmt::Display for BookingId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for PatronId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
