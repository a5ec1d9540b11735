//! Booking persistence
//!
//! [`BookingStore`] is the narrow capability a [`Booking`](crate::Booking)
//! needs: one operation per statement it issues. Callers pass a store into
//! each operation; nothing here holds a global handle.
//!
//! - [`PgStore`]: Postgres through a `sqlx` pool
//! - [`SqliteStore`]: embedded SQLite, file-backed or in memory
//!
//! Both run the statements in `statements.rs` unchanged.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::error::StoreError;
use crate::models::{BookingId, PatronId};

pub mod postgres;
pub mod sqlite;
mod statements;

pub use postgres::PgStore;
pub use sqlite::SqliteStore;

/// Maximum number of rows returned by [`BookingStore::top_patrons`]
pub const TOP_PATRONS_LIMIT: usize = 10;

/// Booking row as selected from the store
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct BookingRow {
    pub id: BookingId,
    #[sqlx(rename = "customerId")]
    pub customer_id: PatronId,
    #[sqlx(rename = "numGuests")]
    pub num_guests: i32,
    #[sqlx(rename = "startAt")]
    pub start_at: DateTime<Utc>,
    pub notes: Option<String>,
}

/// The four mutable booking columns, in statement parameter order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookingValues {
    pub customer_id: PatronId,
    pub start_at: DateTime<Utc>,
    pub num_guests: i32,
    pub notes: Option<String>,
}

/// Patron ranked by number of bookings
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize)]
pub struct TopPatron {
    pub customer_id: PatronId,
    pub first_name: String,
    pub last_name: String,
    #[sqlx(rename = "fullName")]
    pub full_name: String,
    pub reservation_count: i64,
}

/// Query execution capability used by bookings
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// All bookings for one patron, in store order.
    async fn bookings_for_patron(&self, patron_id: PatronId)
        -> Result<Vec<BookingRow>, StoreError>;

    /// Patrons with at least one booking, most bookings first, at most
    /// [`TOP_PATRONS_LIMIT`] rows.
    async fn top_patrons(&self) -> Result<Vec<TopPatron>, StoreError>;

    /// Insert a booking and return its generated id.
    async fn insert_booking(&self, values: &BookingValues) -> Result<BookingId, StoreError>;

    /// Overwrite the mutable columns of booking `id`, returning affected rows.
    async fn update_booking(
        &self,
        id: BookingId,
        values: &BookingValues,
    ) -> Result<u64, StoreError>;
}
