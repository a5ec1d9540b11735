//! Postgres booking store
//!
//! Expected schema:
//! - `patrons(id, first_name, last_name, ...)`
//! - `bookings(id, customer_id, num_guests, start_at timestamptz, notes)`
//!
//! Parameter order of each statement is fixed and matches [`BookingValues`].

use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::{debug, instrument};

use super::statements::{
    INSERT_BOOKING, SELECT_BOOKINGS_FOR_PATRON, SELECT_TOP_PATRONS, UPDATE_BOOKING,
};
use super::{BookingRow, BookingStore, BookingValues, TopPatron};
use crate::config::StoreConfig;
use crate::error::StoreError;
use crate::models::{BookingId, PatronId};

/// Booking store backed by a Postgres pool
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a pool sized by `config.max_connections`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Sqlx`] if the first connection cannot be made.
    pub async fn connect(config: &StoreConfig) -> Result<Self, StoreError> {
        debug!(max_connections = config.max_connections, "connecting to booking database");
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.database_url)
            .await?;
        Ok(Self::new(pool))
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl BookingStore for PgStore {
    #[instrument(skip(self), fields(patron_id = %patron_id))]
    async fn bookings_for_patron(
        &self,
        patron_id: PatronId,
    ) -> Result<Vec<BookingRow>, StoreError> {
        let rows: Vec<BookingRow> = sqlx::query_as(SELECT_BOOKINGS_FOR_PATRON)
            .bind(patron_id)
            .fetch_all(&self.pool)
            .await?;

        debug!(count = rows.len(), "fetched bookings");
        Ok(rows)
    }

    #[instrument(skip(self))]
    async fn top_patrons(&self) -> Result<Vec<TopPatron>, StoreError> {
        let rows = sqlx::query_as(SELECT_TOP_PATRONS)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    #[instrument(skip(self, values), fields(patron_id = %values.customer_id))]
    async fn insert_booking(&self, values: &BookingValues) -> Result<BookingId, StoreError> {
        let id: BookingId = sqlx::query_scalar(INSERT_BOOKING)
            .bind(values.customer_id)
            .bind(values.start_at)
            .bind(values.num_guests)
            .bind(values.notes.as_deref())
            .fetch_one(&self.pool)
            .await?;
        Ok(id)
    }

    #[instrument(skip(self, values), fields(booking_id = %id))]
    async fn update_booking(
        &self,
        id: BookingId,
        values: &BookingValues,
    ) -> Result<u64, StoreError> {
        let result = sqlx::query(UPDATE_BOOKING)
            .bind(values.customer_id)
            .bind(values.start_at)
            .bind(values.num_guests)
            .bind(values.notes.as_deref())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}
