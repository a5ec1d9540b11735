//! SQLite booking store
//!
//! Runs the same statements as [`PgStore`](super::PgStore) against an embedded
//! database, either a file or a private in-memory one. The schema in
//! `sqlite_schema.sql` is applied on open; foreign keys are enforced.

use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::{debug, instrument};

use super::statements::{
    INSERT_BOOKING, SELECT_BOOKINGS_FOR_PATRON, SELECT_TOP_PATRONS, UPDATE_BOOKING,
};
use super::{BookingRow, BookingStore, BookingValues, TopPatron};
use crate::error::StoreError;
use crate::models::{BookingId, PatronId};

const SCHEMA: &str = include_str!("sqlite_schema.sql");

/// Booking store backed by SQLite
#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (or create) a database file.
    pub async fn open<P: AsRef<Path>>(db_path: P) -> Result<Self, StoreError> {
        let db_path = db_path.as_ref();
        let options = SqliteConnectOptions::from_str(&format!("sqlite://{}", db_path.display()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5))
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        debug!(path = %db_path.display(), "opened booking database");
        Self::with_schema(pool).await
    }

    /// Open a private in-memory database.
    ///
    /// Every SQLite connection to `:memory:` is its own database, so the pool
    /// holds exactly one connection and never recycles it.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await?;

        Self::with_schema(pool).await
    }

    async fn with_schema(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::raw_sql(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl BookingStore for SqliteStore {
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
