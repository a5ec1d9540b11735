//! Booking entity
//!
//! A booking is a party reserved for a point in time. Every field assignment,
//! including the ones made while constructing, goes through validation.
//! Persistence follows the [`Identity`] state: new bookings are inserted,
//! persisted ones are updated in place.

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::config::StoreConfig;
use crate::error::{BookingError, ImmutableFieldError, Result};
use crate::models::{BookingId, PartySize, PatronId, StartTime, ValidationError};
use crate::store::{BookingRow, BookingStore, BookingValues, TopPatron};

/// Whether a booking has been written to the store yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "id", rename_all = "lowercase")]
pub enum Identity {
    /// Never saved; the next save inserts
    New,
    /// Stored under this id; saves update the row
    Persisted(BookingId),
}

/// Unvalidated input for [`Booking::new`]
#[derive(Debug, Clone, PartialEq)]
pub struct BookingParams {
    /// `Some` when rehydrating a stored booking
    pub id: Option<BookingId>,
    pub patron_id: PatronId,
    pub party_size: i32,
    pub start_time: Option<DateTime<Utc>>,
    pub notes: Option<String>,
}

/// A party reserved at a future time
///
/// Not `Clone`: the instance that inserted a row is the only owner of its
/// identity, and a copy saved separately would insert or update on its own.
#[derive(Debug, PartialEq, Serialize)]
pub struct Booking {
    identity: Identity,
    patron_id: PatronId,
    party_size: PartySize,
    start_time: StartTime,
    notes: Option<String>,
}

impl Booking {
    /// Build a booking from raw input.
    ///
    /// # Example
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use tablebook_core::{Booking, BookingParams, PatronId};
    ///
    /// let booking = Booking::new(BookingParams {
    ///     id: None,
    ///     patron_id: PatronId(3),
    ///     party_size: 2,
    ///     start_time: Some(Utc.with_ymd_and_hms(2024, 4, 3, 18, 30, 0).unwrap()),
    ///     notes: Some("window seat".into()),
    /// })
    /// .unwrap();
    ///
    /// assert!(!booking.is_persisted());
    /// assert_eq!(booking.formatted_start_time(), "April 3rd 2024, 6:30 pm");
    /// ```
    pub fn new(params: BookingParams) -> std::result::Result<Self, ValidationError> {
        let identity = match params.id {
            Some(id) => Identity::Persisted(id),
            None => Identity::New,
        };

        Ok(Self {
            identity,
            patron_id: params.patron_id,
            party_size: PartySize::new(params.party_size)?,
            start_time: StartTime::new(params.start_time)?,
            notes: params.notes,
        })
    }

    /// Rehydrate a stored row.
    pub fn from_row(row: BookingRow) -> std::result::Result<Self, ValidationError> {
        Self::new(BookingParams {
            id: Some(row.id),
            patron_id: row.customer_id,
            party_size: row.num_guests,
            start_time: Some(row.start_at),
            notes: row.notes,
        })
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn id(&self) -> Option<BookingId> {
        match self.identity {
            Identity::New => None,
            Identity::Persisted(id) => Some(id),
        }
    }

    pub fn is_persisted(&self) -> bool {
        matches!(self.identity, Identity::Persisted(_))
    }

    pub fn patron_id(&self) -> PatronId {
        self.patron_id
    }

    /// Reassign the patron. Only the current value is accepted.
    pub fn set_patron_id(
        &mut self,
        patron_id: PatronId,
    ) -> std::result::Result<(), ImmutableFieldError> {
        if self.patron_id != patron_id {
            return Err(ImmutableFieldError {
                field: "patron id",
                current: self.patron_id.to_string(),
                attempted: patron_id.to_string(),
            });
        }
        Ok(())
    }

    pub fn party_size(&self) -> i32 {
        self.party_size.get()
    }

    /// Change the party size. The previous value is kept on error.
    pub fn set_party_size(&mut self, party_size: i32) -> std::result::Result<(), ValidationError> {
        self.party_size = PartySize::new(party_size)?;
        Ok(())
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time.instant()
    }

    /// Change the start time. `None` is rejected and the previous value kept.
    pub fn set_start_time(
        &mut self,
        start_time: Option<DateTime<Utc>>,
    ) -> std::result::Result<(), ValidationError> {
        self.start_time = StartTime::new(start_time)?;
        Ok(())
    }

    /// Change the start time from user-supplied text.
    pub fn set_start_time_str(&mut self, input: &str) -> std::result::Result<(), ValidationError> {
        self.start_time = StartTime::parse(input)?;
        Ok(())
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn set_notes(&mut self, notes: Option<String>) {
        self.notes = notes;
    }

    /// Start time as e.g. `April 3rd 2024, 6:30 pm` (UTC).
    pub fn formatted_start_time(&self) -> String {
        self.start_time.format_long()
    }

    /// Start time rendered in a display zone.
    pub fn formatted_start_time_in<Tz>(&self, tz: &Tz) -> String
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.start_time.format_long_in(tz)
    }

    /// Start time rendered in the configured display zone.
    pub fn display_start_time(&self, config: &StoreConfig) -> String {
        self.formatted_start_time_in(&config.display_timezone)
    }

    fn values(&self) -> BookingValues {
        BookingValues {
            customer_id: self.patron_id,
            start_at: self.start_time.instant(),
            num_guests: self.party_size.get(),
            notes: self.notes.clone(),
        }
    }

    /// Insert a new booking or update a persisted one.
    ///
    /// A new booking becomes [`Identity::Persisted`] with the store's id.
    ///
    /// # Errors
    ///
    /// Store failures are returned as [`BookingError::Store`]. Updating a
    /// booking whose row no longer exists returns [`BookingError::NotFound`].
    #[instrument(skip_all, fields(identity = ?self.identity, patron_id = %self.patron_id))]
    pub async fn save<S>(&mut self, store: &S) -> Result<()>
    where
        S: BookingStore + ?Sized,
    {
        let values = self.values();

        match self.identity {
            Identity::New => {
                let id = store.insert_booking(&values).await?;
                self.identity = Identity::Persisted(id);
                info!(booking_id = %id, "booking created");
            }
            Identity::Persisted(id) => {
                let affected = store.update_booking(id, &values).await?;
                if affected == 0 {
                    warn!(booking_id = %id, "update matched no booking");
                    return Err(BookingError::NotFound { id });
                }
                debug!(booking_id = %id, "booking updated");
            }
        }

        Ok(())
    }

    /// All bookings belonging to a patron, in store order.
    #[instrument(skip(store), fields(patron_id = %patron_id))]
    pub async fn find_by_patron<S>(store: &S, patron_id: PatronId) -> Result<Vec<Booking>>
    where
        S: BookingStore + ?Sized,
    {
        let rows = store.bookings_for_patron(patron_id).await?;
        let bookings = rows
            .into_iter()
            .map(Booking::from_row)
            .collect::<std::result::Result<Vec<_>, _>>()?;

        debug!(count = bookings.len(), "loaded bookings for patron");
        Ok(bookings)
    }

    /// The ten patrons with the most bookings, most first.
    ///
    /// Patrons without bookings are not listed. Order among equal counts is
    /// whatever the store returns.
    #[instrument(skip(store))]
    pub async fn top_patrons_by_booking_count<S>(store: &S) -> Result<Vec<TopPatron>>
    where
        S: BookingStore + ?Sized,
    {
        Ok(store.top_patrons().await?)
    }
}
