//! tablebook-core: validated party bookings
//!
//! A [`Booking`] checks its fields whenever they are assigned and saves itself
//! through any [`BookingStore`]: inserted the first time, updated afterwards.
//! Two read queries sit alongside it: bookings for one patron, and the patrons
//! with the most bookings.
//!
//! ```ignore
//! let store = PgStore::connect(&StoreConfig::load()?).await?;
//! let mut booking = Booking::new(params)?;
//! booking.save(&store).await?;
//! let top = Booking::top_patrons_by_booking_count(&store).await?;
//! ```

pub mod booking;
pub mod config;
pub mod error;
pub mod models;
pub mod store;

pub use booking::{Booking, BookingParams, Identity};
pub use config::StoreConfig;
pub use error::{BookingError, ConfigError, ImmutableFieldError, Result, StoreError};
pub use models::{BookingId, PartySize, PatronId, StartTime, ValidationError};
pub use store::{
    BookingRow, BookingStore, BookingValues, PgStore, SqliteStore, TopPatron, TOP_PATRONS_LIMIT,
};
