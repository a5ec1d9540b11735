//! Booking field types with validation at construction
//!
//! Invalid input returns ValidationError, not panic.

pub mod validation;
pub mod ids;
pub mod party_size;
pub mod start_time;

pub use validation::ValidationError;
pub use ids::{BookingId, PatronId};
pub use party_size::{PartySize, MIN_PARTY_SIZE};
pub use start_time::StartTime;
