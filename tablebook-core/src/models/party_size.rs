//! Party size validation
//!
//! A booking is for at least one guest. There is no upper bound.

use serde::Serialize;

use super::ValidationError;

/// Smallest party a booking can be made for
pub const MIN_PARTY_SIZE: i32 = 1;

/// Validated number of guests
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct PartySize(i32);

impl PartySize {
    /// Create a party size, rejecting anything below one guest.
    ///
    /// # Example
    /// ```
    /// use tablebook_core::models::PartySize;
    ///
    /// assert_eq!(PartySize::new(4).unwrap().get(), 4);
    /// assert!(PartySize::new(0).is_err());
    /// ```
    pub fn new(value: i32) -> Result<Self, ValidationError> {
        if value < MIN_PARTY_SIZE {
            return Err(ValidationError::TooSmall {
                field: "party size",
                min: MIN_PARTY_SIZE.into(),
                value: value.into(),
            });
        }

        Ok(Self(value))
    }

    pub fn get(self) -> i32 {
        self.0
    }
}

impl TryFrom<i32> for PartySize {
    type Error = ValidationError;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_guest() {
        assert_eq!(PartySize::new(1).unwrap().get(), 1);
    }

    #[test]
    fn accepts_large_parties() {
        assert_eq!(PartySize::new(i32::MAX).unwrap().get(), i32::MAX);
    }

    #[test]
    fn rejects_zero() {
        let err = PartySize::new(0).unwrap_err();
        assert!(matches!(err, ValidationError::TooSmall { min: 1, value: 0, .. }));
    }

    #[test]
    fn rejects_negative() {
        let err = PartySize::new(-3).unwrap_err();
        assert!(matches!(err, ValidationError::TooSmall { value: -3, .. }));
    }
}
