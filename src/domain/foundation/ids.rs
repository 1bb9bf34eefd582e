//! Strongly-typed identifier value objects.
//!
//! Every record in the booking schema is keyed by a serial integer. Wrapping
//! each key in its own type keeps a room id from being passed where a booking
//! id is expected.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Declares a positive integer identifier newtype.
macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $field:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub struct $name(i32);

        impl $name {
            /// Creates an identifier, rejecting zero and negative values.
            pub fn new(value: i32) -> Result<Self, ValidationError> {
                if value <= 0 {
                    return Err(ValidationError::out_of_range($field, 1, i32::MAX, value));
                }
                Ok(Self(value))
            }

            /// Returns the raw integer value.
            pub fn value(&self) -> i32 {
                self.0
            }
        }

        impl TryFrom<i32> for $name {
            type Error = ValidationError;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                Self::new(value)
            }
        }

        impl From<$name> for i32 {
            fn from(id: $name) -> i32 {
                id.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let value = s
                    .trim()
                    .parse::<i32>()
                    .map_err(|e| ValidationError::invalid_format($field, e.to_string()))?;
                Self::new(value)
            }
        }
    };
}

define_id!(
    /// Identifier of a registered user (resolved by the auth layer).
    UserId,
    "user_id"
);

define_id!(
    /// Identifier of a room booking.
    BookingId,
    "booking_id"
);

define_id!(
    /// Identifier of a hotel room.
    RoomId,
    "room_id"
);

define_id!(
    /// Identifier of the hotel owning a room.
    HotelId,
    "hotel_id"
);

define_id!(
    /// Identifier of a user's event enrollment.
    EnrollmentId,
    "enrollment_id"
);

define_id!(
    /// Identifier of a purchased ticket.
    TicketId,
    "ticket_id"
);

define_id!(
    /// Identifier of a ticket category.
    TicketTypeId,
    "ticket_type_id"
);
