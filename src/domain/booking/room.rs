//! Hotel room record and its capacity rule.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{HotelId, RoomId, Timestamp};

/// A bookable hotel room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub name: String,
    /// Maximum number of bookings the room accepts.
    pub capacity: i32,
    pub hotel_id: HotelId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Room {
    /// Returns true if one more booking fits given `existing_bookings`.
    pub fn has_vacancy(&self, existing_bookings: i64) -> bool {
        room_has_vacancy(self.capacity, existing_bookings)
    }
}

/// A room accepts a new booking only while its booking count is strictly
/// below capacity. Non-positive capacities never accept.
pub fn room_has_vacancy(capacity: i32, existing_bookings: i64) -> bool {
    capacity > 0 && existing_bookings < i64::from(capacity)
}
