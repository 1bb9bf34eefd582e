//! Booking record: one user's assignment to one room.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{BookingId, RoomId, Timestamp, UserId};

use super::Room;

/// A user's room assignment. Each user holds at most one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    pub user_id: UserId,
    pub room_id: RoomId,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A booking with the room it is assigned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingWithRoom {
    pub booking: Booking,
    pub room: Room,
}

impl BookingWithRoom {
    pub fn id(&self) -> BookingId {
        self.booking.id
    }
}
