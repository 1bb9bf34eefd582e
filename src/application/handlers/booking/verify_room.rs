//! RoomCapacityCheck - Resolves a room and checks it has a free slot.

use std::sync::Arc;

use crate::domain::booking::{BookingError, ForbiddenReason, NotFoundKind, Room};
use crate::domain::foundation::RoomId;
use crate::ports::{BookingRepository, RoomReader};

/// Resolves a room and compares its booking count against capacity.
#[derive(Clone)]
pub struct RoomCapacityCheck {
    rooms: Arc<dyn RoomReader>,
    bookings: Arc<dyn BookingRepository>,
}

impl RoomCapacityCheck {
    pub fn new(rooms: Arc<dyn RoomReader>, bookings: Arc<dyn BookingRepository>) -> Self {
        Self { rooms, bookings }
    }

    /// Returns the room if it can take one more booking.
    ///
    /// # Errors
    ///
    /// - `NotFound(Room)` if the room does not exist
    /// - `Forbidden(RoomFull)` if existing bookings already reach capacity
    pub async fn verify(&self, room_id: &RoomId) -> Result<Room, BookingError> {
        let room = self
            .rooms
            .find_by_id(room_id)
            .await?
            .ok_or(BookingError::not_found(NotFoundKind::Room))?;

        let existing = self.bookings.count_for_room(&room.id).await?;
        if !room.has_vacancy(existing) {
            tracing::debug!(room_id = %room.id, capacity = room.capacity, existing, "Room is full");
            return Err(BookingError::forbidden(ForbiddenReason::RoomFull));
        }

        Ok(room)
    }
}
