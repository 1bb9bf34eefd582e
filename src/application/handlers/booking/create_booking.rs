//! CreateBookingHandler - Command handler for booking a room.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, ForbiddenReason};
use crate::domain::foundation::{RoomId, UserId};
use crate::ports::BookingRepository;

use super::{RoomCapacityCheck, TicketEligibilityCheck};

/// Command to book a room for a user.
#[derive(Debug, Clone)]
pub struct CreateBookingCommand {
    pub user_id: UserId,
    pub room_id: RoomId,
}

/// Result of a successful booking.
#[derive(Debug, Clone)]
pub struct CreateBookingResult {
    pub booking: Booking,
}

/// Handler for creating bookings.
pub struct CreateBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    tickets: TicketEligibilityCheck,
    rooms: RoomCapacityCheck,
}

impl CreateBookingHandler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        tickets: TicketEligibilityCheck,
        rooms: RoomCapacityCheck,
    ) -> Self {
        Self {
            bookings,
            tickets,
            rooms,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn handle(
        &self,
        cmd: CreateBookingCommand,
    ) -> Result<CreateBookingResult, BookingError> {
        // 1. Ticket must entitle the user to a room
        self.tickets.verify(&cmd.user_id).await?;

        // 2. Room must exist and have a free slot
        let room = self.rooms.verify(&cmd.room_id).await?;

        // 3. One booking per user
        if self.bookings.find_by_user(&cmd.user_id).await?.is_some() {
            return Err(BookingError::forbidden(ForbiddenReason::AlreadyBooked));
        }

        // 4. Persist; the store re-checks capacity under its own lock
        let booking = self
            .bookings
            .insert(&cmd.user_id, &room.id)
            .await
            .map_err(|err| {
                let err = BookingError::from(err);
                if err.is_forbidden() {
                    tracing::warn!(user_id = %cmd.user_id, room_id = %room.id, %err, "Booking rejected at write");
                }
                err
            })?;

        tracing::info!(booking_id = %booking.id, user_id = %cmd.user_id, room_id = %room.id, "Booking created");

        Ok(CreateBookingResult { booking })
    }
}
