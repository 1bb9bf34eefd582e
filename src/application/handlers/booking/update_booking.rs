//! UpdateBookingHandler - Command handler for moving a booking to another room.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingError, ForbiddenReason};
use crate::domain::foundation::{BookingId, RoomId, UserId};
use crate::ports::BookingRepository;

use super::{RoomCapacityCheck, TicketEligibilityCheck};

/// Command to move the caller's booking to a different room.
#[derive(Debug, Clone)]
pub struct UpdateBookingCommand {
    pub user_id: UserId,
    pub booking_id: BookingId,
    pub room_id: RoomId,
}

/// Result of a successful room change. The booking id is unchanged.
#[derive(Debug, Clone)]
pub struct UpdateBookingResult {
    pub booking: Booking,
}

/// Handler for updating bookings.
pub struct UpdateBookingHandler {
    bookings: Arc<dyn BookingRepository>,
    tickets: TicketEligibilityCheck,
    rooms: RoomCapacityCheck,
}

impl UpdateBookingHandler {
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
        cmd: UpdateBookingCommand,
    ) -> Result<UpdateBookingResult, BookingError> {
        // 1. Caller must already hold a booking
        let current = self
            .bookings
            .find_by_user(&cmd.user_id)
            .await?
            .ok_or(BookingError::forbidden(ForbiddenReason::NoExistingBooking))?;

        // 2. ... and it must be the one named in the request
        if current.id() != cmd.booking_id {
            return Err(BookingError::forbidden(ForbiddenReason::NotBookingOwner));
        }

        // 3. Ticket must still entitle the user to a room
        self.tickets.verify(&cmd.user_id).await?;

        // 4. Target room must exist and have a free slot
        let room = self.rooms.verify(&cmd.room_id).await?;

        // 5. Persist
        let booking = self
            .bookings
            .update_room(cmd.booking_id, &room.id)
            .await
            .map_err(BookingError::from)?;

        tracing::info!(
            booking_id = %booking.id,
            user_id = %cmd.user_id,
            from_room = %current.room.id,
            to_room = %room.id,
            "Booking moved"
        );

        Ok(UpdateBookingResult { booking })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::booking::test_support::*;
    use crate::domain::booking::NotFoundKind;
    use crate::domain::ticket::{IneligibleReason, TicketStatus};

    fn handler(world: &World) -> UpdateBookingHandler {
        UpdateBookingHandler::new(
            world.bookings.clone(),
            TicketEligibilityCheck::new(world.enrollments.clone(), world.tickets.clone()),
            RoomCapacityCheck::new(world.rooms.clone(), world.bookings.clone()),
        )
    }

    fn cmd(user_id: i32, booking: i32, room: i32) -> UpdateBookingCommand {
        UpdateBookingCommand {
            user_id: user(user_id),
            booking_id: booking_id(booking),
            room_id: room_id(room),
        }
    }

    fn booked_world() -> World {
        World::new()
            .with_eligible_user(user(1))
            .with_room(room_id(10), 1)
            .with_room(room_id(11), 2)
            .with_booking(booking_id(4), user(1), room_id(10))
    }

    #[tokio::test]
    async fn moves_booking_and_keeps_its_id() {
        let world = booked_world();

        let result = handler(&world).handle(cmd(1, 4, 11)).await.unwrap();

        assert_eq!(result.booking.id, booking_id(4));
        assert_eq!(result.booking.room_id, room_id(11));
        assert_eq!(world.bookings.bookings().len(), 1);
        assert_eq!(world.bookings.write_count(), 1);
    }

    #[tokio::test]
    async fn fails_forbidden_without_existing_booking() {
        let world = World::new()
            .with_eligible_user(user(1))
            .with_room(room_id(11), 2);

        let result = handler(&world).handle(cmd(1, 4, 11)).await;

        assert_eq!(result.unwrap_err(), BookingError::Forbidden(ForbiddenReason::NoExistingBooking));
        assert_eq!(world.bookings.write_count(), 0);
    }

    #[tokio::test]
    async fn existing_booking_check_runs_before_ticket_check() {
        // No booking and no enrollment: Forbidden, not NotFound.
        let world = World::new().with_room(room_id(11), 2);

        let result = handler(&world).handle(cmd(1, 4, 11)).await;

        assert_eq!(result.unwrap_err(), BookingError::Forbidden(ForbiddenReason::NoExistingBooking));
    }

    #[tokio::test]
    async fn fails_forbidden_for_someone_elses_booking_id() {
        let world = booked_world()
            .with_eligible_user(user(2))
            .with_booking(booking_id(5), user(2), room_id(11));

        let result = handler(&world).handle(cmd(1, 5, 11)).await;

        assert_eq!(result.unwrap_err(), BookingError::Forbidden(ForbiddenReason::NotBookingOwner));
        assert_eq!(world.bookings.write_count(), 0);
    }

    #[tokio::test]
    async fn fails_forbidden_when_ticket_no_longer_eligible() {
        let world = World::new()
            .with_ticket(user(1), false, true, TicketStatus::Reserved)
            .with_room(room_id(10), 1)
            .with_room(room_id(11), 2)
            .with_booking(booking_id(4), user(1), room_id(10));

        let result = handler(&world).handle(cmd(1, 4, 11)).await;

        assert_eq!(result.unwrap_err(), BookingError::ineligible(IneligibleReason::Unpaid));
    }

    #[tokio::test]
    async fn fails_not_found_for_unknown_target_room() {
        let world = booked_world();

        let result = handler(&world).handle(cmd(1, 4, 99)).await;

        assert_eq!(result.unwrap_err(), BookingError::NotFound(NotFoundKind::Room));
        assert_eq!(world.bookings.write_count(), 0);
    }

    #[tokio::test]
    async fn fails_forbidden_when_target_room_full() {
        let world = booked_world()
            .with_booking(booking_id(5), user(2), room_id(11))
            .with_booking(booking_id(6), user(3), room_id(11));

        let result = handler(&world).handle(cmd(1, 4, 11)).await;

        assert_eq!(result.unwrap_err(), BookingError::Forbidden(ForbiddenReason::RoomFull));
        assert_eq!(world.bookings.bookings()[0].room_id, room_id(10));
    }

    #[tokio::test]
    async fn same_room_counts_own_booking_against_capacity() {
        let world = booked_world();

        let result = handler(&world).handle(cmd(1, 4, 10)).await;

        assert_eq!(result.unwrap_err(), BookingError::Forbidden(ForbiddenReason::RoomFull));
    }

    #[tokio::test]
    async fn maps_room_filled_at_write_to_forbidden() {
        let world = booked_world();
        world.bookings.fill_rooms_at_write();

        let result = handler(&world).handle(cmd(1, 4, 11)).await;

        assert_eq!(result.unwrap_err(), BookingError::Forbidden(ForbiddenReason::RoomFull));
    }
}
