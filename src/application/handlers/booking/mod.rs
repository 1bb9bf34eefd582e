//! Booking handlers.
//!
//! The two checks are shared building blocks; the three handlers compose
//! them into the booking operations.

mod create_booking;
mod get_booking;
mod update_booking;
mod verify_room;
mod verify_ticket;

#[cfg(test)]
pub(crate) mod test_support;

pub use create_booking::{CreateBookingCommand, CreateBookingHandler, CreateBookingResult};
pub use get_booking::{GetBookingHandler, GetBookingQuery};
pub use update_booking::{UpdateBookingCommand, UpdateBookingHandler, UpdateBookingResult};
pub use verify_room::RoomCapacityCheck;
pub use verify_ticket::TicketEligibilityCheck;
