//! Booking domain module.
//!
//! # Module Structure
//!
//! - `booking` - Booking record and its room-embedded view
//! - `room` - Room record and the capacity rule
//! - `errors` - BookingError and its NotFound/Forbidden kinds

mod booking;
mod errors;
mod room;

pub use booking::{Booking, BookingWithRoom};
pub use errors::{BookingError, ForbiddenReason, NotFoundKind};
pub use room::{room_has_vacancy, Room};
