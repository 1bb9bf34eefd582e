//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod booking;

pub use booking::{
    CreateBookingCommand, CreateBookingHandler, CreateBookingResult, GetBookingHandler,
    GetBookingQuery, RoomCapacityCheck, TicketEligibilityCheck, UpdateBookingCommand,
    UpdateBookingHandler, UpdateBookingResult,
};
