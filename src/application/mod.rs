//! Application layer - Commands, Queries, and Handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Reads go through query handlers, writes through command handlers.

pub mod handlers;

pub use handlers::{
    CreateBookingCommand, CreateBookingHandler, CreateBookingResult, GetBookingHandler,
    GetBookingQuery, RoomCapacityCheck, TicketEligibilityCheck, UpdateBookingCommand,
    UpdateBookingHandler, UpdateBookingResult,
};
