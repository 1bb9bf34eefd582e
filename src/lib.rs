//! Conference Booking - Hotel room reservations for conference attendees
//!
//! Attendees holding a paid, in-person ticket with hotel included can book
//! one room, look it up, and move it to another room while capacity allows.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
