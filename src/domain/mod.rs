//! Domain layer containing business rules and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, errors, auth)
//! - `ticket` - Tickets, enrollments, and booking eligibility
//! - `booking` - Bookings, rooms, capacity, and booking errors

pub mod booking;
pub mod foundation;
pub mod ticket;
