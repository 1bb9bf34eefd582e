//! Ticketing records read by the booking core.
//!
//! # Module Structure
//!
//! - `ticket` - Ticket, TicketType, TicketStatus, and Enrollment records
//! - `eligibility` - Rules deciding whether a ticket allows a room booking

mod eligibility;
mod ticket;

pub use eligibility::{check_booking_eligibility, IneligibleReason};
pub use ticket::{Enrollment, Ticket, TicketStatus, TicketType};
