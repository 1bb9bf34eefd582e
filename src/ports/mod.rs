//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the booking core and the outside world. Adapters implement these ports.
//!
//! ## Booking Ports
//!
//! - `BookingRepository` - Reads and writes booking records
//! - `RoomReader` - Resolves rooms by id
//! - `EnrollmentReader` / `TicketReader` - Resolve a user's ticket
//!
//! ## Auth Ports
//!
//! - `SessionValidator` - Turns a bearer token into a caller
//! - `SessionStore` - Confirms a token has a live session

mod booking_repository;
mod room_reader;
mod session_validator;
mod ticket_reader;

pub use booking_repository::BookingRepository;
pub use room_reader::RoomReader;
pub use session_validator::{SessionStore, SessionValidator};
pub use ticket_reader::{EnrollmentReader, TicketReader};
