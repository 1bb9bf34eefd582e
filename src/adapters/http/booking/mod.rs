//! HTTP adapter for booking endpoints.
//!
//! - `GET /booking` - Get the caller's booking
//! - `POST /booking` - Create a booking
//! - `PUT /booking/:bookingId` - Change the booked room

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{BookingIdResponse, BookingResponse, RoomRequest, RoomResponse};
pub use handlers::{BookingApiError, BookingAppState};
pub use routes::booking_routes;
