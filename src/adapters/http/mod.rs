//! HTTP adapters - REST API implementations.

pub mod booking;
pub mod middleware;

mod error;
mod router;

pub use booking::{booking_routes, BookingAppState};
pub use error::ErrorResponse;
pub use router::app_router;
