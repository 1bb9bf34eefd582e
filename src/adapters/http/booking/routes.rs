//! Axum router configuration for booking endpoints.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{create_booking, get_booking, update_booking, BookingAppState};

/// Create the booking API router.
///
/// # Routes (all require authentication)
/// - `GET /booking` - The caller's booking with its room
/// - `POST /booking` - Book a room
/// - `PUT /booking/:bookingId` - Move the caller's booking to another room
pub fn booking_routes() -> Router<BookingAppState> {
    Router::new()
        .route("/booking", get(get_booking).post(create_booking))
        .route("/booking/:booking_id", put(update_booking))
}
