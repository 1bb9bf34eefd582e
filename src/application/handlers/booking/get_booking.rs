//! GetBookingHandler - Query handler for the caller's current booking.

use std::sync::Arc;

use crate::domain::booking::{BookingError, BookingWithRoom, NotFoundKind};
use crate::domain::foundation::UserId;
use crate::ports::BookingRepository;

/// Query to fetch the booking held by a user.
#[derive(Debug, Clone)]
pub struct GetBookingQuery {
    pub user_id: UserId,
}

/// Handler for fetching a user's booking with its room.
pub struct GetBookingHandler {
    bookings: Arc<dyn BookingRepository>,
}

impl GetBookingHandler {
    pub fn new(bookings: Arc<dyn BookingRepository>) -> Self {
        Self { bookings }
    }

    #[tracing::instrument(skip(self))]
    pub async fn handle(&self, query: GetBookingQuery) -> Result<BookingWithRoom, BookingError> {
        self.bookings
            .find_by_user(&query.user_id)
            .await?
            .ok_or(BookingError::not_found(NotFoundKind::Booking))
    }
}
