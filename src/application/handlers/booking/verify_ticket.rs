//! TicketEligibilityCheck - Resolves a user's ticket and applies the booking
//! eligibility rules.

use std::sync::Arc;

use crate::domain::booking::{BookingError, NotFoundKind};
use crate::domain::foundation::UserId;
use crate::domain::ticket::{check_booking_eligibility, Ticket};
use crate::ports::{EnrollmentReader, TicketReader};

/// Resolves user → enrollment → ticket and checks the ticket allows a room.
///
/// Has no side effects.
#[derive(Clone)]
pub struct TicketEligibilityCheck {
    enrollments: Arc<dyn EnrollmentReader>,
    tickets: Arc<dyn TicketReader>,
}

impl TicketEligibilityCheck {
    pub fn new(enrollments: Arc<dyn EnrollmentReader>, tickets: Arc<dyn TicketReader>) -> Self {
        Self {
            enrollments,
            tickets,
        }
    }

    /// Returns the user's ticket if it entitles them to a room.
    ///
    /// # Errors
    ///
    /// - `NotFound(Enrollment)` if the user never enrolled
    /// - `NotFound(Ticket)` if the enrollment has no ticket
    /// - `Forbidden(Ineligible(_))` if the ticket is remote, has no hotel, or is unpaid
    pub async fn verify(&self, user_id: &UserId) -> Result<Ticket, BookingError> {
        let enrollment = self
            .enrollments
            .find_by_user(user_id)
            .await?
            .ok_or(BookingError::not_found(NotFoundKind::Enrollment))?;

        let ticket = self
            .tickets
            .find_by_enrollment(&enrollment.id)
            .await?
            .ok_or(BookingError::not_found(NotFoundKind::Ticket))?;

        check_booking_eligibility(&ticket).map_err(|reason| {
            tracing::debug!(user_id = %user_id, ticket_id = %ticket.id, %reason, "Ticket not eligible for booking");
            BookingError::ineligible(reason)
        })?;

        Ok(ticket)
    }
}
