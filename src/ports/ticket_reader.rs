//! Enrollment and ticket reader ports.
//!
//! Both records are owned by the registration and ticketing flows. The
//! booking core resolves user → enrollment → ticket to decide eligibility.

use crate::domain::foundation::{DomainError, EnrollmentId, UserId};
use crate::domain::ticket::{Enrollment, Ticket};
use async_trait::async_trait;

/// Reader port for enrollments.
#[async_trait]
pub trait EnrollmentReader: Send + Sync {
    /// Find the enrollment of a user.
    ///
    /// Returns `None` if the user never enrolled.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Enrollment>, DomainError>;
}

/// Reader port for tickets.
#[async_trait]
pub trait TicketReader: Send + Sync {
    /// Find the ticket bought under an enrollment, with its type embedded.
    ///
    /// Returns `None` if no ticket was bought.
    async fn find_by_enrollment(
        &self,
        enrollment_id: &EnrollmentId,
    ) -> Result<Option<Ticket>, DomainError>;
}
