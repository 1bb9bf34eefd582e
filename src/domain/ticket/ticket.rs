//! Ticket, ticket type, and enrollment records.
//!
//! These are owned by the ticketing side of the system; the booking core only
//! reads them.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::{
    EnrollmentId, Timestamp, TicketId, TicketTypeId, UserId, ValidationError,
};

/// Payment state of a purchased ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Ticket held but not yet paid for.
    Reserved,

    /// Ticket fully paid.
    Paid,
}

impl TicketStatus {
    /// Returns the storage representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            TicketStatus::Reserved => "RESERVED",
            TicketStatus::Paid => "PAID",
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TicketStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "RESERVED" => Ok(TicketStatus::Reserved),
            "PAID" => Ok(TicketStatus::Paid),
            other => Err(ValidationError::invalid_format(
                "ticket_status",
                format!("unknown status '{}'", other),
            )),
        }
    }
}

/// Category of ticket; decides whether the holder may book a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketType {
    pub id: TicketTypeId,
    pub name: String,
    /// Price in whole currency units.
    pub price: i32,
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A purchased ticket with its type embedded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub enrollment_id: EnrollmentId,
    pub status: TicketStatus,
    pub ticket_type: TicketType,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user's registration for the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub user_id: UserId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
