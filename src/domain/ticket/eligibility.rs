//! Room booking eligibility rules for tickets.
//!
//! A ticket entitles its holder to a hotel room only when it is an in-person
//! ticket, includes hotel accommodation, and has been paid for. Rules are
//! checked in that order and the first violation is reported.

use std::fmt;

use serde::Serialize;

use super::{Ticket, TicketStatus};

/// Why a ticket does not entitle its holder to a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IneligibleReason {
    Remote,
    NoHotel,
    Unpaid,
}

impl IneligibleReason {
    pub fn message(&self) -> &'static str {
        match self {
            IneligibleReason::Remote => "ticket is remote",
            IneligibleReason::NoHotel => "ticket has no hotel",
            IneligibleReason::Unpaid => "ticket is unpaid",
        }
    }
}

impl fmt::Display for IneligibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Checks whether `ticket` allows booking a room.
pub fn check_booking_eligibility(ticket: &Ticket) -> Result<(), IneligibleReason> {
    if ticket.ticket_type.is_remote {
        return Err(IneligibleReason::Remote);
    }
    if !ticket.ticket_type.includes_hotel {
        return Err(IneligibleReason::NoHotel);
    }
    if ticket.status != TicketStatus::Paid {
        return Err(IneligibleReason::Unpaid);
    }
    Ok(())
}
