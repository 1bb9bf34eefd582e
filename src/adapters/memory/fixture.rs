//! Seed data for running the service without PostgreSQL.
//!
//! A fixture is a JSON document listing hotels with their rooms and the
//! attendees with their tickets:
//!
//! ```json
//! {
//!   "hotels": [{ "id": 1, "rooms": [{ "name": "101", "capacity": 2 }] }],
//!   "attendees": [{
//!     "userId": 1,
//!     "name": "Ada",
//!     "ticket": { "isRemote": false, "includesHotel": true, "status": "PAID" }
//!   }]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::domain::foundation::{DomainError, ErrorCode, HotelId, UserId};
use crate::domain::ticket::TicketStatus;

use super::InMemoryStore;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub hotels: Vec<HotelFixture>,
    #[serde(default)]
    pub attendees: Vec<AttendeeFixture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelFixture {
    pub id: i32,
    pub rooms: Vec<RoomFixture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomFixture {
    pub name: String,
    pub capacity: i32,
}

/// An enrolled user. Without a ticket the user can sign in but never book.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeFixture {
    pub user_id: i32,
    pub name: String,
    #[serde(default)]
    pub ticket: Option<TicketFixture>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketFixture {
    pub is_remote: bool,
    pub includes_hotel: bool,
    pub status: TicketStatus,
}

impl Fixture {
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        serde_json::from_str(json).map_err(|e| {
            DomainError::new(ErrorCode::ValidationFailed, format!("Invalid fixture: {}", e))
        })
    }

    /// Reads a fixture file.
    pub fn load(path: &Path) -> Result<Self, DomainError> {
        let json = std::fs::read_to_string(path).map_err(|e| {
            DomainError::new(
                ErrorCode::InternalError,
                format!("Failed to read fixture {}: {}", path.display(), e),
            )
        })?;
        Self::from_json(&json)
    }

    /// One hotel and one attendee per ticket kind.
    pub fn demo() -> Self {
        let room = |name: &str, capacity| RoomFixture {
            name: name.to_string(),
            capacity,
        };
        let attendee = |user_id, name: &str, is_remote, includes_hotel, status| AttendeeFixture {
            user_id,
            name: name.to_string(),
            ticket: Some(TicketFixture {
                is_remote,
                includes_hotel,
                status,
            }),
        };

        Self {
            hotels: vec![HotelFixture {
                id: 1,
                rooms: vec![room("Single", 1), room("Double", 2), room("Triple", 3)],
            }],
            attendees: vec![
                attendee(1, "Ada", false, true, TicketStatus::Paid),
                attendee(2, "Grace", false, true, TicketStatus::Paid),
                attendee(3, "Linus", true, false, TicketStatus::Paid),
                attendee(4, "Barbara", false, false, TicketStatus::Paid),
                attendee(5, "Ken", false, true, TicketStatus::Reserved),
            ],
        }
    }
}

impl InMemoryStore {
    /// Loads every hotel room and attendee in the fixture.
    ///
    /// Returns the attendees' user ids in fixture order.
    pub async fn seed(&self, fixture: &Fixture) -> Result<Vec<UserId>, DomainError> {
        for hotel in &fixture.hotels {
            let hotel_id = HotelId::new(hotel.id)?;
            for room in &hotel.rooms {
                self.add_room(hotel_id, room.name.clone(), room.capacity)
                    .await?;
            }
        }

        let mut users = Vec::with_capacity(fixture.attendees.len());
        for attendee in &fixture.attendees {
            let user_id = UserId::new(attendee.user_id)?;
            let enrollment = self.add_enrollment(user_id, attendee.name.clone()).await?;
            if let Some(ticket) = &attendee.ticket {
                self.add_ticket(
                    enrollment.id,
                    ticket.is_remote,
                    ticket.includes_hotel,
                    ticket.status,
                )
                .await?;
            }
            users.push(user_id);
        }

        tracing::debug!(
            hotels = fixture.hotels.len(),
            attendees = users.len(),
            "Seeded in-memory store"
        );
        Ok(users)
    }
}
