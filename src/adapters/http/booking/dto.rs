//! HTTP DTOs for booking endpoints.
//!
//! Field names follow the public API: camelCase, with the room nested under
//! a capitalized `Room` key.

use serde::{Deserialize, Serialize};

use crate::domain::booking::{BookingWithRoom, Room};
use crate::domain::foundation::{BookingId, RoomId};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Body of `POST /booking` and `PUT /booking/:bookingId`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomRequest {
    #[serde(default)]
    pub room_id: Option<i64>,
}

impl RoomRequest {
    /// Validates the requested room id, which must be a positive integer.
    pub fn room_id(&self) -> Result<RoomId, String> {
        let raw = self.room_id.ok_or_else(|| "roomId is required".to_string())?;
        i32::try_from(raw)
            .ok()
            .and_then(|value| RoomId::new(value).ok())
            .ok_or_else(|| "roomId must be a positive integer".to_string())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Room as embedded in a booking response.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomResponse {
    pub id: i32,
    pub name: String,
    pub capacity: i32,
    pub hotel_id: i32,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Room> for RoomResponse {
    fn from(room: Room) -> Self {
        Self {
            id: room.id.value(),
            name: room.name,
            capacity: room.capacity,
            hotel_id: room.hotel_id.value(),
            created_at: room.created_at.to_rfc3339(),
            updated_at: room.updated_at.to_rfc3339(),
        }
    }
}

/// Response for `GET /booking`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookingResponse {
    pub id: i32,
    #[serde(rename = "Room")]
    pub room: RoomResponse,
}

impl From<BookingWithRoom> for BookingResponse {
    fn from(found: BookingWithRoom) -> Self {
        Self {
            id: found.id().value(),
            room: RoomResponse::from(found.room),
        }
    }
}

/// Response for successful create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingIdResponse {
    pub booking_id: i32,
}

impl From<BookingId> for BookingIdResponse {
    fn from(id: BookingId) -> Self {
        Self {
            booking_id: id.value(),
        }
    }
}
