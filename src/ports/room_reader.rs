//! Room reader port.
//!
//! Rooms are managed by the hotel side of the system; the booking core only
//! resolves them by id.

use crate::domain::booking::Room;
use crate::domain::foundation::{DomainError, RoomId};
use async_trait::async_trait;

/// Reader port for room lookups.
#[async_trait]
pub trait RoomReader: Send + Sync {
    /// Find a room by its id.
    ///
    /// Returns `None` if no such room exists.
    async fn find_by_id(&self, room_id: &RoomId) -> Result<Option<Room>, DomainError>;
}
