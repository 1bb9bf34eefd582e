//! Booking repository port.
//!
//! Defines the contract for reading and writing booking records. The booking
//! store is the only component that mutates bookings.
//!
//! # Design
//!
//! - **One booking per user**: `find_by_user` returns "the" booking
//! - **Capacity at write time**: `insert` and `update_room` re-check the
//!   target room's capacity atomically with the write and fail with
//!   `ErrorCode::RoomFull` if the room filled up after the caller checked it
//!
//! # Example
//!
//! ```ignore
//! async fn move_user(
//!     repo: &dyn BookingRepository,
//!     user_id: &UserId,
//!     room_id: RoomId,
//! ) -> Result<Booking, DomainError> {
//!     let current = repo
//!         .find_by_user(user_id)
//!         .await?
//!         .ok_or_else(|| DomainError::new(ErrorCode::BookingNotFound, "no booking"))?;
//!     repo.update_room(current.id(), room_id).await
//! }
//! ```

use crate::domain::booking::{Booking, BookingWithRoom};
use crate::domain::foundation::{BookingId, DomainError, RoomId, UserId};
use async_trait::async_trait;

/// Repository port for booking persistence.
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Find the booking held by a user, with its room embedded.
    ///
    /// Returns `None` if the user holds no booking.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<BookingWithRoom>, DomainError>;

    /// Count bookings currently assigned to a room.
    async fn count_for_room(&self, room_id: &RoomId) -> Result<i64, DomainError>;

    /// Create a booking linking a user to a room.
    ///
    /// # Errors
    ///
    /// - `RoomFull` if the room has no capacity left at write time
    /// - `BookingExists` if the user already holds a booking
    /// - `RoomNotFound` if the room does not exist
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, user_id: &UserId, room_id: &RoomId) -> Result<Booking, DomainError>;

    /// Reassign an existing booking to another room.
    ///
    /// # Errors
    ///
    /// - `RoomFull` if the room has no capacity left at write time
    /// - `BookingNotFound` if the booking does not exist
    /// - `RoomNotFound` if the room does not exist
    /// - `DatabaseError` on persistence failure
    async fn update_room(
        &self,
        booking_id: BookingId,
        room_id: &RoomId,
    ) -> Result<Booking, DomainError>;
}
