//! In-Memory Booking Store
//!
//! Keeps users' enrollments, tickets, rooms, bookings and sessions behind one
//! `tokio::sync::RwLock`, so a write re-checks capacity and uniqueness
//! atomically just like the PostgreSQL transaction does.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::booking::{room_has_vacancy, Booking, BookingWithRoom, Room};
use crate::domain::foundation::{
    BookingId, DomainError, EnrollmentId, ErrorCode, HotelId, RoomId, TicketId, TicketTypeId,
    Timestamp, UserId,
};
use crate::domain::ticket::{Enrollment, Ticket, TicketStatus, TicketType};
use crate::ports::{
    BookingRepository, EnrollmentReader, RoomReader, SessionStore, TicketReader,
};

#[derive(Debug, Default)]
struct State {
    enrollments: Vec<Enrollment>,
    tickets: Vec<Ticket>,
    rooms: HashMap<RoomId, Room>,
    bookings: Vec<Booking>,
    sessions: HashMap<String, UserId>,
    sequence: i32,
}

impl State {
    fn next_id(&mut self) -> Result<i32, DomainError> {
        self.sequence = self
            .sequence
            .checked_add(1)
            .ok_or_else(|| DomainError::database("Identifier sequence exhausted"))?;
        Ok(self.sequence)
    }

    fn count_for_room(&self, room_id: &RoomId) -> i64 {
        self.bookings.iter().filter(|b| &b.room_id == room_id).count() as i64
    }

    fn ensure_vacancy(&self, room_id: &RoomId) -> Result<(), DomainError> {
        let room = self
            .rooms
            .get(room_id)
            .ok_or_else(|| DomainError::new(ErrorCode::RoomNotFound, "Room not found"))?;
        if !room_has_vacancy(room.capacity, self.count_for_room(room_id)) {
            return Err(DomainError::new(ErrorCode::RoomFull, "Room is full")
                .with_detail("room_id", room_id.to_string()));
        }
        Ok(())
    }
}

/// Store implementing all booking and session ports in memory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<State>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enrolls a user and returns the enrollment.
    pub async fn add_enrollment(
        &self,
        user_id: UserId,
        name: impl Into<String>,
    ) -> Result<Enrollment, DomainError> {
        let mut state = self.state.write().await;
        let now = Timestamp::now();
        let enrollment = Enrollment {
            id: EnrollmentId::new(state.next_id()?)?,
            user_id,
            name: name.into(),
            created_at: now,
            updated_at: now,
        };
        state.enrollments.push(enrollment.clone());
        Ok(enrollment)
    }

    /// Issues a ticket of the given kind for an enrollment.
    pub async fn add_ticket(
        &self,
        enrollment_id: EnrollmentId,
        is_remote: bool,
        includes_hotel: bool,
        status: TicketStatus,
    ) -> Result<Ticket, DomainError> {
        let mut state = self.state.write().await;
        let now = Timestamp::now();
        let ticket_type = TicketType {
            id: TicketTypeId::new(state.next_id()?)?,
            name: ticket_type_name(is_remote, includes_hotel).to_string(),
            price: if is_remote { 100 } else { 250 },
            is_remote,
            includes_hotel,
            created_at: now,
            updated_at: now,
        };
        let ticket = Ticket {
            id: TicketId::new(state.next_id()?)?,
            enrollment_id,
            status,
            ticket_type,
            created_at: now,
            updated_at: now,
        };
        state.tickets.push(ticket.clone());
        Ok(ticket)
    }

    /// Adds a room to a hotel and returns it.
    pub async fn add_room(
        &self,
        hotel_id: HotelId,
        name: impl Into<String>,
        capacity: i32,
    ) -> Result<Room, DomainError> {
        if capacity <= 0 {
            return Err(DomainError::validation(
                "capacity",
                format!("Room capacity must be positive, got {}", capacity),
            ));
        }
        let mut state = self.state.write().await;
        let now = Timestamp::now();
        let room = Room {
            id: RoomId::new(state.next_id()?)?,
            name: name.into(),
            capacity,
            hotel_id,
            created_at: now,
            updated_at: now,
        };
        state.rooms.insert(room.id, room.clone());
        Ok(room)
    }

    /// Registers a live session token for a user.
    pub async fn add_session(&self, token: impl Into<String>, user_id: UserId) {
        self.state.write().await.sessions.insert(token.into(), user_id);
    }

    pub async fn booking_count(&self) -> usize {
        self.state.read().await.bookings.len()
    }
}

fn ticket_type_name(is_remote: bool, includes_hotel: bool) -> &'static str {
    match (is_remote, includes_hotel) {
        (true, _) => "Online",
        (false, true) => "In-person with hotel",
        (false, false) => "In-person",
    }
}

#[async_trait]
impl BookingRepository for InMemoryStore {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<BookingWithRoom>, DomainError> {
        let state = self.state.read().await;
        let Some(booking) = state.bookings.iter().find(|b| &b.user_id == user_id) else {
            return Ok(None);
        };
        let room = state.rooms.get(&booking.room_id).cloned().ok_or_else(|| {
            DomainError::database(format!("Booking {} references a missing room", booking.id))
        })?;
        Ok(Some(BookingWithRoom {
            booking: booking.clone(),
            room,
        }))
    }

    async fn count_for_room(&self, room_id: &RoomId) -> Result<i64, DomainError> {
        Ok(self.state.read().await.count_for_room(room_id))
    }

    async fn insert(&self, user_id: &UserId, room_id: &RoomId) -> Result<Booking, DomainError> {
        let mut state = self.state.write().await;
        state.ensure_vacancy(room_id)?;
        if state.bookings.iter().any(|b| &b.user_id == user_id) {
            return Err(DomainError::new(
                ErrorCode::BookingExists,
                "User already has a booking",
            ));
        }

        let now = Timestamp::now();
        let booking = Booking {
            id: BookingId::new(state.next_id()?)?,
            user_id: *user_id,
            room_id: *room_id,
            created_at: now,
            updated_at: now,
        };
        state.bookings.push(booking.clone());
        Ok(booking)
    }

    async fn update_room(
        &self,
        booking_id: BookingId,
        room_id: &RoomId,
    ) -> Result<Booking, DomainError> {
        let mut state = self.state.write().await;
        state.ensure_vacancy(room_id)?;

        let booking = state
            .bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| {
                DomainError::new(ErrorCode::BookingNotFound, "Booking not found")
                    .with_detail("booking_id", booking_id.to_string())
            })?;
        booking.room_id = *room_id;
        booking.updated_at = Timestamp::now();
        Ok(booking.clone())
    }
}

#[async_trait]
impl RoomReader for InMemoryStore {
    async fn find_by_id(&self, room_id: &RoomId) -> Result<Option<Room>, DomainError> {
        Ok(self.state.read().await.rooms.get(room_id).cloned())
    }
}

#[async_trait]
impl EnrollmentReader for InMemoryStore {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Enrollment>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .enrollments
            .iter()
            .find(|e| &e.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl TicketReader for InMemoryStore {
    async fn find_by_enrollment(
        &self,
        enrollment_id: &EnrollmentId,
    ) -> Result<Option<Ticket>, DomainError> {
        Ok(self
            .state
            .read()
            .await
            .tickets
            .iter()
            .find(|t| &t.enrollment_id == enrollment_id)
            .cloned())
    }
}

#[async_trait]
impl SessionStore for InMemoryStore {
    async fn find_user_by_token(&self, token: &str) -> Result<Option<UserId>, DomainError> {
        Ok(self.state.read().await.sessions.get(token).copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i32) -> UserId {
        UserId::new(id).unwrap()
    }

    fn hotel() -> HotelId {
        HotelId::new(1).unwrap()
    }

    #[tokio::test]
    async fn insert_then_find_by_user_joins_room() {
        let store = InMemoryStore::new();
        let room = store.add_room(hotel(), "101", 2).await.unwrap();

        let booking = store.insert(&user(1), &room.id).await.unwrap();
        let found = BookingRepository::find_by_user(&store, &user(1))
            .await
            .unwrap()
            .unwrap();

        assert_eq!(found.id(), booking.id);
        assert_eq!(found.room, room);
        assert_eq!(store.count_for_room(&room.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn add_room_rejects_non_positive_capacity() {
        let store = InMemoryStore::new();

        let err = store.add_room(hotel(), "Closet", 0).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn insert_rejects_full_room() {
        let store = InMemoryStore::new();
        let room = store.add_room(hotel(), "101", 1).await.unwrap();
        store.insert(&user(1), &room.id).await.unwrap();

        let err = store.insert(&user(2), &room.id).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::RoomFull);
        assert_eq!(store.booking_count().await, 1);
    }

    #[tokio::test]
    async fn insert_rejects_second_booking_for_user() {
        let store = InMemoryStore::new();
        let room = store.add_room(hotel(), "101", 3).await.unwrap();
        store.insert(&user(1), &room.id).await.unwrap();

        let err = store.insert(&user(1), &room.id).await.unwrap_err();

        assert_eq!(err.code, ErrorCode::BookingExists);
    }

    #[tokio::test]
    async fn concurrent_inserts_never_exceed_capacity() {
        let store = InMemoryStore::new();
        let room = store.add_room(hotel(), "101", 3).await.unwrap();

        let mut tasks = Vec::new();
        for id in 1..=10 {
            let store = store.clone();
            let room_id = room.id;
            tasks.push(tokio::spawn(async move {
                store.insert(&user(id), &room_id).await
            }));
        }

        let mut accepted = 0;
        for task in tasks {
            if task.await.unwrap().is_ok() {
                accepted += 1;
            }
        }

        assert_eq!(accepted, 3);
        assert_eq!(store.count_for_room(&room.id).await.unwrap(), 3);
    }

    #[tokio::test]
    async fn update_room_keeps_id_and_moves_count() {
        let store = InMemoryStore::new();
        let from = store.add_room(hotel(), "101", 1).await.unwrap();
        let to = store.add_room(hotel(), "102", 1).await.unwrap();
        let booking = store.insert(&user(1), &from.id).await.unwrap();

        let moved = store.update_room(booking.id, &to.id).await.unwrap();

        assert_eq!(moved.id, booking.id);
        assert_eq!(store.count_for_room(&from.id).await.unwrap(), 0);
        assert_eq!(store.count_for_room(&to.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn update_room_fails_for_unknown_booking() {
        let store = InMemoryStore::new();
        let room = store.add_room(hotel(), "101", 1).await.unwrap();

        let err = store
            .update_room(BookingId::new(42).unwrap(), &room.id)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::BookingNotFound);
    }

    #[tokio::test]
    async fn resolves_ticket_through_enrollment() {
        let store = InMemoryStore::new();
        let enrollment = store.add_enrollment(user(1), "Ada").await.unwrap();
        store
            .add_ticket(enrollment.id, false, true, TicketStatus::Paid)
            .await
            .unwrap();

        let found = EnrollmentReader::find_by_user(&store, &user(1))
            .await
            .unwrap()
            .unwrap();
        let ticket = store.find_by_enrollment(&found.id).await.unwrap().unwrap();

        assert_eq!(ticket.status, TicketStatus::Paid);
        assert!(ticket.ticket_type.includes_hotel);
    }

    #[tokio::test]
    async fn sessions_resolve_to_users() {
        let store = InMemoryStore::new();
        store.add_session("abc", user(4)).await;

        assert_eq!(store.find_user_by_token("abc").await.unwrap(), Some(user(4)));
        assert_eq!(store.find_user_by_token("xyz").await.unwrap(), None);
    }
}
