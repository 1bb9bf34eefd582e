//! Mock ports shared by the booking handler tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::domain::booking::{Booking, BookingWithRoom, Room};
use crate::domain::foundation::{
    BookingId, DomainError, EnrollmentId, ErrorCode, HotelId, RoomId, TicketId, TicketTypeId,
    Timestamp, UserId,
};
use crate::domain::ticket::{Enrollment, Ticket, TicketStatus, TicketType};
use crate::ports::{BookingRepository, EnrollmentReader, RoomReader, TicketReader};

// ════════════════════════════════════════════════════════════════════════════════
// Mock Implementations
// ════════════════════════════════════════════════════════════════════════════════

pub struct MockRoomReader {
    rooms: Mutex<Vec<Room>>,
    fail_read: bool,
}

#[async_trait]
impl RoomReader for MockRoomReader {
    async fn find_by_id(&self, room_id: &RoomId) -> Result<Option<Room>, DomainError> {
        if self.fail_read {
            return Err(DomainError::database("Simulated read failure"));
        }
        Ok(self
            .rooms
            .lock()
            .unwrap()
            .iter()
            .find(|r| &r.id == room_id)
            .cloned())
    }
}

pub struct MockBookingRepository {
    bookings: Mutex<Vec<Booking>>,
    rooms: Arc<MockRoomReader>,
    writes: Mutex<usize>,
    fail_read: bool,
    full_at_write: Mutex<bool>,
}

impl MockBookingRepository {
    pub fn write_count(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    pub fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }

    /// Makes the next writes fail as if another request took the last slot.
    pub fn fill_rooms_at_write(&self) {
        *self.full_at_write.lock().unwrap() = true;
    }
}

#[async_trait]
impl BookingRepository for MockBookingRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<BookingWithRoom>, DomainError> {
        if self.fail_read {
            return Err(DomainError::database("Simulated read failure"));
        }
        let booking = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .find(|b| &b.user_id == user_id)
            .cloned();
        match booking {
            Some(booking) => {
                let room = self
                    .rooms
                    .find_by_id(&booking.room_id)
                    .await?
                    .ok_or_else(|| DomainError::new(ErrorCode::RoomNotFound, "dangling room"))?;
                Ok(Some(BookingWithRoom { booking, room }))
            }
            None => Ok(None),
        }
    }

    async fn count_for_room(&self, room_id: &RoomId) -> Result<i64, DomainError> {
        if self.fail_read {
            return Err(DomainError::database("Simulated read failure"));
        }
        Ok(self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| &b.room_id == room_id)
            .count() as i64)
    }

    async fn insert(&self, user_id: &UserId, room_id: &RoomId) -> Result<Booking, DomainError> {
        if *self.full_at_write.lock().unwrap() {
            return Err(DomainError::new(ErrorCode::RoomFull, "Room filled concurrently"));
        }
        let mut bookings = self.bookings.lock().unwrap();
        let next = bookings.iter().map(|b| b.id.value()).max().unwrap_or(0) + 1;
        let now = Timestamp::now();
        let booking = Booking {
            id: BookingId::new(next).unwrap(),
            user_id: *user_id,
            room_id: *room_id,
            created_at: now,
            updated_at: now,
        };
        bookings.push(booking.clone());
        *self.writes.lock().unwrap() += 1;
        Ok(booking)
    }

    async fn update_room(
        &self,
        booking_id: BookingId,
        room_id: &RoomId,
    ) -> Result<Booking, DomainError> {
        if *self.full_at_write.lock().unwrap() {
            return Err(DomainError::new(ErrorCode::RoomFull, "Room filled concurrently"));
        }
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == booking_id)
            .ok_or_else(|| DomainError::new(ErrorCode::BookingNotFound, "no booking"))?;
        booking.room_id = *room_id;
        booking.updated_at = Timestamp::now();
        *self.writes.lock().unwrap() += 1;
        Ok(booking.clone())
    }
}

pub struct MockEnrollmentReader {
    enrollments: Mutex<Vec<Enrollment>>,
    fail_read: bool,
}

#[async_trait]
impl EnrollmentReader for MockEnrollmentReader {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Enrollment>, DomainError> {
        if self.fail_read {
            return Err(DomainError::database("Simulated read failure"));
        }
        Ok(self
            .enrollments
            .lock()
            .unwrap()
            .iter()
            .find(|e| &e.user_id == user_id)
            .cloned())
    }
}

pub struct MockTicketReader {
    tickets: Mutex<Vec<Ticket>>,
    fail_read: bool,
}

#[async_trait]
impl TicketReader for MockTicketReader {
    async fn find_by_enrollment(
        &self,
        enrollment_id: &EnrollmentId,
    ) -> Result<Option<Ticket>, DomainError> {
        if self.fail_read {
            return Err(DomainError::database("Simulated read failure"));
        }
        Ok(self
            .tickets
            .lock()
            .unwrap()
            .iter()
            .find(|t| &t.enrollment_id == enrollment_id)
            .cloned())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Test World
// ════════════════════════════════════════════════════════════════════════════════

/// The set of mock ports a booking handler is built from.
pub struct World {
    pub bookings: Arc<MockBookingRepository>,
    pub rooms: Arc<MockRoomReader>,
    pub enrollments: Arc<MockEnrollmentReader>,
    pub tickets: Arc<MockTicketReader>,
}

impl World {
    pub fn new() -> Self {
        Self::build(false)
    }

    pub fn failing_reads() -> Self {
        Self::build(true)
    }

    fn build(fail_read: bool) -> Self {
        let rooms = Arc::new(MockRoomReader {
            rooms: Mutex::new(Vec::new()),
            fail_read,
        });
        Self {
            bookings: Arc::new(MockBookingRepository {
                bookings: Mutex::new(Vec::new()),
                rooms: rooms.clone(),
                writes: Mutex::new(0),
                fail_read,
                full_at_write: Mutex::new(false),
            }),
            rooms,
            enrollments: Arc::new(MockEnrollmentReader {
                enrollments: Mutex::new(Vec::new()),
                fail_read,
            }),
            tickets: Arc::new(MockTicketReader {
                tickets: Mutex::new(Vec::new()),
                fail_read,
            }),
        }
    }

    pub fn with_room(self, id: RoomId, capacity: i32) -> Self {
        let now = Timestamp::now();
        self.rooms.rooms.lock().unwrap().push(Room {
            id,
            name: format!("Room {}", id),
            capacity,
            hotel_id: HotelId::new(1).unwrap(),
            created_at: now,
            updated_at: now,
        });
        self
    }

    pub fn with_booking(self, id: BookingId, user_id: UserId, room_id: RoomId) -> Self {
        let now = Timestamp::now();
        self.bookings.bookings.lock().unwrap().push(Booking {
            id,
            user_id,
            room_id,
            created_at: now,
            updated_at: now,
        });
        self
    }

    pub fn with_enrollment_only(self, user_id: UserId) -> Self {
        let now = Timestamp::now();
        self.enrollments.enrollments.lock().unwrap().push(Enrollment {
            id: enrollment_for(user_id),
            user_id,
            name: format!("Attendee {}", user_id),
            created_at: now,
            updated_at: now,
        });
        self
    }

    pub fn with_ticket(
        self,
        user_id: UserId,
        is_remote: bool,
        includes_hotel: bool,
        status: TicketStatus,
    ) -> Self {
        let world = self.with_enrollment_only(user_id);
        let now = Timestamp::now();
        world.tickets.tickets.lock().unwrap().push(Ticket {
            id: TicketId::new(user_id.value()).unwrap(),
            enrollment_id: enrollment_for(user_id),
            status,
            ticket_type: TicketType {
                id: TicketTypeId::new(1).unwrap(),
                name: "Conference Pass".to_string(),
                price: 500,
                is_remote,
                includes_hotel,
                created_at: now,
                updated_at: now,
            },
            created_at: now,
            updated_at: now,
        });
        world
    }

    pub fn with_eligible_user(self, user_id: UserId) -> Self {
        self.with_ticket(user_id, false, true, TicketStatus::Paid)
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Test Helpers
// ════════════════════════════════════════════════════════════════════════════════

pub fn user(id: i32) -> UserId {
    UserId::new(id).unwrap()
}

pub fn room_id(id: i32) -> RoomId {
    RoomId::new(id).unwrap()
}

pub fn booking_id(id: i32) -> BookingId {
    BookingId::new(id).unwrap()
}

fn enrollment_for(user_id: UserId) -> EnrollmentId {
    EnrollmentId::new(user_id.value()).unwrap()
}
