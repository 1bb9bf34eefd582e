//! PostgreSQL implementation of BookingRepository.
//!
//! Writes lock the target room row and re-count its bookings inside the same
//! transaction, so two requests racing for the last slot cannot both commit.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::booking::{room_has_vacancy, Booking, BookingWithRoom, Room};
use crate::domain::foundation::{BookingId, DomainError, ErrorCode, RoomId, Timestamp, UserId};
use crate::ports::BookingRepository;

use super::{database_error, stored_capacity, stored_id};

/// Constraint enforcing one booking per user.
const UNIQUE_USER_CONSTRAINT: &str = "bookings_user_id_key";

/// PostgreSQL implementation of the BookingRepository port.
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct BookingRow {
    id: i32,
    user_id: i32,
    room_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = DomainError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: stored_id(row.id, "bookings.id")?,
            user_id: stored_id(row.user_id, "bookings.user_id")?,
            room_id: stored_id(row.room_id, "bookings.room_id")?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

/// Booking joined with its room, as returned by `find_by_user`.
#[derive(Debug, sqlx::FromRow)]
struct BookingWithRoomRow {
    id: i32,
    user_id: i32,
    room_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    room_name: String,
    room_capacity: i32,
    room_hotel_id: i32,
    room_created_at: DateTime<Utc>,
    room_updated_at: DateTime<Utc>,
}

impl TryFrom<BookingWithRoomRow> for BookingWithRoom {
    type Error = DomainError;

    fn try_from(row: BookingWithRoomRow) -> Result<Self, Self::Error> {
        let room = Room {
            id: stored_id(row.room_id, "rooms.id")?,
            name: row.room_name,
            capacity: stored_capacity(row.room_capacity, "rooms.capacity")?,
            hotel_id: stored_id(row.room_hotel_id, "rooms.hotel_id")?,
            created_at: Timestamp::from_datetime(row.room_created_at),
            updated_at: Timestamp::from_datetime(row.room_updated_at),
        };
        let booking = Booking::try_from(BookingRow {
            id: row.id,
            user_id: row.user_id,
            room_id: row.room_id,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })?;
        Ok(BookingWithRoom { booking, room })
    }
}

/// Maps a write failure, recognizing the one-booking-per-user constraint.
fn map_write_error(context: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db_err) = &e {
        if is_unique_user_violation(db_err.constraint()) {
            return DomainError::new(ErrorCode::BookingExists, "User already has a booking");
        }
    }
    database_error(context, e)
}

fn is_unique_user_violation(constraint: Option<&str>) -> bool {
    constraint == Some(UNIQUE_USER_CONSTRAINT)
}

/// Locks the room row and fails unless it can take one more booking.
async fn lock_room_with_vacancy(
    tx: &mut Transaction<'_, Postgres>,
    room_id: &RoomId,
) -> Result<(), DomainError> {
    let capacity: Option<(i32,)> =
        sqlx::query_as("SELECT capacity FROM rooms WHERE id = $1 FOR UPDATE")
            .bind(room_id.value())
            .fetch_optional(&mut **tx)
            .await
            .map_err(|e| database_error("Failed to lock room", e))?;

    let (capacity,) = capacity
        .ok_or_else(|| DomainError::new(ErrorCode::RoomNotFound, "Room not found"))?;
    let capacity = stored_capacity(capacity, "rooms.capacity")?;

    let (existing,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE room_id = $1")
        .bind(room_id.value())
        .fetch_one(&mut **tx)
        .await
        .map_err(|e| database_error("Failed to count bookings", e))?;

    if !room_has_vacancy(capacity, existing) {
        return Err(DomainError::new(ErrorCode::RoomFull, "Room is full")
            .with_detail("room_id", room_id.to_string()));
    }

    Ok(())
}

#[async_trait]
impl BookingRepository for PostgresBookingRepository {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<BookingWithRoom>, DomainError> {
        let row: Option<BookingWithRoomRow> = sqlx::query_as(
            r#"
            SELECT
                b.id, b.user_id, b.room_id, b.created_at, b.updated_at,
                r.name AS room_name,
                r.capacity AS room_capacity,
                r.hotel_id AS room_hotel_id,
                r.created_at AS room_created_at,
                r.updated_at AS room_updated_at
            FROM bookings b
            JOIN rooms r ON r.id = b.room_id
            WHERE b.user_id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch booking", e))?;

        row.map(BookingWithRoom::try_from).transpose()
    }

    async fn count_for_room(&self, room_id: &RoomId) -> Result<i64, DomainError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM bookings WHERE room_id = $1")
            .bind(room_id.value())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| database_error("Failed to count bookings", e))?;

        Ok(count)
    }

    async fn insert(&self, user_id: &UserId, room_id: &RoomId) -> Result<Booking, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to start transaction", e))?;

        lock_room_with_vacancy(&mut tx, room_id).await?;

        let row: BookingRow = sqlx::query_as(
            r#"
            INSERT INTO bookings (user_id, room_id)
            VALUES ($1, $2)
            RETURNING id, user_id, room_id, created_at, updated_at
            "#,
        )
        .bind(user_id.value())
        .bind(room_id.value())
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| map_write_error("Failed to insert booking", e))?;

        tx.commit()
            .await
            .map_err(|e| map_write_error("Failed to commit booking", e))?;

        Booking::try_from(row)
    }

    async fn update_room(
        &self,
        booking_id: BookingId,
        room_id: &RoomId,
    ) -> Result<Booking, DomainError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| database_error("Failed to start transaction", e))?;

        lock_room_with_vacancy(&mut tx, room_id).await?;

        let row: Option<BookingRow> = sqlx::query_as(
            r#"
            UPDATE bookings SET
                room_id = $2,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, user_id, room_id, created_at, updated_at
            "#,
        )
        .bind(booking_id.value())
        .bind(room_id.value())
        .fetch_optional(&mut *tx)
        .await
        .map_err(|e| map_write_error("Failed to update booking", e))?;

        let row = row.ok_or_else(|| {
            DomainError::new(ErrorCode::BookingNotFound, "Booking not found")
                .with_detail("booking_id", booking_id.to_string())
        })?;

        tx.commit()
            .await
            .map_err(|e| database_error("Failed to commit booking update", e))?;

        Booking::try_from(row)
    }
}
