//! PostgreSQL implementation of RoomReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::booking::Room;
use crate::domain::foundation::{DomainError, RoomId, Timestamp};
use crate::ports::RoomReader;

use super::{database_error, stored_capacity, stored_id};

pub struct PostgresRoomReader {
    pool: PgPool,
}

impl PostgresRoomReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct RoomRow {
    id: i32,
    name: String,
    capacity: i32,
    hotel_id: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<RoomRow> for Room {
    type Error = DomainError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Room {
            id: stored_id(row.id, "rooms.id")?,
            name: row.name,
            capacity: stored_capacity(row.capacity, "rooms.capacity")?,
            hotel_id: stored_id(row.hotel_id, "rooms.hotel_id")?,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl RoomReader for PostgresRoomReader {
    async fn find_by_id(&self, room_id: &RoomId) -> Result<Option<Room>, DomainError> {
        let row: Option<RoomRow> = sqlx::query_as(
            r#"
            SELECT id, name, capacity, hotel_id, created_at, updated_at
            FROM rooms
            WHERE id = $1
            "#,
        )
        .bind(room_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch room", e))?;

        row.map(Room::try_from).transpose()
    }
}
