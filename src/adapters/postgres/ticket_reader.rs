//! PostgreSQL implementations of EnrollmentReader and TicketReader.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, EnrollmentId, ErrorCode, Timestamp, UserId};
use crate::domain::ticket::{Enrollment, Ticket, TicketStatus, TicketType};
use crate::ports::{EnrollmentReader, TicketReader};

use super::{database_error, stored_id};

pub struct PostgresEnrollmentReader {
    pool: PgPool,
}

impl PostgresEnrollmentReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EnrollmentRow {
    id: i32,
    user_id: i32,
    name: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<EnrollmentRow> for Enrollment {
    type Error = DomainError;

    fn try_from(row: EnrollmentRow) -> Result<Self, Self::Error> {
        Ok(Enrollment {
            id: stored_id(row.id, "enrollments.id")?,
            user_id: stored_id(row.user_id, "enrollments.user_id")?,
            name: row.name,
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl EnrollmentReader for PostgresEnrollmentReader {
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Enrollment>, DomainError> {
        let row: Option<EnrollmentRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, name, created_at, updated_at
            FROM enrollments
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch enrollment", e))?;

        row.map(Enrollment::try_from).transpose()
    }
}

pub struct PostgresTicketReader {
    pool: PgPool,
}

impl PostgresTicketReader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Ticket joined with its ticket type.
#[derive(Debug, sqlx::FromRow)]
struct TicketRow {
    id: i32,
    enrollment_id: i32,
    status: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    type_id: i32,
    type_name: String,
    type_price: i32,
    is_remote: bool,
    includes_hotel: bool,
    type_created_at: DateTime<Utc>,
    type_updated_at: DateTime<Utc>,
}

fn parse_status(s: &str) -> Result<TicketStatus, DomainError> {
    s.parse().map_err(|_| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid ticket status value: {}", s),
        )
    })
}

impl TryFrom<TicketRow> for Ticket {
    type Error = DomainError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Ticket {
            id: stored_id(row.id, "tickets.id")?,
            enrollment_id: stored_id(row.enrollment_id, "tickets.enrollment_id")?,
            status: parse_status(&row.status)?,
            ticket_type: TicketType {
                id: stored_id(row.type_id, "ticket_types.id")?,
                name: row.type_name,
                price: row.type_price,
                is_remote: row.is_remote,
                includes_hotel: row.includes_hotel,
                created_at: Timestamp::from_datetime(row.type_created_at),
                updated_at: Timestamp::from_datetime(row.type_updated_at),
            },
            created_at: Timestamp::from_datetime(row.created_at),
            updated_at: Timestamp::from_datetime(row.updated_at),
        })
    }
}

#[async_trait]
impl TicketReader for PostgresTicketReader {
    async fn find_by_enrollment(
        &self,
        enrollment_id: &EnrollmentId,
    ) -> Result<Option<Ticket>, DomainError> {
        let row: Option<TicketRow> = sqlx::query_as(
            r#"
            SELECT
                t.id, t.enrollment_id, t.status, t.created_at, t.updated_at,
                tt.id AS type_id,
                tt.name AS type_name,
                tt.price AS type_price,
                tt.is_remote,
                tt.includes_hotel,
                tt.created_at AS type_created_at,
                tt.updated_at AS type_updated_at
            FROM tickets t
            JOIN ticket_types tt ON tt.id = t.ticket_type_id
            WHERE t.enrollment_id = $1
            "#,
        )
        .bind(enrollment_id.value())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| database_error("Failed to fetch ticket", e))?;

        row.map(Ticket::try_from).transpose()
    }
}
