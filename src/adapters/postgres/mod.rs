//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresBookingRepository` - Bookings, with capacity enforced at write
//! - `PostgresRoomReader` - Room lookups
//! - `PostgresEnrollmentReader` / `PostgresTicketReader` - Ticket resolution
//! - `PostgresSessionStore` - Session token lookups for auth

mod booking_repository;
mod room_reader;
mod session_store;
mod ticket_reader;

pub use booking_repository::PostgresBookingRepository;
pub use room_reader::PostgresRoomReader;
pub use session_store::PostgresSessionStore;
pub use ticket_reader::{PostgresEnrollmentReader, PostgresTicketReader};

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

fn database_error(context: &str, e: sqlx::Error) -> DomainError {
    DomainError::new(ErrorCode::DatabaseError, format!("{}: {}", context, e))
}

/// Converts a stored integer key into its identifier type.
fn stored_id<T>(value: i32, column: &str) -> Result<T, DomainError>
where
    T: TryFrom<i32, Error = ValidationError>,
{
    T::try_from(value).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} in storage: {}", column, e),
        )
    })
}

/// Checks a stored room capacity is positive.
fn stored_capacity(value: i32, column: &str) -> Result<i32, DomainError> {
    if value <= 0 {
        return Err(DomainError::new(
            ErrorCode::DatabaseError,
            format!("Invalid {} in storage: {}", column, value),
        ));
    }
    Ok(value)
}
