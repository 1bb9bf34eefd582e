//! Booking-specific error types.
//!
//! Every failure of a booking operation falls in one of two domain kinds,
//! plus a pass-through for storage failures.
//!
//! # HTTP Status Mapping
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | NotFound | 404 |
//! | Forbidden | 403 |
//! | Infrastructure | 500 |

use crate::domain::foundation::{DomainError, ErrorCode};
use crate::domain::ticket::IneligibleReason;

/// The record that could not be resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundKind {
    Enrollment,
    Ticket,
    Room,
    Booking,
}

impl NotFoundKind {
    fn label(&self) -> &'static str {
        match self {
            NotFoundKind::Enrollment => "enrollment",
            NotFoundKind::Ticket => "ticket",
            NotFoundKind::Room => "room",
            NotFoundKind::Booking => "booking",
        }
    }
}

/// Why the caller may not perform the booking operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForbiddenReason {
    /// The caller's ticket does not include a bookable room.
    Ineligible(IneligibleReason),

    /// The target room has no free capacity.
    RoomFull,

    /// An update was requested by a user with no booking.
    NoExistingBooking,

    /// A create was requested by a user who already holds a booking.
    AlreadyBooked,

    /// The booking id in an update is not the caller's booking.
    NotBookingOwner,
}

impl ForbiddenReason {
    pub fn message(&self) -> &'static str {
        match self {
            ForbiddenReason::Ineligible(reason) => reason.message(),
            ForbiddenReason::RoomFull => "room is full",
            ForbiddenReason::NoExistingBooking => "user does not have a booking yet",
            ForbiddenReason::AlreadyBooked => "user already has a booking",
            ForbiddenReason::NotBookingOwner => "booking does not belong to user",
        }
    }
}

/// Booking operation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingError {
    /// A required record does not exist.
    NotFound(NotFoundKind),

    /// The operation is not allowed for this caller or room.
    Forbidden(ForbiddenReason),

    /// Storage failure, propagated unchanged.
    Infrastructure(String),
}

impl BookingError {
    pub fn not_found(kind: NotFoundKind) -> Self {
        BookingError::NotFound(kind)
    }

    pub fn forbidden(reason: ForbiddenReason) -> Self {
        BookingError::Forbidden(reason)
    }

    pub fn ineligible(reason: IneligibleReason) -> Self {
        BookingError::Forbidden(ForbiddenReason::Ineligible(reason))
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        BookingError::Infrastructure(message.into())
    }

    pub fn is_forbidden(&self) -> bool {
        matches!(self, BookingError::Forbidden(_))
    }

    /// Returns the error code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            BookingError::NotFound(NotFoundKind::Room) => ErrorCode::RoomNotFound,
            BookingError::NotFound(_) => ErrorCode::BookingNotFound,
            BookingError::Forbidden(ForbiddenReason::RoomFull) => ErrorCode::RoomFull,
            BookingError::Forbidden(ForbiddenReason::AlreadyBooked) => ErrorCode::BookingExists,
            BookingError::Forbidden(_) => ErrorCode::Forbidden,
            BookingError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }

    /// Returns a user-facing error message.
    pub fn message(&self) -> String {
        match self {
            BookingError::NotFound(kind) => format!("{} not found", kind.label()),
            BookingError::Forbidden(reason) => reason.message().to_string(),
            BookingError::Infrastructure(msg) => format!("Error: {}", msg),
        }
    }
}

impl std::fmt::Display for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for BookingError {}

impl From<DomainError> for BookingError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::RoomFull => BookingError::Forbidden(ForbiddenReason::RoomFull),
            ErrorCode::BookingExists => BookingError::Forbidden(ForbiddenReason::AlreadyBooked),
            ErrorCode::RoomNotFound => BookingError::NotFound(NotFoundKind::Room),
            ErrorCode::BookingNotFound => BookingError::NotFound(NotFoundKind::Booking),
            _ => BookingError::Infrastructure(err.to_string()),
        }
    }
}
