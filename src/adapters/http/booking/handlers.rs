//! HTTP handlers for booking endpoints.
//!
//! These handlers connect Axum routes to the booking command/query handlers.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::ErrorResponse;
use crate::adapters::memory::InMemoryStore;
use crate::application::handlers::booking::{
    CreateBookingCommand, CreateBookingHandler, GetBookingHandler, GetBookingQuery,
    RoomCapacityCheck, TicketEligibilityCheck, UpdateBookingCommand, UpdateBookingHandler,
};
use crate::domain::booking::BookingError;
use crate::domain::foundation::{BookingId, ErrorCode};
use crate::ports::{BookingRepository, EnrollmentReader, RoomReader, TicketReader};

use super::dto::{BookingIdResponse, BookingResponse, RoomRequest};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// Cloned for each request; every port is behind an `Arc`.
#[derive(Clone)]
pub struct BookingAppState {
    pub bookings: Arc<dyn BookingRepository>,
    pub rooms: Arc<dyn RoomReader>,
    pub enrollments: Arc<dyn EnrollmentReader>,
    pub tickets: Arc<dyn TicketReader>,
}

impl BookingAppState {
    /// Wires every port to one in-memory store.
    pub fn in_memory(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            bookings: store.clone(),
            rooms: store.clone(),
            enrollments: store.clone(),
            tickets: store,
        }
    }

    fn ticket_check(&self) -> TicketEligibilityCheck {
        TicketEligibilityCheck::new(self.enrollments.clone(), self.tickets.clone())
    }

    fn room_check(&self) -> RoomCapacityCheck {
        RoomCapacityCheck::new(self.rooms.clone(), self.bookings.clone())
    }

    pub fn get_booking_handler(&self) -> GetBookingHandler {
        GetBookingHandler::new(self.bookings.clone())
    }

    pub fn create_booking_handler(&self) -> CreateBookingHandler {
        CreateBookingHandler::new(self.bookings.clone(), self.ticket_check(), self.room_check())
    }

    pub fn update_booking_handler(&self) -> UpdateBookingHandler {
        UpdateBookingHandler::new(self.bookings.clone(), self.ticket_check(), self.room_check())
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// GET /booking - The caller's booking with its room
pub async fn get_booking(
    State(state): State<BookingAppState>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<BookingResponse>, BookingApiError> {
    let found = state
        .get_booking_handler()
        .handle(GetBookingQuery { user_id: user.id })
        .await?;

    Ok(Json(BookingResponse::from(found)))
}

/// POST /booking - Book a room for the caller
pub async fn create_booking(
    State(state): State<BookingAppState>,
    RequireAuth(user): RequireAuth,
    payload: Result<Json<RoomRequest>, JsonRejection>,
) -> Result<Json<BookingIdResponse>, BookingApiError> {
    let Json(request) = payload?;
    let room_id = request.room_id().map_err(BookingApiError::BadRequest)?;

    let result = state
        .create_booking_handler()
        .handle(CreateBookingCommand {
            user_id: user.id,
            room_id,
        })
        .await?;

    Ok(Json(BookingIdResponse::from(result.booking.id)))
}

/// PUT /booking/:bookingId - Move the caller's booking to another room
pub async fn update_booking(
    State(state): State<BookingAppState>,
    RequireAuth(user): RequireAuth,
    Path(booking_id): Path<String>,
    payload: Result<Json<RoomRequest>, JsonRejection>,
) -> Result<Json<BookingIdResponse>, BookingApiError> {
    let booking_id: BookingId = booking_id
        .parse()
        .map_err(|_| BookingApiError::BadRequest("bookingId must be a positive integer".into()))?;
    let Json(request) = payload?;
    let room_id = request.room_id().map_err(BookingApiError::BadRequest)?;

    let result = state
        .update_booking_handler()
        .handle(UpdateBookingCommand {
            user_id: user.id,
            booking_id,
            room_id,
        })
        .await?;

    Ok(Json(BookingIdResponse::from(result.booking.id)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error wrapper for HTTP responses.
#[derive(Debug)]
pub enum BookingApiError {
    /// Request shape was rejected before reaching the booking core.
    BadRequest(String),
    Booking(BookingError),
}

impl From<BookingError> for BookingApiError {
    fn from(err: BookingError) -> Self {
        Self::Booking(err)
    }
}

impl From<JsonRejection> for BookingApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for BookingApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            BookingApiError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new(ErrorCode::ValidationFailed.to_string(), message.clone()),
            ),
            BookingApiError::Booking(err @ BookingError::NotFound(_)) => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new(err.code().to_string(), err.message()),
            ),
            BookingApiError::Booking(err @ BookingError::Forbidden(reason)) => {
                tracing::warn!(reason = reason.message(), "Booking forbidden");
                (
                    StatusCode::FORBIDDEN,
                    ErrorResponse::new(err.code().to_string(), err.message()),
                )
            }
            BookingApiError::Booking(BookingError::Infrastructure(message)) => {
                tracing::error!(error = %message, "Booking storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorResponse::new(ErrorCode::InternalError.to_string(), "Internal server error"),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
