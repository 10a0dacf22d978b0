//! HTTP handlers for booking endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::booking::{
    ReleaseSeatCommand, ReleaseSeatHandler, ReserveSeatCommand, ReserveSeatHandler,
};
use crate::domain::foundation::{BookingId, RideId};

use super::dto::{BookSeatRequest, BookingResponse, CancelBookingResponse};

/// Handler bundle for the booking router.
#[derive(Clone)]
pub struct BookingHandlers {
    reserve: Arc<ReserveSeatHandler>,
    release: Arc<ReleaseSeatHandler>,
}

impl BookingHandlers {
    pub fn new(reserve: Arc<ReserveSeatHandler>, release: Arc<ReleaseSeatHandler>) -> Self {
        Self { reserve, release }
    }
}

/// POST /api/bookings/book
pub async fn book_seat(
    State(handlers): State<BookingHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<BookSeatRequest>,
) -> Response {
    let cmd = ReserveSeatCommand {
        ride_id: RideId::from_uuid(req.ride_id),
        passenger_id: user.id,
    };

    match handlers.reserve.handle(cmd).await {
        Ok(result) => (
            StatusCode::CREATED,
            Json(BookingResponse::confirmed(&result.booking)),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/bookings/:booking_id
pub async fn cancel_booking(
    State(handlers): State<BookingHandlers>,
    RequireAuth(user): RequireAuth,
    Path(booking_id): Path<Uuid>,
) -> Response {
    let cmd = ReleaseSeatCommand {
        booking_id: BookingId::from_uuid(booking_id),
        passenger_id: user.id,
    };

    match handlers.release.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(CancelBookingResponse {
                booking_id: result.booking.id().to_string(),
                message: "Booking cancelled successfully".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
