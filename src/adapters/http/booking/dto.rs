//! HTTP DTOs for booking endpoints.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::booking::Booking;

/// Request to book a seat.
#[derive(Debug, Clone, Deserialize)]
pub struct BookSeatRequest {
    pub ride_id: Uuid,
}

/// A committed booking.
#[derive(Debug, Clone, Serialize)]
pub struct BookingResponse {
    pub booking_id: String,
    pub ride_id: String,
    pub status: String,
    pub message: String,
}

impl BookingResponse {
    pub fn confirmed(booking: &Booking) -> Self {
        Self {
            booking_id: booking.id().to_string(),
            ride_id: booking.ride_id().to_string(),
            status: booking.status().to_string(),
            message: "Booking successful! View your ride in the dashboard".to_string(),
        }
    }
}

/// Response for a booking cancellation.
#[derive(Debug, Clone, Serialize)]
pub struct CancelBookingResponse {
    pub booking_id: String,
    pub message: String,
}
