//! HTTP routes for booking endpoints.

use axum::{
    routing::{delete, post},
    Router,
};

use super::handlers::{book_seat, cancel_booking, BookingHandlers};

/// Creates the booking router. All endpoints require authentication.
pub fn booking_routes(handlers: BookingHandlers) -> Router {
    Router::new()
        .route("/book", post(book_seat))
        .route("/:booking_id", delete(cancel_booking))
        .with_state(handlers)
}
