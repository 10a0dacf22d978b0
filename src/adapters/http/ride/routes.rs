//! HTTP routes for ride endpoints.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers::{
    cancel_ride, my_booked_rides, my_published_rides, publish_ride, search_rides, RideHandlers,
};

/// Creates the ride router. `/search` is public; the rest require
/// authentication.
pub fn ride_routes(handlers: RideHandlers) -> Router {
    Router::new()
        .route("/publish", post(publish_ride))
        .route("/search", get(search_rides))
        .route("/my-published", get(my_published_rides))
        .route("/my-booked", get(my_booked_rides))
        .route("/:ride_id", delete(cancel_ride))
        .with_state(handlers)
}
