//! HTTP handlers for ride endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use uuid::Uuid;

use crate::adapters::http::error::error_response;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::ride::{
    CancelRideCommand, CancelRideHandler, ListBookedRidesHandler, ListPublishedRidesHandler,
    PublishRideCommand, PublishRideHandler, SearchRidesHandler,
};
use crate::domain::foundation::{RideId, Timestamp};
use crate::ports::RideSearchQuery;

use super::dto::{CancelRideResponse, PublishRideRequest, RideResponse, SearchParams};

/// Handler bundle for the ride router.
#[derive(Clone)]
pub struct RideHandlers {
    publish: Arc<PublishRideHandler>,
    cancel: Arc<CancelRideHandler>,
    search: Arc<SearchRidesHandler>,
    published: Arc<ListPublishedRidesHandler>,
    booked: Arc<ListBookedRidesHandler>,
}

impl RideHandlers {
    pub fn new(
        publish: Arc<PublishRideHandler>,
        cancel: Arc<CancelRideHandler>,
        search: Arc<SearchRidesHandler>,
        published: Arc<ListPublishedRidesHandler>,
        booked: Arc<ListBookedRidesHandler>,
    ) -> Self {
        Self {
            publish,
            cancel,
            search,
            published,
            booked,
        }
    }
}

/// POST /api/rides/publish
pub async fn publish_ride(
    State(handlers): State<RideHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<PublishRideRequest>,
) -> Response {
    let cmd = PublishRideCommand {
        driver_id: user.id,
        origin: req.origin,
        destination: req.destination,
        departure_time: Timestamp::from_datetime(req.departure_time),
        total_seats: req.available_seats,
        price_per_seat: req.price_per_seat,
        female_only: req.is_female_only,
    };

    match handlers.publish.handle(cmd).await {
        Ok(result) => {
            (StatusCode::CREATED, Json(RideResponse::from(&result.ride))).into_response()
        }
        Err(e) => error_response(e),
    }
}

/// GET /api/rides/search - public, no authentication needed.
pub async fn search_rides(
    State(handlers): State<RideHandlers>,
    Query(params): Query<SearchParams>,
) -> Response {
    let query = RideSearchQuery {
        origin: params.origin,
        destination: params.destination,
    };

    match handlers.search.handle(query).await {
        Ok(results) => (StatusCode::OK, Json(results)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/rides/my-published
pub async fn my_published_rides(
    State(handlers): State<RideHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.published.handle(user.id).await {
        Ok(rides) => (StatusCode::OK, Json(rides)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /api/rides/my-booked
pub async fn my_booked_rides(
    State(handlers): State<RideHandlers>,
    RequireAuth(user): RequireAuth,
) -> Response {
    match handlers.booked.handle(user.id).await {
        Ok(rides) => (StatusCode::OK, Json(rides)).into_response(),
        Err(e) => error_response(e),
    }
}

/// DELETE /api/rides/:ride_id
pub async fn cancel_ride(
    State(handlers): State<RideHandlers>,
    RequireAuth(user): RequireAuth,
    Path(ride_id): Path<Uuid>,
) -> Response {
    let cmd = CancelRideCommand {
        ride_id: RideId::from_uuid(ride_id),
        driver_id: user.id,
    };

    match handlers.cancel.handle(cmd).await {
        Ok(result) => (
            StatusCode::OK,
            Json(CancelRideResponse {
                message: "Ride and all associated bookings have been cancelled".to_string(),
                bookings_cancelled: result.bookings_cancelled,
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}
