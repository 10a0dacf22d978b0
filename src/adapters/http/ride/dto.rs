//! HTTP DTOs for ride endpoints.
//!
//! Search and listing responses reuse the reader port's records directly;
//! they are already shaped for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ride::Ride;

/// Request to publish a ride.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishRideRequest {
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub available_seats: u32,
    pub price_per_seat: i64,
    #[serde(default)]
    pub is_female_only: bool,
}

/// Query parameters for ride search.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// A freshly published ride.
#[derive(Debug, Clone, Serialize)]
pub struct RideResponse {
    pub ride_id: String,
    pub origin: String,
    pub destination: String,
    pub departure_time: DateTime<Utc>,
    pub available_seats: u32,
    pub price_per_seat: i64,
    pub is_female_only: bool,
}

impl From<&Ride> for RideResponse {
    fn from(ride: &Ride) -> Self {
        Self {
            ride_id: ride.id().to_string(),
            origin: ride.origin().to_string(),
            destination: ride.destination().to_string(),
            departure_time: *ride.departure_time().as_datetime(),
            available_seats: ride.available_seats(),
            price_per_seat: ride.price_per_seat(),
            is_female_only: ride.is_female_only(),
        }
    }
}

/// Response for a ride cancellation.
#[derive(Debug, Clone, Serialize)]
pub struct CancelRideResponse {
    pub message: String,
    pub bookings_cancelled: u64,
}
