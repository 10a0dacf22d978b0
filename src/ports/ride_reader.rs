//! RideReader port - read models for search and dashboard listings.
//!
//! Readers return flat records shaped for the API instead of aggregates;
//! they never mutate anything.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::foundation::{BookingId, DomainError, RideId, Timestamp, UserId};
use crate::domain::ride::RideStatus;
use crate::domain::user::Gender;

/// Filters for ride search. Origin/destination match as substrings.
#[derive(Debug, Clone, Default)]
pub struct RideSearchQuery {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

/// A searchable ride with its driver and vehicle context.
#[derive(Debug, Clone, Serialize)]
pub struct RideSearchResult {
    pub ride_id: RideId,
    pub origin: String,
    pub destination: String,
    pub departure_time: Timestamp,
    pub available_seats: u32,
    pub price_per_seat: i64,
    pub female_only: bool,
    pub driver_id: UserId,
    pub driver_name: String,
    pub driver_gender: Gender,
    pub vehicle_model: Option<String>,
    pub registration_number: Option<String>,
}

/// A confirmed passenger on one of the driver's rides.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmedPassenger {
    pub user_id: UserId,
    pub username: String,
}

/// One of the driver's own published rides, with its confirmed passengers.
#[derive(Debug, Clone, Serialize)]
pub struct PublishedRideSummary {
    pub ride_id: RideId,
    pub origin: String,
    pub destination: String,
    pub departure_time: Timestamp,
    pub total_seats: u32,
    pub available_seats: u32,
    pub price_per_seat: i64,
    pub female_only: bool,
    pub status: RideStatus,
    pub passengers: Vec<ConfirmedPassenger>,
}

/// One of the passenger's active bookings, with ride and driver context.
#[derive(Debug, Clone, Serialize)]
pub struct BookedRideSummary {
    pub booking_id: BookingId,
    pub ride_id: RideId,
    pub origin: String,
    pub destination: String,
    pub departure_time: Timestamp,
    pub price_per_seat: i64,
    pub seats_booked: u32,
    pub driver_name: String,
    pub driver_phone: Option<String>,
}

/// Read models over rides and bookings.
#[async_trait]
pub trait RideReader: Send + Sync {
    /// Searches scheduled future rides with seats available, soonest
    /// departure first.
    async fn search(
        &self,
        query: &RideSearchQuery,
        now: Timestamp,
    ) -> Result<Vec<RideSearchResult>, DomainError>;

    /// Lists the driver's scheduled rides, latest departure first, each
    /// with its confirmed passengers.
    async fn published_by_driver(
        &self,
        driver_id: &UserId,
    ) -> Result<Vec<PublishedRideSummary>, DomainError>;

    /// Lists the passenger's confirmed bookings, soonest departure first.
    async fn booked_by_passenger(
        &self,
        passenger_id: &UserId,
    ) -> Result<Vec<BookedRideSummary>, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_object_safe(_: &dyn RideReader) {}
}
