//! PublishRideHandler - creates a new ride offer.

use std::sync::Arc;

use crate::domain::foundation::{DomainError, ErrorCode, RideId, Timestamp, UserId};
use crate::domain::ride::Ride;
use crate::ports::{RideRepository, VehicleRepository};

/// A driver may not have two scheduled rides departing this close together.
const OVERLAP_BUFFER_HOURS: i64 = 2;

/// Command to publish a ride.
#[derive(Debug, Clone)]
pub struct PublishRideCommand {
    pub driver_id: UserId,
    pub origin: String,
    pub destination: String,
    pub departure_time: Timestamp,
    pub total_seats: u32,
    pub price_per_seat: i64,
    pub female_only: bool,
}

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishRideResult {
    pub ride: Ride,
}

/// Handler for publishing rides.
pub struct PublishRideHandler {
    rides: Arc<dyn RideRepository>,
    vehicles: Arc<dyn VehicleRepository>,
}

impl PublishRideHandler {
    pub fn new(rides: Arc<dyn RideRepository>, vehicles: Arc<dyn VehicleRepository>) -> Self {
        Self { rides, vehicles }
    }

    pub async fn handle(&self, cmd: PublishRideCommand) -> Result<PublishRideResult, DomainError> {
        if self
            .rides
            .has_overlapping_scheduled(&cmd.driver_id, cmd.departure_time, OVERLAP_BUFFER_HOURS)
            .await?
        {
            return Err(DomainError::new(
                ErrorCode::ScheduleOverlap,
                "You already have a ride scheduled around this time",
            ));
        }

        // Rides are always offered on a registered vehicle; the driver's
        // first one is used.
        let vehicle = self
            .vehicles
            .first_by_owner(&cmd.driver_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::VehicleRequired,
                    "No vehicle found. Please register a vehicle first",
                )
            })?;

        let ride = Ride::publish(
            RideId::new(),
            cmd.driver_id,
            *vehicle.id(),
            cmd.origin,
            cmd.destination,
            cmd.departure_time,
            cmd.total_seats,
            cmd.price_per_seat,
            cmd.female_only,
        )?;

        self.rides.insert(&ride).await?;

        Ok(PublishRideResult { ride })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryRideRepository, InMemoryVehicleRepository};
    use crate::domain::foundation::VehicleId;
    use crate::domain::vehicle::Vehicle;

    fn command(driver: UserId) -> PublishRideCommand {
        PublishRideCommand {
            driver_id: driver,
            origin: "Pune".to_string(),
            destination: "Mumbai".to_string(),
            departure_time: Timestamp::now().plus_hours(12),
            total_seats: 3,
            price_per_seat: 30_000,
            female_only: false,
        }
    }

    async fn fixture_with_vehicle(driver: UserId) -> (Arc<InMemoryRideRepository>, PublishRideHandler) {
        let rides = Arc::new(InMemoryRideRepository::new());
        let vehicles = Arc::new(InMemoryVehicleRepository::new());
        vehicles
            .insert(
                &Vehicle::register(VehicleId::new(), driver, "Swift".to_string(), "MH12AB1234")
                    .unwrap(),
            )
            .await
            .unwrap();
        let handler = PublishRideHandler::new(rides.clone(), vehicles);
        (rides, handler)
    }

    #[tokio::test]
    async fn publish_stores_ride_with_full_availability() {
        let driver = UserId::new();
        let (rides, handler) = fixture_with_vehicle(driver).await;

        let result = handler.handle(command(driver)).await.unwrap();

        assert_eq!(result.ride.available_seats(), 3);
        assert_eq!(rides.all().len(), 1);
    }

    #[tokio::test]
    async fn publish_requires_a_registered_vehicle() {
        let rides = Arc::new(InMemoryRideRepository::new());
        let vehicles = Arc::new(InMemoryVehicleRepository::new());
        let handler = PublishRideHandler::new(rides, vehicles);

        let err = handler.handle(command(UserId::new())).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::VehicleRequired);
    }

    #[tokio::test]
    async fn publish_rejects_overlapping_schedule() {
        let driver = UserId::new();
        let (_rides, handler) = fixture_with_vehicle(driver).await;

        handler.handle(command(driver)).await.unwrap();

        let mut second = command(driver);
        second.departure_time = second.departure_time.plus_hours(1);
        let err = handler.handle(second).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::ScheduleOverlap);
    }

    #[tokio::test]
    async fn publish_allows_distant_schedule() {
        let driver = UserId::new();
        let (rides, handler) = fixture_with_vehicle(driver).await;

        handler.handle(command(driver)).await.unwrap();

        let mut second = command(driver);
        second.departure_time = second.departure_time.plus_hours(6);
        handler.handle(second).await.unwrap();
        assert_eq!(rides.all().len(), 2);
    }
}
