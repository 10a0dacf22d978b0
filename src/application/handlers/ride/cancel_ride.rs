//! CancelRideHandler - driver-initiated ride cancellation cascade.
//!
//! One atomic unit flips the ride to cancelled and every booking on it
//! with it. Seats are deliberately not reconciled: the ride leaves the
//! available pool entirely, so restoring its counter would be meaningless.

use std::sync::Arc;

use crate::domain::booking::RideCancelled;
use crate::domain::foundation::{
    DomainError, ErrorCode, EventId, RideId, SerializableDomainEvent, Timestamp, UserId,
};
use crate::ports::{BookingLedger, BookingStore, BookingTx, EventPublisher, RideInventory};

/// Command to cancel a published ride.
#[derive(Debug, Clone)]
pub struct CancelRideCommand {
    pub ride_id: RideId,
    pub driver_id: UserId,
}

/// Result of a successful cancellation.
#[derive(Debug, Clone)]
pub struct CancelRideResult {
    pub bookings_cancelled: u64,
}

/// Handler for the ride cancellation cascade.
pub struct CancelRideHandler {
    store: Arc<dyn BookingStore>,
    events: Arc<dyn EventPublisher>,
}

impl CancelRideHandler {
    pub fn new(store: Arc<dyn BookingStore>, events: Arc<dyn EventPublisher>) -> Self {
        Self { store, events }
    }

    pub async fn handle(&self, cmd: CancelRideCommand) -> Result<CancelRideResult, DomainError> {
        let mut tx = self.store.begin().await?;

        // Scheduled and owned by the caller, or nothing. Absent, already
        // cancelled, and not-yours are indistinguishable to the caller.
        let ride = tx
            .lock_scheduled_ride_owned(&cmd.ride_id, &cmd.driver_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::NotFound,
                    "Ride not found or you do not have permission to cancel it",
                )
            })?;

        tx.mark_ride_cancelled(ride.id()).await?;
        let bookings_cancelled = tx.cancel_bookings_for_ride(ride.id()).await?;
        tx.commit().await?;

        let event = RideCancelled {
            event_id: EventId::new(),
            ride_id: *ride.id(),
            driver_id: cmd.driver_id,
            bookings_cancelled,
            cancelled_at: Timestamp::now(),
        };
        if let Err(e) = self.events.publish(event.to_envelope()).await {
            tracing::warn!(error = %e, ride_id = %ride.id(), "Failed to deliver ride.cancelled");
        }

        Ok(CancelRideResult { bookings_cancelled })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemoryBookingStore;
    use crate::domain::booking::{Booking, BookingStatus};
    use crate::domain::foundation::{BookingId, ErrorCode, VehicleId};
    use crate::domain::ride::{Ride, RideStatus};

    async fn seed_ride_with_bookings(
        store: &InMemoryBookingStore,
        driver: UserId,
        confirmed: usize,
    ) -> RideId {
        let mut ride = Ride::publish(
            RideId::new(),
            driver,
            VehicleId::new(),
            "Pune".to_string(),
            "Nashik".to_string(),
            Timestamp::now().plus_hours(8),
            4,
            15_000,
            false,
        )
        .unwrap();
        for _ in 0..confirmed {
            ride.take_seat().unwrap();
        }
        let ride_id = *ride.id();
        store.seed_ride(ride).await;

        let mut tx = store.begin().await.unwrap();
        for _ in 0..confirmed {
            tx.insert_booking(&Booking::confirm(BookingId::new(), ride_id, UserId::new()))
                .await
                .unwrap();
        }
        tx.commit().await.unwrap();
        ride_id
    }

    #[tokio::test]
    async fn cascade_cancels_ride_and_all_bookings_without_touching_seats() {
        let store = Arc::new(InMemoryBookingStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let driver = UserId::new();
        let ride_id = seed_ride_with_bookings(&store, driver, 3).await;

        let handler = CancelRideHandler::new(store.clone(), bus.clone());
        let result = handler
            .handle(CancelRideCommand { ride_id, driver_id: driver })
            .await
            .unwrap();

        assert_eq!(result.bookings_cancelled, 3);

        let ride = store.ride(&ride_id).await.unwrap();
        assert_eq!(ride.status(), RideStatus::Cancelled);
        // available_seats untouched: 4 - 3 = 1 before and after.
        assert_eq!(ride.available_seats(), 1);

        for booking in store.bookings_for_ride(&ride_id).await {
            assert_eq!(booking.status(), BookingStatus::Cancelled);
        }
        assert!(bus.has_event("ride.cancelled"));
    }

    #[tokio::test]
    async fn non_owner_gets_not_found() {
        let store = Arc::new(InMemoryBookingStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let ride_id = seed_ride_with_bookings(&store, UserId::new(), 1).await;

        let handler = CancelRideHandler::new(store.clone(), bus);
        let err = handler
            .handle(CancelRideCommand {
                ride_id,
                driver_id: UserId::new(),
            })
            .await
            .unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(
            store.ride(&ride_id).await.unwrap().status(),
            RideStatus::Scheduled
        );
    }

    #[tokio::test]
    async fn cancelling_twice_is_not_found() {
        let store = Arc::new(InMemoryBookingStore::new());
        let bus = Arc::new(InMemoryEventBus::new());
        let driver = UserId::new();
        let ride_id = seed_ride_with_bookings(&store, driver, 0).await;

        let handler = CancelRideHandler::new(store.clone(), bus);
        handler
            .handle(CancelRideCommand { ride_id, driver_id: driver })
            .await
            .unwrap();

        let err = handler
            .handle(CancelRideCommand { ride_id, driver_id: driver })
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
