//! ReleaseSeatHandler - cancels a confirmed booking and returns its seats.
//!
//! Lock order follows the ledger: the booking row is the first data access
//! inside the atomic unit, and the ride row lock is acquired by the seat
//! update. A missing booking, a cancelled booking, and someone else's
//! booking are all the same `NotFound` to the caller.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingCancelled};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, EventId, SerializableDomainEvent, Timestamp, UserId,
};
use crate::ports::{BookingLedger, BookingStore, BookingTx, EventPublisher, RideInventory};

/// Command to release a booked seat.
#[derive(Debug, Clone)]
pub struct ReleaseSeatCommand {
    pub booking_id: BookingId,
    pub passenger_id: UserId,
}

/// Result of a successful release.
#[derive(Debug, Clone)]
pub struct ReleaseSeatResult {
    pub booking: Booking,
}

/// Handler for releasing booked seats.
pub struct ReleaseSeatHandler {
    store: Arc<dyn BookingStore>,
    events: Arc<dyn EventPublisher>,
}

impl ReleaseSeatHandler {
    pub fn new(store: Arc<dyn BookingStore>, events: Arc<dyn EventPublisher>) -> Self {
        Self { store, events }
    }

    pub async fn handle(&self, cmd: ReleaseSeatCommand) -> Result<ReleaseSeatResult, DomainError> {
        let mut tx = self.store.begin().await?;

        // Confirmed + owned by the caller, or nothing. A second release of
        // the same booking finds no confirmed row and fails here, leaving
        // the seat count untouched.
        let booking = tx
            .lock_confirmed_booking(&cmd.booking_id, &cmd.passenger_id)
            .await?
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::NotFound,
                    "Booking not found or you do not have permission to cancel it",
                )
            })?;

        tx.cancel_booking(booking.id()).await?;
        tx.adjust_available_seats(booking.ride_id(), booking.seats_booked() as i64)
            .await?;
        tx.commit().await?;

        let event = BookingCancelled {
            event_id: EventId::new(),
            booking_id: *booking.id(),
            ride_id: *booking.ride_id(),
            passenger_id: cmd.passenger_id,
            seats_returned: booking.seats_booked(),
            cancelled_at: Timestamp::now(),
        };
        if let Err(e) = self.events.publish(event.to_envelope()).await {
            tracing::warn!(error = %e, booking_id = %booking.id(), "Failed to deliver booking.cancelled");
        }

        Ok(ReleaseSeatResult { booking })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::events::InMemoryEventBus;
    use crate::adapters::memory::InMemoryBookingStore;
    use crate::domain::booking::BookingStatus;
    use crate::domain::foundation::{ErrorCode, RideId, VehicleId};
    use crate::domain::ride::Ride;

    struct Fixture {
        store: Arc<InMemoryBookingStore>,
        bus: Arc<InMemoryEventBus>,
        handler: ReleaseSeatHandler,
    }

    impl Fixture {
        fn new() -> Self {
            let store = Arc::new(InMemoryBookingStore::new());
            let bus = Arc::new(InMemoryEventBus::new());
            let handler = ReleaseSeatHandler::new(store.clone(), bus.clone());
            Self {
                store,
                bus,
                handler,
            }
        }

        /// Seeds a ride with one confirmed booking, seat already taken.
        async fn seed_booked_ride(&self, seats: u32, passenger: UserId) -> (RideId, BookingId) {
            let mut ride = Ride::publish(
                RideId::new(),
                UserId::new(),
                VehicleId::new(),
                "Pune".to_string(),
                "Mumbai".to_string(),
                Timestamp::now().plus_hours(6),
                seats,
                25_000,
                false,
            )
            .unwrap();
            ride.take_seat().unwrap();
            let ride_id = *ride.id();
            self.store.seed_ride(ride).await;

            let booking = Booking::confirm(BookingId::new(), ride_id, passenger);
            let booking_id = *booking.id();
            let mut tx = self.store.begin().await.unwrap();
            tx.insert_booking(&booking).await.unwrap();
            tx.commit().await.unwrap();

            (ride_id, booking_id)
        }

        async fn release(
            &self,
            booking_id: BookingId,
            passenger_id: UserId,
        ) -> Result<ReleaseSeatResult, DomainError> {
            self.handler
                .handle(ReleaseSeatCommand {
                    booking_id,
                    passenger_id,
                })
                .await
        }
    }

    #[tokio::test]
    async fn release_cancels_booking_and_returns_seat() {
        let fx = Fixture::new();
        let passenger = UserId::new();
        let (ride_id, booking_id) = fx.seed_booked_ride(2, passenger).await;

        fx.release(booking_id, passenger).await.unwrap();

        let booking = fx.store.booking(&booking_id).await.unwrap();
        assert_eq!(booking.status(), BookingStatus::Cancelled);
        assert_eq!(fx.store.ride(&ride_id).await.unwrap().available_seats(), 2);
        assert!(fx.store.conservation_holds(&ride_id).await);
        assert!(fx.bus.has_event("booking.cancelled"));
    }

    #[tokio::test]
    async fn release_by_non_owner_is_not_found() {
        let fx = Fixture::new();
        let passenger = UserId::new();
        let (ride_id, booking_id) = fx.seed_booked_ride(2, passenger).await;

        let err = fx.release(booking_id, UserId::new()).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound);
        assert_eq!(fx.store.ride(&ride_id).await.unwrap().available_seats(), 1);
        assert!(fx.store.booking(&booking_id).await.unwrap().is_confirmed());
    }

    #[tokio::test]
    async fn second_release_is_not_found_and_leaves_seats_alone() {
        let fx = Fixture::new();
        let passenger = UserId::new();
        let (ride_id, booking_id) = fx.seed_booked_ride(2, passenger).await;

        fx.release(booking_id, passenger).await.unwrap();
        let err = fx.release(booking_id, passenger).await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::NotFound);
        // Not double-incremented.
        assert_eq!(fx.store.ride(&ride_id).await.unwrap().available_seats(), 2);
    }

    #[tokio::test]
    async fn unknown_booking_is_not_found() {
        let fx = Fixture::new();
        let err = fx.release(BookingId::new(), UserId::new()).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotFound);
    }
}
