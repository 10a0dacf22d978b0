//! ReserveSeatHandler - the transactional seat-reservation coordinator.
//!
//! Everything between `begin` and `commit` is one atomic unit: the ride
//! row lock is the first data access, so concurrent reservations against
//! the same ride serialize, and the second caller for the last seat
//! re-reads `available_seats == 0` after the first commit and fails
//! `RideFull`. The driver notification runs strictly after commit and can
//! never unwind a committed booking.

use std::sync::Arc;

use crate::domain::booking::{Booking, BookingConfirmed, SEATS_PER_BOOKING};
use crate::domain::foundation::{
    BookingId, DomainError, EventId, RideId, SerializableDomainEvent, Timestamp, UserId,
};
use crate::domain::ride::Ride;
use crate::domain::user::PassengerSnapshot;
use crate::ports::{
    BookingLedger, BookingStore, BookingTx, EventPublisher, PassengerDirectory, RideInventory,
};

/// Command to reserve one seat on a ride.
#[derive(Debug, Clone)]
pub struct ReserveSeatCommand {
    pub ride_id: RideId,
    pub passenger_id: UserId,
}

/// Result of a successful reservation.
#[derive(Debug, Clone)]
pub struct ReserveSeatResult {
    pub booking: Booking,
}

/// Handler for reserving seats.
pub struct ReserveSeatHandler {
    store: Arc<dyn BookingStore>,
    passengers: Arc<dyn PassengerDirectory>,
    events: Arc<dyn EventPublisher>,
}

impl ReserveSeatHandler {
    pub fn new(
        store: Arc<dyn BookingStore>,
        passengers: Arc<dyn PassengerDirectory>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            store,
            passengers,
            events,
        }
    }

    pub async fn handle(&self, cmd: ReserveSeatCommand) -> Result<ReserveSeatResult, DomainError> {
        // 1. Open the atomic unit and lock the ride row first. Any early
        //    return below drops the unit, which rolls everything back.
        let mut tx = self.store.begin().await?;

        let ride = tx
            .lock_ride(&cmd.ride_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Ride"))?;

        // 2. Passenger snapshot from the identity collaborator.
        let passenger = self
            .passengers
            .find_snapshot(&cmd.passenger_id)
            .await?
            .ok_or_else(|| DomainError::not_found("User"))?;

        // 3. Eligibility checks, in their fixed short-circuit order.
        ride.ensure_reservable_by(&passenger)?;

        // 4. One ledger row per (ride, passenger), ever: create on first
        //    booking, reactivate after a cancel, reject an active one.
        let booking = match tx.find_booking(&cmd.ride_id, &cmd.passenger_id).await? {
            None => {
                let booking = Booking::confirm(BookingId::new(), cmd.ride_id, cmd.passenger_id);
                tx.insert_booking(&booking).await?;
                booking
            }
            Some(mut existing) => {
                existing.reactivate()?;
                tx.reactivate_booking(existing.id()).await?;
                existing
            }
        };

        // 5. Take the seat and commit both writes together.
        tx.adjust_available_seats(&cmd.ride_id, -(SEATS_PER_BOOKING as i64))
            .await?;
        tx.commit().await?;

        // 6. Best-effort notification, outside the atomic unit.
        self.publish_confirmed(&ride, &passenger, &booking).await;

        Ok(ReserveSeatResult { booking })
    }

    /// Publishes `booking.confirmed`. Failures are logged and swallowed:
    /// the booking is already committed and the response must not change.
    async fn publish_confirmed(&self, ride: &Ride, passenger: &PassengerSnapshot, booking: &Booking) {
        let driver = match self.passengers.find_snapshot(ride.driver_id()).await {
            Ok(Some(driver)) => driver,
            Ok(None) => {
                tracing::warn!(ride_id = %ride.id(), "Driver snapshot missing, skipping booking notice");
                return;
            }
            Err(e) => {
                tracing::warn!(error = %e, ride_id = %ride.id(), "Driver lookup failed, skipping booking notice");
                return;
            }
        };

        let event = BookingConfirmed {
            event_id: EventId::new(),
            booking_id: *booking.id(),
            ride_id: *ride.id(),
            passenger_id: passenger.id,
            passenger_name: passenger.display_name.clone(),
            driver_name: driver.display_name,
            driver_email: driver.email,
            origin: ride.origin().to_string(),
            destination: ride.destination().to_string(),
            confirmed_at: Timestamp::now(),
        };

        if let Err(e) = self.events.publish(event.to_envelope()).await {
            tracing::warn!(error = %e, booking_id = %booking.id(), "Failed to deliver booking.confirmed");
        }
    }
}
