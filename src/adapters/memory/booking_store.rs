//! In-memory booking store for testing.
//!
//! Preserves the observable semantics of the Postgres unit of work with
//! deterministic in-process state:
//!
//! - `begin` takes a single async mutex for the life of the unit, so
//!   concurrent units serialize exactly like row-locked transactions
//!   (coarser: one lock for the whole store rather than per ride).
//! - Writes are staged and applied to a copy of the state at commit;
//!   dropping an uncommitted unit discards the staging area, so rollback
//!   leaves nothing behind.
//! - Seat adjustments outside `0..=total_seats` and duplicate
//!   (ride, passenger) inserts fail the whole commit with
//!   `StorageConflict`, mirroring the database CHECK and UNIQUE
//!   constraints.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use crate::domain::booking::{Booking, BookingStatus};
use crate::domain::foundation::{
    BookingId, DomainError, ErrorCode, RideId, Timestamp, UserId, VehicleId,
};
use crate::domain::ride::{Ride, RideStatus};
use crate::domain::vehicle::Vehicle;
use crate::ports::{BookingLedger, BookingStore, BookingTx, RideInventory};

#[derive(Default, Clone)]
struct StoreState {
    rides: HashMap<RideId, Ride>,
    bookings: HashMap<BookingId, Booking>,
    vehicles: HashMap<VehicleId, Vehicle>,
}

/// In-memory implementation of `BookingStore`.
#[derive(Clone, Default)]
pub struct InMemoryBookingStore {
    state: Arc<Mutex<StoreState>>,
}

impl InMemoryBookingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    // === Seeding helpers ===

    /// Inserts a ride directly, bypassing the unit of work.
    pub async fn seed_ride(&self, ride: Ride) {
        self.state.lock().await.rides.insert(*ride.id(), ride);
    }

    /// Inserts a vehicle directly, bypassing the unit of work.
    pub async fn seed_vehicle(&self, vehicle: Vehicle) {
        self.state
            .lock()
            .await
            .vehicles
            .insert(*vehicle.id(), vehicle);
    }

    // === Inspection helpers for assertions ===

    /// Returns the current state of a ride.
    pub async fn ride(&self, id: &RideId) -> Option<Ride> {
        self.state.lock().await.rides.get(id).cloned()
    }

    /// Returns the current state of a booking.
    pub async fn booking(&self, id: &BookingId) -> Option<Booking> {
        self.state.lock().await.bookings.get(id).cloned()
    }

    /// Returns the booking row for a (ride, passenger) pair, if any.
    pub async fn booking_for(&self, ride_id: &RideId, passenger_id: &UserId) -> Option<Booking> {
        self.state
            .lock()
            .await
            .bookings
            .values()
            .find(|b| b.ride_id() == ride_id && b.passenger_id() == passenger_id)
            .cloned()
    }

    /// Returns every booking on a ride.
    pub async fn bookings_for_ride(&self, ride_id: &RideId) -> Vec<Booking> {
        self.state
            .lock()
            .await
            .bookings
            .values()
            .filter(|b| b.ride_id() == ride_id)
            .cloned()
            .collect()
    }

    /// Returns the current state of a vehicle.
    pub async fn vehicle(&self, id: &VehicleId) -> Option<Vehicle> {
        self.state.lock().await.vehicles.get(id).cloned()
    }

    /// Total number of booking rows across all rides.
    pub async fn booking_count(&self) -> usize {
        self.state.lock().await.bookings.len()
    }

    /// Checks the seat conservation law for one ride:
    /// `available_seats + confirmed seats == total_seats`.
    pub async fn conservation_holds(&self, ride_id: &RideId) -> bool {
        let state = self.state.lock().await;
        let Some(ride) = state.rides.get(ride_id) else {
            return false;
        };
        let confirmed: u32 = state
            .bookings
            .values()
            .filter(|b| b.ride_id() == ride_id && b.is_confirmed())
            .map(|b| b.seats_booked())
            .sum();
        ride.available_seats() + confirmed == ride.total_seats()
    }
}

#[async_trait]
impl BookingStore for InMemoryBookingStore {
    async fn begin(&self) -> Result<Box<dyn BookingTx>, DomainError> {
        let guard = Arc::clone(&self.state).lock_owned().await;
        Ok(Box::new(InMemoryTx {
            guard,
            staged: Vec::new(),
        }))
    }
}

enum Write {
    InsertBooking(Booking),
    ReactivateBooking(BookingId),
    CancelBooking(BookingId),
    AdjustSeats(RideId, i64),
    MarkRideCancelled(RideId),
    CancelRideBookings(RideId),
    DeleteVehicle(VehicleId),
}

/// One in-memory atomic unit. Holds the store lock until committed or
/// dropped; reads observe the pre-unit state (all flows read before they
/// write).
struct InMemoryTx {
    guard: OwnedMutexGuard<StoreState>,
    staged: Vec<Write>,
}

impl InMemoryTx {
    fn apply(state: &mut StoreState, write: &Write) -> Result<(), DomainError> {
        let conflict = |msg: &str| DomainError::new(ErrorCode::StorageConflict, msg.to_string());

        match write {
            Write::InsertBooking(booking) => {
                let duplicate = state.bookings.values().any(|b| {
                    b.ride_id() == booking.ride_id() && b.passenger_id() == booking.passenger_id()
                });
                if duplicate {
                    return Err(conflict("Duplicate booking for (ride, passenger)"));
                }
                state.bookings.insert(*booking.id(), booking.clone());
            }
            Write::ReactivateBooking(id) => {
                let booking = state
                    .bookings
                    .get_mut(id)
                    .ok_or_else(|| conflict("Booking vanished before commit"))?;
                booking
                    .reactivate()
                    .map_err(|_| conflict("Booking no longer cancelled"))?;
            }
            Write::CancelBooking(id) => {
                let booking = state
                    .bookings
                    .get_mut(id)
                    .ok_or_else(|| conflict("Booking vanished before commit"))?;
                booking
                    .cancel()
                    .map_err(|_| conflict("Booking no longer confirmed"))?;
            }
            Write::AdjustSeats(ride_id, delta) => {
                let ride = state
                    .rides
                    .get_mut(ride_id)
                    .ok_or_else(|| conflict("Ride vanished before commit"))?;
                if *delta >= 0 {
                    ride.return_seats(*delta as u32)?;
                } else {
                    for _ in 0..delta.unsigned_abs() {
                        ride.take_seat()
                            .map_err(|_| conflict("Seat count would fall below zero"))?;
                    }
                }
            }
            Write::MarkRideCancelled(ride_id) => {
                let ride = state
                    .rides
                    .get_mut(ride_id)
                    .ok_or_else(|| conflict("Ride vanished before commit"))?;
                ride.cancel()
                    .map_err(|_| conflict("Ride no longer scheduled"))?;
            }
            Write::CancelRideBookings(ride_id) => {
                for booking in state.bookings.values_mut() {
                    if booking.ride_id() == ride_id && booking.is_confirmed() {
                        booking
                            .cancel()
                            .map_err(|_| conflict("Booking no longer confirmed"))?;
                    }
                }
            }
            Write::DeleteVehicle(vehicle_id) => {
                state.vehicles.remove(vehicle_id);
                for ride in state.rides.values_mut() {
                    if ride.vehicle_id() == Some(vehicle_id) {
                        ride.detach_vehicle();
                    }
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl RideInventory for InMemoryTx {
    async fn lock_ride(&mut self, ride_id: &RideId) -> Result<Option<Ride>, DomainError> {
        Ok(self.guard.rides.get(ride_id).cloned())
    }

    async fn lock_scheduled_ride_owned(
        &mut self,
        ride_id: &RideId,
        driver_id: &UserId,
    ) -> Result<Option<Ride>, DomainError> {
        Ok(self
            .guard
            .rides
            .get(ride_id)
            .filter(|r| r.driver_id() == driver_id && r.status() == RideStatus::Scheduled)
            .cloned())
    }

    async fn adjust_available_seats(
        &mut self,
        ride_id: &RideId,
        delta: i64,
    ) -> Result<(), DomainError> {
        self.staged.push(Write::AdjustSeats(*ride_id, delta));
        Ok(())
    }

    async fn mark_ride_cancelled(&mut self, ride_id: &RideId) -> Result<(), DomainError> {
        self.staged.push(Write::MarkRideCancelled(*ride_id));
        Ok(())
    }

    async fn cancel_scheduled_rides_for_vehicle(
        &mut self,
        vehicle_id: &VehicleId,
        now: Timestamp,
    ) -> Result<Vec<RideId>, DomainError> {
        let ids: Vec<RideId> = self
            .guard
            .rides
            .values()
            .filter(|r| {
                r.vehicle_id() == Some(vehicle_id)
                    && r.status() == RideStatus::Scheduled
                    && r.departure_time().is_after(&now)
            })
            .map(|r| *r.id())
            .collect();

        for id in &ids {
            self.staged.push(Write::MarkRideCancelled(*id));
        }
        Ok(ids)
    }
}

#[async_trait]
impl BookingLedger for InMemoryTx {
    async fn find_booking(
        &mut self,
        ride_id: &RideId,
        passenger_id: &UserId,
    ) -> Result<Option<Booking>, DomainError> {
        Ok(self
            .guard
            .bookings
            .values()
            .find(|b| b.ride_id() == ride_id && b.passenger_id() == passenger_id)
            .cloned())
    }

    async fn insert_booking(&mut self, booking: &Booking) -> Result<(), DomainError> {
        self.staged.push(Write::InsertBooking(booking.clone()));
        Ok(())
    }

    async fn reactivate_booking(&mut self, booking_id: &BookingId) -> Result<(), DomainError> {
        self.staged.push(Write::ReactivateBooking(*booking_id));
        Ok(())
    }

    async fn cancel_booking(&mut self, booking_id: &BookingId) -> Result<(), DomainError> {
        self.staged.push(Write::CancelBooking(*booking_id));
        Ok(())
    }

    async fn lock_confirmed_booking(
        &mut self,
        booking_id: &BookingId,
        passenger_id: &UserId,
    ) -> Result<Option<Booking>, DomainError> {
        Ok(self
            .guard
            .bookings
            .get(booking_id)
            .filter(|b| b.passenger_id() == passenger_id && b.status() == BookingStatus::Confirmed)
            .cloned())
    }

    async fn cancel_bookings_for_ride(&mut self, ride_id: &RideId) -> Result<u64, DomainError> {
        let count = self
            .guard
            .bookings
            .values()
            .filter(|b| b.ride_id() == ride_id && b.is_confirmed())
            .count() as u64;
        self.staged.push(Write::CancelRideBookings(*ride_id));
        Ok(count)
    }
}

#[async_trait]
impl BookingTx for InMemoryTx {
    async fn delete_vehicle(
        &mut self,
        vehicle_id: &VehicleId,
        owner_id: &UserId,
    ) -> Result<bool, DomainError> {
        let owned = self
            .guard
            .vehicles
            .get(vehicle_id)
            .map(|v| v.owner_id() == owner_id)
            .unwrap_or(false);
        if owned {
            self.staged.push(Write::DeleteVehicle(*vehicle_id));
        }
        Ok(owned)
    }

    async fn commit(mut self: Box<Self>) -> Result<(), DomainError> {
        // Apply to a copy first so a failing write leaves the store as if
        // the unit never ran.
        let mut next = self.guard.clone();
        for write in &self.staged {
            Self::apply(&mut next, write)?;
        }
        *self.guard = next;
        Ok(())
    }

    async fn rollback(self: Box<Self>) -> Result<(), DomainError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::Timestamp;

    fn test_ride(seats: u32) -> Ride {
        Ride::publish(
            RideId::new(),
            UserId::new(),
            VehicleId::new(),
            "Pune".to_string(),
            "Mumbai".to_string(),
            Timestamp::now().plus_hours(4),
            seats,
            20_000,
            false,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn commit_applies_staged_writes() {
        let store = InMemoryBookingStore::new();
        let ride = test_ride(2);
        let ride_id = *ride.id();
        store.seed_ride(ride).await;

        let mut tx = store.begin().await.unwrap();
        let booking = Booking::confirm(BookingId::new(), ride_id, UserId::new());
        tx.insert_booking(&booking).await.unwrap();
        tx.adjust_available_seats(&ride_id, -1).await.unwrap();
        tx.commit().await.unwrap();

        assert_eq!(store.ride(&ride_id).await.unwrap().available_seats(), 1);
        assert!(store.booking(booking.id()).await.is_some());
        assert!(store.conservation_holds(&ride_id).await);
    }

    #[tokio::test]
    async fn dropping_a_unit_discards_its_writes() {
        let store = InMemoryBookingStore::new();
        let ride = test_ride(2);
        let ride_id = *ride.id();
        store.seed_ride(ride).await;

        {
            let mut tx = store.begin().await.unwrap();
            tx.adjust_available_seats(&ride_id, -1).await.unwrap();
            // dropped without commit
        }

        assert_eq!(store.ride(&ride_id).await.unwrap().available_seats(), 2);
    }

    #[tokio::test]
    async fn explicit_rollback_discards_writes() {
        let store = InMemoryBookingStore::new();
        let ride = test_ride(2);
        let ride_id = *ride.id();
        store.seed_ride(ride).await;

        let mut tx = store.begin().await.unwrap();
        tx.adjust_available_seats(&ride_id, -1).await.unwrap();
        tx.rollback().await.unwrap();

        assert_eq!(store.ride(&ride_id).await.unwrap().available_seats(), 2);
    }

    #[tokio::test]
    async fn overdraw_fails_commit_without_partial_application() {
        let store = InMemoryBookingStore::new();
        let ride = test_ride(1);
        let ride_id = *ride.id();
        store.seed_ride(ride).await;

        let mut tx = store.begin().await.unwrap();
        let booking = Booking::confirm(BookingId::new(), ride_id, UserId::new());
        tx.insert_booking(&booking).await.unwrap();
        tx.adjust_available_seats(&ride_id, -2).await.unwrap();
        let err = tx.commit().await.unwrap_err();

        assert_eq!(err.code(), ErrorCode::StorageConflict);
        // The booking insert staged before the failing adjustment must not
        // have leaked either.
        assert!(store.booking(booking.id()).await.is_none());
        assert_eq!(store.ride(&ride_id).await.unwrap().available_seats(), 1);
    }

    #[tokio::test]
    async fn duplicate_insert_fails_commit() {
        let store = InMemoryBookingStore::new();
        let ride = test_ride(3);
        let ride_id = *ride.id();
        store.seed_ride(ride).await;
        let passenger = UserId::new();

        let mut tx = store.begin().await.unwrap();
        tx.insert_booking(&Booking::confirm(BookingId::new(), ride_id, passenger))
            .await
            .unwrap();
        tx.commit().await.unwrap();

        let mut tx = store.begin().await.unwrap();
        tx.insert_booking(&Booking::confirm(BookingId::new(), ride_id, passenger))
            .await
            .unwrap();
        let err = tx.commit().await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::StorageConflict);
        assert_eq!(store.booking_count().await, 1);
    }

    #[tokio::test]
    async fn units_serialize_behind_the_lock() {
        let store = InMemoryBookingStore::new();
        let ride = test_ride(5);
        let ride_id = *ride.id();
        store.seed_ride(ride).await;

        let mut handles = Vec::new();
        for _ in 0..5 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                let mut tx = store.begin().await.unwrap();
                tx.insert_booking(&Booking::confirm(BookingId::new(), ride_id, UserId::new()))
                    .await
                    .unwrap();
                tx.adjust_available_seats(&ride_id, -1).await.unwrap();
                tx.commit().await.unwrap();
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        assert_eq!(store.ride(&ride_id).await.unwrap().available_seats(), 0);
        assert!(store.conservation_holds(&ride_id).await);
    }

    #[tokio::test]
    async fn delete_vehicle_detaches_rides() {
        let store = InMemoryBookingStore::new();
        let owner = UserId::new();
        let vehicle =
            Vehicle::register(VehicleId::new(), owner, "Swift".to_string(), "DL01AB1234").unwrap();
        let vehicle_id = *vehicle.id();
        store.seed_vehicle(vehicle).await;

        let ride = Ride::publish(
            RideId::new(),
            owner,
            vehicle_id,
            "Pune".to_string(),
            "Mumbai".to_string(),
            Timestamp::now().plus_hours(4),
            2,
            20_000,
            false,
        )
        .unwrap();
        let ride_id = *ride.id();
        store.seed_ride(ride).await;

        let mut tx = store.begin().await.unwrap();
        assert!(tx.delete_vehicle(&vehicle_id, &owner).await.unwrap());
        tx.commit().await.unwrap();

        assert!(store.vehicle(&vehicle_id).await.is_none());
        assert_eq!(store.ride(&ride_id).await.unwrap().vehicle_id(), None);
    }

    #[tokio::test]
    async fn delete_vehicle_requires_ownership() {
        let store = InMemoryBookingStore::new();
        let vehicle = Vehicle::register(
            VehicleId::new(),
            UserId::new(),
            "Swift".to_string(),
            "DL01AB1234",
        )
        .unwrap();
        let vehicle_id = *vehicle.id();
        store.seed_vehicle(vehicle).await;

        let mut tx = store.begin().await.unwrap();
        assert!(!tx.delete_vehicle(&vehicle_id, &UserId::new()).await.unwrap());
        tx.commit().await.unwrap();

        assert!(store.vehicle(&vehicle_id).await.is_some());
    }
}
