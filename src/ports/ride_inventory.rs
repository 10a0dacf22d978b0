//! RideInventory port - seat-inventory operations inside an atomic unit.
//!
//! Every method runs against the open transaction that produced the
//! handle (see `BookingStore`), so reads observe a single consistent
//! snapshot and writes commit or roll back together.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, RideId, Timestamp, UserId, VehicleId};
use crate::domain::ride::Ride;

/// Seat-inventory side of the booking unit of work.
///
/// # Contract
///
/// - `lock_ride` acquires an exclusive row-level lock held until the unit
///   commits or rolls back; concurrent units targeting the same ride block
///   here. This serializes all seat-count mutations per ride.
/// - `adjust_available_seats` must only be called while holding the lock
///   from the same unit; implementations reject a result outside
///   `0..=total_seats` with `StorageConflict`.
#[async_trait]
pub trait RideInventory {
    /// Locks and reads a ride row. `None` if the ride does not exist.
    async fn lock_ride(&mut self, ride_id: &RideId) -> Result<Option<Ride>, DomainError>;

    /// Locks and reads a ride only if it is scheduled and owned by
    /// `driver_id`. `None` covers absent, cancelled, and not-yours alike.
    async fn lock_scheduled_ride_owned(
        &mut self,
        ride_id: &RideId,
        driver_id: &UserId,
    ) -> Result<Option<Ride>, DomainError>;

    /// Atomically adds `delta` seats (negative on reserve, positive on
    /// release) to the ride's available pool.
    async fn adjust_available_seats(
        &mut self,
        ride_id: &RideId,
        delta: i64,
    ) -> Result<(), DomainError>;

    /// Flips the ride status to cancelled.
    async fn mark_ride_cancelled(&mut self, ride_id: &RideId) -> Result<(), DomainError>;

    /// Cancels every scheduled ride of `vehicle_id` departing after `now`
    /// and returns their ids (vehicle-deletion cascade).
    async fn cancel_scheduled_rides_for_vehicle(
        &mut self,
        vehicle_id: &VehicleId,
        now: Timestamp,
    ) -> Result<Vec<RideId>, DomainError>;
}
